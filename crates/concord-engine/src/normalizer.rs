//! Numeric normalization
//!
//! Turns a matched fragment such as `"$1,200.50"`, `"45%"` or `"two"` into
//! a canonical `f64`. Currency symbols and thousands separators are
//! stripped, percentages are divided by 100, and the small number words
//! zero..ten plus the scale words hundred..billion map to their values.

/// Number words understood by [`normalize`]
const NUMBER_WORDS: &[(&str, f64)] = &[
    ("zero", 0.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("hundred", 100.0),
    ("thousand", 1_000.0),
    ("million", 1_000_000.0),
    ("billion", 1_000_000_000.0),
];

/// Currency symbols stripped before parsing
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£'];

/// Normalize a fragment into a canonical value
///
/// Returns `None` for anything that does not read as a finite number.
pub fn normalize(fragment: &str) -> Option<f64> {
    let text = fragment.trim().to_lowercase();

    if let Some((_, value)) = NUMBER_WORDS.iter().find(|(word, _)| *word == text) {
        return Some(*value);
    }

    let stripped: String = text
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',')
        .collect();

    let value = if stripped.contains('%') {
        stripped.replace('%', "").parse::<f64>().ok()? / 100.0
    } else {
        stripped.parse::<f64>().ok()?
    };

    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_with_separators() {
        assert_eq!(normalize("$1,200.50"), Some(1200.50));
        assert_eq!(normalize("€5,000"), Some(5000.0));
        assert_eq!(normalize("£12"), Some(12.0));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(normalize("45%"), Some(0.45));
        assert_eq!(normalize("12.5%"), Some(0.125));
    }

    #[test]
    fn test_number_words() {
        assert_eq!(normalize("two"), Some(2.0));
        assert_eq!(normalize("  Ten "), Some(10.0));
        assert_eq!(normalize("million"), Some(1_000_000.0));
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(normalize("42"), Some(42.0));
        assert_eq!(normalize("3.75"), Some(3.75));
        assert_eq!(normalize("1,000,000"), Some(1_000_000.0));
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert_eq!(normalize("not-a-number"), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("$"), None);
        assert_eq!(normalize("eleven"), None);
    }

    #[test]
    fn test_rejects_non_finite() {
        assert_eq!(normalize("nan"), None);
        assert_eq!(normalize("inf"), None);
        assert_eq!(normalize("infinity%"), None);
    }

    proptest::proptest! {
        #[test]
        fn prop_dollar_amounts_match_plain(whole in 0u64..10_000_000, cents in 0u32..100) {
            let plain = format!("{}.{:02}", whole, cents);
            let dollars = format!("${}", plain);
            proptest::prop_assert_eq!(normalize(&dollars), normalize(&plain));
        }
    }
}
