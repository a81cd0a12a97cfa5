//! Numeric mismatch detection
//!
//! Extracts every numeric fragment from both sentences, normalizes them into
//! value sets, and reports a mismatch for the first domain (in priority
//! order) where both sentences have context and the sets differ.

use crate::lexicon::DomainLexicon;
use crate::matcher::DomainMatcher;
use crate::normalizer::normalize;
use concord_domain::{NumericComparison, SemanticDomain};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

/// Reason reported when either sentence has no numbers
pub const NO_NUMBERS_REASON: &str = "No numbers to compare";

/// Reason reported when no domain triggers a mismatch
pub const NO_MISMATCH_REASON: &str = "No contextual numeric mismatch detected";

/// Extraction patterns, applied in this order: plain numbers with optional
/// thousands separators, percentages, dollar, euro and pound amounts
const NUMERIC_PATTERNS: [&str; 5] = [
    r"[0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?",
    r"[0-9]+(?:\.[0-9]+)?%",
    r"\$[0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?",
    r"€[0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?",
    r"£[0-9]+(?:,[0-9]{3})*(?:\.[0-9]+)?",
];

static COMPILED_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NUMERIC_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("numeric patterns are valid regexes"))
        .collect()
});

/// A matched numeric fragment and its canonical value
#[derive(Debug, Clone, PartialEq)]
pub struct NumericToken {
    /// The matched substring
    pub text: String,
    /// Normalized value
    pub value: f64,
}

/// Extract every numeric token from `text`
///
/// Each pattern runs over the whole text, so one fragment may be reported by
/// several patterns. Fragments that fail to normalize are dropped.
pub fn extract_tokens(text: &str) -> Vec<NumericToken> {
    COMPILED_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(text))
        .filter_map(|m| {
            normalize(m.as_str()).map(|value| NumericToken {
                text: m.as_str().to_string(),
                value,
            })
        })
        .collect()
}

/// Set of distinct values, kept sorted ascending
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericSet {
    values: Vec<f64>,
}

impl NumericSet {
    /// Build a set, collapsing duplicate values
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values.into_iter().collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        Self { values }
    }

    /// Values found in `text`
    pub fn from_text(text: &str) -> Self {
        Self::from_values(extract_tokens(text).into_iter().map(|t| t.value))
    }

    /// Whether the set has no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether `value` is in the set
    pub fn contains(&self, value: f64) -> bool {
        self.values.contains(&value)
    }

    /// Values in ascending order
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl fmt::Display for NumericSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", value)?;
        }
        f.write_str("}")
    }
}

/// Compares the numeric claims of two sentences within shared domains
#[derive(Debug, Clone, Copy)]
pub struct NumericMismatchDetector<'a> {
    matcher: DomainMatcher<'a>,
}

impl<'a> NumericMismatchDetector<'a> {
    /// Create a detector over `lexicon`
    pub fn new(lexicon: &'a DomainLexicon) -> Self {
        Self {
            matcher: DomainMatcher::new(lexicon),
        }
    }

    /// Compare two sentences
    pub fn compare(&self, sentence_a: &str, sentence_b: &str) -> NumericComparison {
        let nums_a = NumericSet::from_text(sentence_a);
        let nums_b = NumericSet::from_text(sentence_b);

        if nums_a.is_empty() || nums_b.is_empty() {
            return NumericComparison::consistent(NO_NUMBERS_REASON);
        }

        let lowered_a = sentence_a.to_lowercase();
        let lowered_b = sentence_b.to_lowercase();

        for domain in SemanticDomain::PRIORITY {
            if self.matcher.has_context_lowercase(domain, &lowered_a)
                && self.matcher.has_context_lowercase(domain, &lowered_b)
                && nums_a != nums_b
            {
                debug!("Numeric mismatch in {} context: {} vs {}", domain, nums_a, nums_b);
                return NumericComparison::mismatch(
                    domain,
                    format!(
                        "Numeric mismatch in {} context: {} vs {}",
                        domain, nums_a, nums_b
                    ),
                );
            }
        }

        NumericComparison::consistent(NO_MISMATCH_REASON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector_fixture() -> DomainLexicon {
        DomainLexicon::seeds_only()
    }

    #[test]
    fn test_overlapping_patterns_are_all_kept() {
        let tokens = extract_tokens("Spend $1,000 now.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["1,000", "$1,000"]);
        assert_eq!(NumericSet::from_text("Spend $1,000 now.").len(), 1);
    }

    #[test]
    fn test_percent_yields_both_raw_and_scaled_values() {
        let set = NumericSet::from_text("Growth was 45%.");
        assert_eq!(set.values(), &[0.45, 45.0]);
    }

    #[test]
    fn test_currency_patterns() {
        let set = NumericSet::from_text("Costs were €2,500, £300 and $1,200.50.");
        assert!(set.contains(2500.0));
        assert!(set.contains(300.0));
        assert!(set.contains(1200.5));
    }

    #[test]
    fn test_words_are_not_extracted() {
        assert!(NumericSet::from_text("We hired two engineers.").is_empty());
    }

    #[test]
    fn test_set_display() {
        let set = NumericSet::from_values([6000.0, 5000.0, 5000.0]);
        assert_eq!(set.to_string(), "{5000.0, 6000.0}");
        assert_eq!(NumericSet::default().to_string(), "{}");
    }

    #[test]
    fn test_no_numbers() {
        let lexicon = detector_fixture();
        let detector = NumericMismatchDetector::new(&lexicon);
        let result = detector.compare("The budget is $5,000.", "The budget is large.");
        assert!(!result.mismatch);
        assert_eq!(result.reason, NO_NUMBERS_REASON);
        assert_eq!(result.domain, None);
    }

    #[test]
    fn test_financial_mismatch() {
        let lexicon = detector_fixture();
        let detector = NumericMismatchDetector::new(&lexicon);
        let result = detector.compare("The budget is $5,000.", "The total budget is $6,000.");
        assert!(result.mismatch);
        assert_eq!(result.domain, Some(SemanticDomain::Financial));
        assert_eq!(
            result.reason,
            "Numeric mismatch in financial context: {5000.0} vs {6000.0}"
        );
    }

    #[test]
    fn test_equal_sets_do_not_mismatch() {
        let lexicon = detector_fixture();
        let detector = NumericMismatchDetector::new(&lexicon);
        let result = detector.compare("The budget is $5,000.", "We keep a 5,000 cost cap.");
        assert!(!result.mismatch);
        assert_eq!(result.reason, NO_MISMATCH_REASON);
    }

    #[test]
    fn test_partial_overlap_counts_as_mismatch() {
        let lexicon = detector_fixture();
        let detector = NumericMismatchDetector::new(&lexicon);
        let result = detector.compare("The cost is $5 or $6.", "The cost is $5.");
        assert!(result.mismatch);
    }

    #[test]
    fn test_no_shared_domain() {
        let lexicon = detector_fixture();
        let detector = NumericMismatchDetector::new(&lexicon);
        let result = detector.compare("The budget is $5,000.", "We hired 3 engineers.");
        assert!(!result.mismatch);
        assert_eq!(result.reason, NO_MISMATCH_REASON);
    }

    #[test]
    fn test_higher_priority_domain_wins() {
        let lexicon = detector_fixture();
        let detector = NumericMismatchDetector::new(&lexicon);
        // Both sentences are financial and temporal; financial is checked first.
        let result = detector.compare(
            "The budget is $100 per month.",
            "The budget is $200 per month.",
        );
        assert_eq!(result.domain, Some(SemanticDomain::Financial));
    }

    #[test]
    fn test_lower_priority_domain_when_higher_lacks_context() {
        let lexicon = detector_fixture();
        let detector = NumericMismatchDetector::new(&lexicon);
        let result = detector.compare(
            "The deadline is in 3 weeks.",
            "The budget review takes 4 weeks.",
        );
        assert_eq!(result.domain, Some(SemanticDomain::Temporal));
    }
}
