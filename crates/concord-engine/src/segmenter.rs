//! Rule-based sentence segmentation
//!
//! Splits on paragraph breaks and on runs of `.`, `!`, `?` and `…` that are
//! followed by whitespace. Titles such as "Dr." never end a sentence. Other
//! abbreviations end one only when the next word is capitalized, so
//! "Jan. 5" stays whole while "etc. Revenue" splits. A single-letter initial
//! inside a name ("J. R. Smith", "John F. Kennedy") is kept together.

use concord_domain::traits::SentenceSegmenter;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t\r]*\n").expect("paragraph pattern is a valid regex"));

/// Titles that always precede a name
const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "gen", "sen", "rep", "gov", "capt", "lt", "col",
    "sgt",
];

/// Abbreviations that usually, but not always, sit mid-sentence
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "vs", "approx", "est", "no", "nos", "fig", "figs", "vol", "p", "pp",
    "inc", "ltd", "co", "corp", "llc", "dept", "st", "ave", "jr", "sr", "jan", "feb", "mar",
    "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k", "e.u", "a.m",
    "p.m", "ph.d", "min", "max", "hr", "hrs", "yr", "yrs", "mo", "mos", "qtr",
];

/// Words that open a new sentence even after a name initial
const SENTENCE_STARTERS: &[&str] = &[
    "A", "After", "All", "Also", "An", "And", "As", "At", "Because", "Before", "But", "By",
    "During", "Each", "Every", "For", "From", "He", "Her", "His", "However", "I", "If", "In",
    "It", "Its", "Many", "Most", "No", "Our", "She", "So", "Some", "That", "The", "Their",
    "There", "These", "They", "This", "Those", "Thus", "To", "We", "What", "When", "Where",
    "While", "With", "You",
];

const TERMINATORS: &[char] = &['.', '!', '?', '…'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '”', '’', '»'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '{', '“', '‘', '«'];

/// Abbreviation-aware splitter for English prose
#[derive(Debug, Clone)]
pub struct RuleSegmenter {
    abbreviations: HashSet<String>,
}

impl RuleSegmenter {
    /// Segmenter with the built-in abbreviation list
    pub fn new() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Add abbreviations, written with or without the trailing period
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for abbreviation in extra {
            let normalized = abbreviation
                .as_ref()
                .trim()
                .trim_end_matches('.')
                .to_lowercase();
            if !normalized.is_empty() {
                self.abbreviations.insert(normalized);
            }
        }
        self
    }

    /// Whether `word` (without its period) is a known abbreviation
    pub fn is_abbreviation(&self, word: &str) -> bool {
        let lowered = word.trim_end_matches('.').to_lowercase();
        TITLES.contains(&lowered.as_str()) || self.abbreviations.contains(&lowered)
    }

    fn split_paragraph(&self, paragraph: &str, out: &mut Vec<String>) {
        let chars: Vec<(usize, char)> = paragraph.char_indices().collect();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !TERMINATORS.contains(&chars[i].1) {
                i += 1;
                continue;
            }

            let first_terminator = i;
            let mut j = i;
            while j < chars.len() && TERMINATORS.contains(&chars[j].1) {
                j += 1;
            }
            let single_period = j == first_terminator + 1 && chars[first_terminator].1 == '.';
            while j < chars.len() && CLOSERS.contains(&chars[j].1) {
                j += 1;
            }

            // Decimal points, inner periods of "e.g" and the like
            if j < chars.len() && !chars[j].1.is_whitespace() {
                i = j;
                continue;
            }

            if self.is_boundary(&chars, first_terminator, single_period, j) {
                let end = chars.get(j).map_or(paragraph.len(), |(byte, _)| *byte);
                push_trimmed(&paragraph[start..end], out);
                start = end;
            }
            i = j;
        }

        push_trimmed(&paragraph[start..], out);
    }

    fn is_boundary(
        &self,
        chars: &[(usize, char)],
        terminator: usize,
        single_period: bool,
        after: usize,
    ) -> bool {
        let next_word: String = chars[after..]
            .iter()
            .map(|(_, c)| *c)
            .skip_while(|c| c.is_whitespace())
            .take_while(|c| !c.is_whitespace())
            .collect();
        let next_word = next_word.trim_start_matches(OPENERS);

        let Some(first) = next_word.chars().next() else {
            return true;
        };
        if first.is_lowercase() {
            return false;
        }
        if !single_period {
            return true;
        }

        let previous = previous_token(chars, terminator);
        if TITLES.contains(&previous.as_str()) {
            return false;
        }
        if is_initial(&previous) {
            return ends_after_initial(chars, terminator, next_word);
        }
        if self.abbreviations.contains(&previous) {
            return first.is_uppercase();
        }
        true
    }
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for paragraph in PARAGRAPH_BREAK.split(text) {
            self.split_paragraph(paragraph, &mut sentences);
        }
        sentences
    }
}

/// Lowercased word (letters, digits and inner periods) ending right before `position`
fn previous_token(chars: &[(usize, char)], position: usize) -> String {
    let mut begin = position;
    while begin > 0 {
        let c = chars[begin - 1].1;
        if c.is_alphanumeric() || c == '.' {
            begin -= 1;
        } else {
            break;
        }
    }
    chars[begin..position]
        .iter()
        .map(|(_, c)| *c)
        .collect::<String>()
        .trim_start_matches('.')
        .to_lowercase()
}

fn is_initial(token: &str) -> bool {
    let mut letters = token.chars();
    matches!((letters.next(), letters.next()), (Some(c), None) if c.is_alphabetic())
}

/// Decide a boundary after the initial sitting right before `terminator`
///
/// "plan B. Costs rose" splits; "J. R. Smith" and "John F. Kennedy" do not.
fn ends_after_initial(chars: &[(usize, char)], terminator: usize, next_word: &str) -> bool {
    if !next_word.starts_with(char::is_uppercase) {
        return false;
    }
    if next_word.ends_with('.') && is_initial(next_word.trim_end_matches('.')) {
        return false;
    }
    if is_sentence_starter(next_word) {
        return true;
    }
    // A capitalized word, another initial or a sentence end before it marks a name
    match word_before(chars, terminator - 1) {
        Some(word) => !(word.starts_with(char::is_uppercase) || word.ends_with(TERMINATORS)),
        None => false,
    }
}

/// Whitespace-delimited word ending before `position`, skipping whitespace
fn word_before(chars: &[(usize, char)], position: usize) -> Option<String> {
    let mut end = position;
    while end > 0 && chars[end - 1].1.is_whitespace() {
        end -= 1;
    }
    let mut begin = end;
    while begin > 0 && !chars[begin - 1].1.is_whitespace() {
        begin -= 1;
    }
    (begin < end).then(|| chars[begin..end].iter().map(|(_, c)| *c).collect())
}

fn is_sentence_starter(word: &str) -> bool {
    let bare = word.trim_end_matches(|c: char| !c.is_alphanumeric());
    SENTENCE_STARTERS.contains(&bare)
}

fn push_trimmed(fragment: &str, out: &mut Vec<String>) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}
