//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the consistency engine and
//! the linguistic services it relies on. Implementations live in other
//! crates.

use std::collections::BTreeSet;

/// Splits raw text into sentences
///
/// Implemented by the engine's rule-based segmenter; any language-aware,
/// abbreviation-tolerant splitter can stand in.
pub trait SentenceSegmenter {
    /// Split `text` into sentence fragments in document order
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Synonym lookup against a lexical database
///
/// Implemented by the lexicon layer (concord-lexicon). Lookups never fail:
/// an unavailable or unknown word yields an empty set.
pub trait LexicalDatabase {
    /// Lowercased synonyms of `word`
    fn synonyms_of(&self, word: &str) -> BTreeSet<String>;
}

/// Separator placed between the two sentences of an entailment query
pub const PAIR_SEPARATOR: &str = " </s> ";

/// Join a sentence pair into the single text an NLI model expects
pub fn combine_pair(sentence_a: &str, sentence_b: &str) -> String {
    format!("{}{}{}", sentence_a, PAIR_SEPARATOR, sentence_b)
}

/// Raw output of an entailment oracle, before label mapping
#[derive(Debug, Clone, PartialEq)]
pub struct RawClassification {
    /// Label in the oracle's own vocabulary
    pub label: String,
    /// Oracle score for that label
    pub confidence: f64,
}

impl RawClassification {
    /// Create a new raw classification
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Natural-language-inference classifier
///
/// Implemented by the oracle layer (concord-nli)
pub trait EntailmentClassifier {
    /// Error type for classifier operations
    type Error;

    /// Classify whether `sentence_b` follows from, contradicts, or is
    /// unrelated to `sentence_a`
    fn classify(
        &self,
        sentence_a: &str,
        sentence_b: &str,
    ) -> Result<RawClassification, Self::Error>;
}
