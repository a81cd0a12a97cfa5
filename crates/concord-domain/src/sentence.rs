//! Sentence value type

use std::fmt;

/// One sentence of the analysed document
///
/// `index` is the 0-based position in document order and is unique within
/// a single analysis run. `text` is trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sentence {
    /// Position in the document (0-based)
    pub index: usize,
    /// Trimmed sentence text
    pub text: String,
}

impl Sentence {
    /// Create a sentence, trimming the text
    ///
    /// Returns `None` if the trimmed text is empty.
    pub fn new(index: usize, text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            index,
            text: trimmed.to_string(),
        })
    }

    /// Build an indexed sentence list from raw fragments
    ///
    /// Empty fragments are discarded and indices are assigned to the
    /// survivors, so they stay dense and strictly increasing.
    pub fn sequence<I, S>(fragments: I) -> Vec<Sentence>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sentences = Vec::new();
        for fragment in fragments {
            if let Some(sentence) = Sentence::new(sentences.len(), fragment) {
                sentences.push(sentence);
            }
        }
        sentences
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims() {
        let s = Sentence::new(3, "  The budget is $5.  ").unwrap();
        assert_eq!(s.index, 3);
        assert_eq!(s.text, "The budget is $5.");
    }

    #[test]
    fn test_new_rejects_blank() {
        assert!(Sentence::new(0, "   \n\t").is_none());
    }

    #[test]
    fn test_sequence_skips_empty_and_keeps_indices_dense() {
        let sentences = Sentence::sequence(["First.", "  ", "Second.", "", "Third."]);
        let indices: Vec<usize> = sentences.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(sentences[2].text, "Third.");
    }

    proptest::proptest! {
        #[test]
        fn prop_sequence_indices_are_dense(fragments in proptest::collection::vec("[ a-z.]{0,12}", 0..20)) {
            let sentences = Sentence::sequence(&fragments);
            for (position, sentence) in sentences.iter().enumerate() {
                proptest::prop_assert_eq!(sentence.index, position);
                proptest::prop_assert!(!sentence.text.is_empty());
                proptest::prop_assert_eq!(sentence.text.trim(), sentence.text.as_str());
            }
        }
    }
}
