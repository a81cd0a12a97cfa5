//! Synonym tables

use crate::LexiconError;
use concord_domain::traits::LexicalDatabase;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Embedded WordNet-derived synonyms for the domain seed keywords
const BUILTIN_THESAURUS: &str = include_str!("../data/builtin_thesaurus.json");

/// In-memory synonym table
///
/// Words and synonyms are stored lowercased. Lemma separators (`_`) become
/// spaces so multi-word synonyms can match running text.
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    entries: HashMap<String, BTreeSet<String>>,
}

impl Thesaurus {
    /// Create an empty thesaurus
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded table covering every domain seed keyword
    pub fn builtin() -> Self {
        match Self::from_json_str(BUILTIN_THESAURUS) {
            Ok(thesaurus) => thesaurus,
            Err(e) => {
                warn!("Embedded thesaurus is unreadable, using an empty table: {}", e);
                Self::new()
            }
        }
    }

    /// Parse a JSON object mapping words to synonym arrays
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let raw: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    /// Parse a TOML table mapping words to synonym arrays
    pub fn from_toml_str(toml_str: &str) -> Result<Self, LexiconError> {
        let raw: HashMap<String, Vec<String>> = toml::from_str(toml_str)?;
        Ok(Self::from_raw(raw))
    }

    /// Load a thesaurus file, choosing the parser by extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let contents = fs::read_to_string(path)?;
        let thesaurus = match extension.as_str() {
            "json" => Self::from_json_str(&contents)?,
            "toml" => Self::from_toml_str(&contents)?,
            other => return Err(LexiconError::UnsupportedFormat(other.to_string())),
        };

        debug!(
            "Loaded {} thesaurus entries from {}",
            thesaurus.len(),
            path.display()
        );
        Ok(thesaurus)
    }

    fn from_raw(raw: HashMap<String, Vec<String>>) -> Self {
        let mut thesaurus = Self::new();
        for (word, synonyms) in raw {
            thesaurus.insert(&word, synonyms);
        }
        thesaurus
    }

    /// Add synonyms for a word, merging with any existing entry
    pub fn insert<I, S>(&mut self, word: &str, synonyms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.entries.entry(normalize_term(word)).or_default();
        for synonym in synonyms {
            let synonym = normalize_term(synonym.as_ref());
            if !synonym.is_empty() {
                entry.insert(synonym);
            }
        }
    }

    /// Merge another thesaurus into this one
    pub fn merge(&mut self, other: Thesaurus) {
        for (word, synonyms) in other.entries {
            self.entries.entry(word).or_default().extend(synonyms);
        }
    }

    /// Number of headwords
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no headwords
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LexicalDatabase for Thesaurus {
    fn synonyms_of(&self, word: &str) -> BTreeSet<String> {
        self.entries
            .get(&normalize_term(word))
            .cloned()
            .unwrap_or_default()
    }
}

/// Lexical database that knows no synonyms
///
/// Domains fall back to their seed keywords when this is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLexicon;

impl LexicalDatabase for NullLexicon {
    fn synonyms_of(&self, _word: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase().replace('_', " ")
}
