//! Lexicon error types

use thiserror::Error;

/// Errors that can occur while loading a lexical database
#[derive(Error, Debug)]
pub enum LexiconError {
    /// The thesaurus file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The thesaurus file is malformed
    #[error("Parse error: {0}")]
    Parse(String),

    /// The file extension is not json or toml
    #[error("Unsupported thesaurus format: {0}")]
    UnsupportedFormat(String),
}

impl From<serde_json::Error> for LexiconError {
    fn from(e: serde_json::Error) -> Self {
        LexiconError::Parse(e.to_string())
    }
}

impl From<toml::de::Error> for LexiconError {
    fn from(e: toml::de::Error) -> Self {
        LexiconError::Parse(e.to_string())
    }
}
