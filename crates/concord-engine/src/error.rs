//! Error types for the consistency engine
//!
//! Analysis itself never fails: collaborator problems become per-pair
//! `ERROR` verdicts. These errors cover configuration, worker scheduling and
//! serialization only.

use thiserror::Error;

/// Errors that can occur around an analysis
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The worker pool could not be scheduled
    #[error("Worker error: {0}")]
    Worker(String),

    /// Output serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Serialization(e.to_string())
    }
}
