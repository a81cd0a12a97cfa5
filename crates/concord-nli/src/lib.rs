//! Concord Entailment Oracles
//!
//! Natural-language-inference classifiers behind the
//! [`EntailmentClassifier`](concord_domain::traits::EntailmentClassifier)
//! trait from `concord-domain`.
//!
//! # Providers
//!
//! - `MockClassifier`: Deterministic oracle for testing and offline runs
//! - `HttpClassifier`: Text-classification inference server over HTTP
//!
//! # Examples
//!
//! ```
//! use concord_nli::MockClassifier;
//! use concord_domain::traits::EntailmentClassifier;
//!
//! let oracle = MockClassifier::new("NEUTRAL", 0.61);
//! let result = oracle.classify("The sky is blue.", "Grass is green.").unwrap();
//! assert_eq!(result.label, "NEUTRAL");
//! ```

#![warn(missing_docs)]

pub mod http;
pub mod mock;

use thiserror::Error;

pub use http::{HttpClassifier, HttpClassifierConfig};
pub use mock::MockClassifier;

/// Errors that can occur during oracle calls
#[derive(Error, Debug)]
pub enum NliError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the classifier
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available at the endpoint
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// No response within the configured time
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("NLI error: {0}")]
    Other(String),
}
