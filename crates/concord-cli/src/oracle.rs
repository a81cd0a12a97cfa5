//! Oracle selection for the CLI.

use crate::error::{CliError, Result};
use concord_domain::traits::{EntailmentClassifier, RawClassification};
use concord_nli::{HttpClassifier, HttpClassifierConfig, MockClassifier, NliError};
use tracing::info;

/// Labels accepted by `--mock-oracle`
pub const MOCK_LABELS: &[&str] = &["ENTAILMENT", "CONTRADICTION", "NEUTRAL"];

/// The entailment oracle chosen at startup
pub enum Oracle {
    /// Fixed answers, no network
    Mock(MockClassifier),
    /// Inference server
    Http(HttpClassifier),
}

impl Oracle {
    /// A mock answering every pair with `label`
    pub fn mock(label: &str) -> Result<Self> {
        let label = label.trim().to_uppercase();
        if !MOCK_LABELS.contains(&label.as_str()) {
            return Err(CliError::InvalidInput(format!(
                "Unknown mock label '{}', expected one of {}",
                label,
                MOCK_LABELS.join(", ")
            )));
        }
        info!("Using mock oracle answering {}", label);
        Ok(Oracle::Mock(MockClassifier::new(label, 1.0)))
    }

    /// A client for the configured inference server
    pub fn http(config: HttpClassifierConfig) -> Result<Self> {
        info!("Using inference server at {}", config.endpoint);
        Ok(Oracle::Http(HttpClassifier::new(config)?))
    }

    /// Pick the mock when a label is given, the inference server otherwise
    pub fn select(mock_label: Option<&str>, config: &HttpClassifierConfig) -> Result<Self> {
        match mock_label {
            Some(label) => Self::mock(label),
            None => Self::http(config.clone()),
        }
    }
}

impl EntailmentClassifier for Oracle {
    type Error = NliError;

    fn classify(
        &self,
        sentence_a: &str,
        sentence_b: &str,
    ) -> std::result::Result<RawClassification, Self::Error> {
        match self {
            Oracle::Mock(mock) => mock.classify(sentence_a, sentence_b),
            Oracle::Http(http) => http.classify(sentence_a, sentence_b),
        }
    }
}
