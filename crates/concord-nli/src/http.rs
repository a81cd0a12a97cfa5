//! HTTP inference-server oracle
//!
//! Talks to a text-classification endpoint serving an MNLI-style model
//! (for example a Hugging Face inference server hosting
//! `typeform/distilbert-base-uncased-mnli`).
//!
//! # Features
//!
//! - Blocking HTTP communication (the engine calls oracles synchronously)
//! - Configurable endpoint, model and bearer token
//! - Retry logic with exponential backoff for transient failures
//! - Per-request timeout
//!
//! # Examples
//!
//! ```no_run
//! use concord_nli::{HttpClassifier, HttpClassifierConfig};
//! use concord_domain::traits::EntailmentClassifier;
//!
//! let oracle = HttpClassifier::new(HttpClassifierConfig::default()).unwrap();
//! let result = oracle.classify("The budget is fixed.", "The budget may change.");
//! ```

use crate::NliError;
use concord_domain::traits::{combine_pair, EntailmentClassifier, RawClassification};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default inference endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/predict";

/// Default timeout for oracle requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay between retries (milliseconds)
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

/// Upper bound accepted for `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Connection settings for [`HttpClassifier`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClassifierConfig {
    /// Classification endpoint URL
    pub endpoint: String,

    /// Model name sent with each request (omitted when unset)
    pub model: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per request, including the first one
    pub max_retries: u32,

    /// Base backoff between attempts; doubles after each failure
    pub retry_backoff_ms: u64,

    /// Name of an environment variable holding a bearer token
    pub api_token_env: Option<String>,
}

impl Default for HttpClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            api_token_env: None,
        }
    }
}

impl HttpClassifierConfig {
    /// Get the request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.trim().is_empty() {
            return Err("endpoint must not be empty".to_string());
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!("endpoint '{}' must be an http(s) URL", self.endpoint));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 || self.max_retries > MAX_RETRIES_LIMIT {
            return Err(format!(
                "max_retries must be between 1 and {}",
                MAX_RETRIES_LIMIT
            ));
        }
        Ok(())
    }
}

/// Request body for text-classification endpoints
#[derive(Serialize)]
struct ClassificationRequest<'a> {
    inputs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

/// One label/score entry in a classification response
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Servers answer with a flat list, a batch of one list, or a single entry
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Single(LabelScore),
}

impl ClassificationResponse {
    /// Highest-scoring label
    fn best(self) -> Option<LabelScore> {
        let candidates = match self {
            ClassificationResponse::Nested(batches) => batches.into_iter().flatten().collect(),
            ClassificationResponse::Flat(entries) => entries,
            ClassificationResponse::Single(entry) => vec![entry],
        };
        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Parse a raw response body into the winning classification
fn parse_response(body: &str) -> Result<RawClassification, NliError> {
    let response: ClassificationResponse = serde_json::from_str(body)
        .map_err(|e| NliError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let best = response
        .best()
        .ok_or_else(|| NliError::InvalidResponse("Empty classification list".to_string()))?;

    Ok(RawClassification::new(best.label, best.score))
}

/// Entailment oracle backed by an HTTP inference server
pub struct HttpClassifier {
    config: HttpClassifierConfig,
    client: reqwest::blocking::Client,
    token: Option<String>,
}

impl HttpClassifier {
    /// Create a new HTTP classifier
    ///
    /// # Errors
    ///
    /// Returns [`NliError::Config`] if the configuration is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: HttpClassifierConfig) -> Result<Self, NliError> {
        config.validate().map_err(NliError::Config)?;

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| NliError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let token = config
            .api_token_env
            .as_deref()
            .and_then(|name| std::env::var(name).ok());

        Ok(Self {
            config,
            client,
            token,
        })
    }

    /// Endpoint this classifier talks to
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Send one request, without retries
    fn request_once(&self, inputs: &str) -> Result<RawClassification, NliError> {
        let body = ClassificationRequest {
            inputs: inputs.to_string(),
            model: self.config.model.as_deref(),
        };

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                NliError::Timeout(self.config.timeout_secs)
            } else {
                NliError::Communication(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(NliError::ModelNotAvailable(
                self.config
                    .model
                    .clone()
                    .unwrap_or_else(|| self.config.endpoint.clone()),
            ));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(NliError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NliError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let text = response
            .text()
            .map_err(|e| NliError::InvalidResponse(format!("Failed to read body: {}", e)))?;
        parse_response(&text)
    }
}

/// Whether a failed attempt is worth repeating
fn is_transient(error: &NliError) -> bool {
    matches!(
        error,
        NliError::Communication(_) | NliError::RateLimitExceeded
    )
}

impl EntailmentClassifier for HttpClassifier {
    type Error = NliError;

    fn classify(
        &self,
        sentence_a: &str,
        sentence_b: &str,
    ) -> Result<RawClassification, Self::Error> {
        let inputs = combine_pair(sentence_a, sentence_b);

        // Retry logic with exponential backoff
        let mut attempts = 0;
        loop {
            match self.request_once(&inputs) {
                Ok(classification) => {
                    debug!(
                        "Oracle answered {} ({:.3})",
                        classification.label, classification.confidence
                    );
                    return Ok(classification);
                }
                Err(e) => {
                    attempts += 1;
                    if !is_transient(&e) || attempts >= self.config.max_retries {
                        return Err(e);
                    }
                    warn!("Oracle attempt {} failed, retrying: {}", attempts, e);
                    let delay = backoff_delay(self.config.retry_backoff_ms, attempts);
                    std::thread::sleep(delay);
                }
            }
        }
    }
}

/// Delay before retry number `attempt` (1-based): base, 2x base, 4x base, ...
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(base_ms.saturating_mul(factor))
}
