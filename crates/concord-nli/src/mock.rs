//! Mock oracle for deterministic testing

use crate::NliError;
use concord_domain::traits::{EntailmentClassifier, RawClassification};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum MockResponse {
    Label(RawClassification),
    Fail,
}

/// Mock entailment oracle
///
/// Returns pre-configured classifications without any model or network.
/// Clones share their response table and call counter.
///
/// # Examples
///
/// ```
/// use concord_nli::MockClassifier;
/// use concord_domain::traits::EntailmentClassifier;
///
/// let mut oracle = MockClassifier::default();
/// oracle.add_response("A.", "B.", "CONTRADICTION", 0.93);
/// oracle.add_error("A.", "C.");
///
/// assert_eq!(oracle.classify("A.", "B.").unwrap().label, "CONTRADICTION");
/// assert!(oracle.classify("A.", "C.").is_err());
/// assert_eq!(oracle.classify("B.", "C.").unwrap().label, "NEUTRAL");
/// ```
#[derive(Debug, Clone)]
pub struct MockClassifier {
    default_response: MockResponse,
    responses: Arc<Mutex<HashMap<(String, String), MockResponse>>>,
    call_count: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl MockClassifier {
    /// Create a mock that answers every pair with `label` and `confidence`
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            default_response: MockResponse::Label(RawClassification::new(label, confidence)),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    /// Create a mock whose every call fails
    pub fn always_failing() -> Self {
        Self {
            default_response: MockResponse::Fail,
            ..Self::default()
        }
    }

    /// Sleep for `delay` before answering each call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer a specific ordered pair with `label` and `confidence`
    pub fn add_response(
        &mut self,
        sentence_a: impl Into<String>,
        sentence_b: impl Into<String>,
        label: impl Into<String>,
        confidence: f64,
    ) {
        self.table().insert(
            (sentence_a.into(), sentence_b.into()),
            MockResponse::Label(RawClassification::new(label, confidence)),
        );
    }

    /// Fail on a specific ordered pair
    pub fn add_error(&mut self, sentence_a: impl Into<String>, sentence_b: impl Into<String>) {
        self.table()
            .insert((sentence_a.into(), sentence_b.into()), MockResponse::Fail);
    }

    /// Number of times `classify` was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    fn table(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), MockResponse>> {
        // A poisoned table is still a valid table
        self.responses.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new("NEUTRAL", 0.5)
    }
}

impl EntailmentClassifier for MockClassifier {
    type Error = NliError;

    fn classify(
        &self,
        sentence_a: &str,
        sentence_b: &str,
    ) -> Result<RawClassification, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let response = self
            .table()
            .get(&(sentence_a.to_string(), sentence_b.to_string()))
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());

        match response {
            MockResponse::Label(classification) => Ok(classification),
            MockResponse::Fail => Err(NliError::Other("Mock error".to_string())),
        }
    }
}
