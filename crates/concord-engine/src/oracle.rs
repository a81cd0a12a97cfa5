//! Entailment oracle adapter
//!
//! Wraps any [`EntailmentClassifier`] and turns its raw output into an
//! [`EntailmentVerdict`]. Classifier failures, slow calls and unusable
//! scores never escape: they become an `ERROR` verdict carrying the reason.

use concord_domain::traits::{EntailmentClassifier, RawClassification};
use concord_domain::{EntailmentLabel, EntailmentVerdict};
use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Adapter between the engine and an external classifier
pub struct EntailmentAdapter<'a, C: ?Sized> {
    classifier: &'a C,
    timeout: Option<Duration>,
}

impl<'a, C> EntailmentAdapter<'a, C>
where
    C: EntailmentClassifier + ?Sized,
    C::Error: Display,
{
    /// Create an adapter without a time limit
    pub fn new(classifier: &'a C) -> Self {
        Self {
            classifier,
            timeout: None,
        }
    }

    /// Downgrade calls slower than `timeout` to an error verdict
    ///
    /// The check runs once the call returns, so on its own it does not cut
    /// a hung call short. The sequential path relies on the classifier's
    /// transport timeout for that; the concurrent path also abandons the
    /// worker when the limit expires.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Classify one ordered sentence pair
    pub fn classify(&self, sentence_a: &str, sentence_b: &str) -> EntailmentVerdict {
        let started = Instant::now();
        let outcome = self.classifier.classify(sentence_a, sentence_b);
        let elapsed = started.elapsed();

        if let Some(limit) = self.timeout {
            if elapsed > limit {
                warn!(
                    "Entailment oracle exceeded {}ms (took {}ms)",
                    limit.as_millis(),
                    elapsed.as_millis()
                );
                return timed_out(limit);
            }
        }

        match outcome {
            Ok(raw) => verdict_from_raw(&raw),
            Err(e) => {
                warn!("Entailment oracle failed: {}", e);
                EntailmentVerdict::failed(e.to_string())
            }
        }
    }
}

/// Error verdict for an oracle call that outlived `limit`
pub(crate) fn timed_out(limit: Duration) -> EntailmentVerdict {
    EntailmentVerdict::failed(format!("Oracle timed out after {}ms", limit.as_millis()))
}

fn verdict_from_raw(raw: &RawClassification) -> EntailmentVerdict {
    let Some(confidence) = round_confidence(raw.confidence) else {
        warn!("Entailment oracle returned a non-finite score: {}", raw.confidence);
        return EntailmentVerdict::failed(format!(
            "Oracle returned a non-finite confidence: {}",
            raw.confidence
        ));
    };
    let label = map_label(&raw.label);
    debug!("Oracle label {} mapped to {} ({})", raw.label, label, confidence);
    EntailmentVerdict::new(label, confidence)
}

/// Map an oracle label onto the internal vocabulary
///
/// Matching is case-insensitive. Anything other than entailment or
/// contradiction is neutral.
pub fn map_label(label: &str) -> EntailmentLabel {
    match label.trim().to_ascii_uppercase().as_str() {
        "ENTAILMENT" => EntailmentLabel::Entailment,
        "CONTRADICTION" => EntailmentLabel::Contradiction,
        "NEUTRAL" => EntailmentLabel::Neutral,
        other => {
            warn!("Unknown oracle label '{}', treating as NEUTRAL", other);
            EntailmentLabel::Neutral
        }
    }
}

/// Round to three decimals and clamp into [0, 1]
///
/// Returns `None` for NaN and infinities.
pub fn round_confidence(confidence: f64) -> Option<f64> {
    if !confidence.is_finite() {
        return None;
    }
    let rounded = (confidence * 1000.0).round() / 1000.0;
    Some(rounded.clamp(0.0, 1.0))
}
