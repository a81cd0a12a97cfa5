//! Integration tests for concurrent analysis
//!
//! These tests verify that worker-based pair evaluation matches the
//! sequential path and respects the configured limits.

use concord_domain::traits::{EntailmentClassifier, RawClassification};
use concord_domain::{EntailmentLabel, Verdict};
use concord_engine::{ConsistencyEngine, DomainLexicon, EngineConfig};
use concord_lexicon::Thesaurus;
use concord_nli::{MockClassifier, NliError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

const DOCUMENT: &str = "The budget is $5,000. The total budget is $6,000. \
                        The launch is planned for spring. The launch was cancelled. \
                        Uptime reached 99% this year.";

/// Tracks the highest number of overlapping calls
#[derive(Default)]
struct OverlapTracker {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl EntailmentClassifier for OverlapTracker {
    type Error = NliError;

    fn classify(&self, _a: &str, _b: &str) -> Result<RawClassification, Self::Error> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(RawClassification::new("NEUTRAL", 0.5))
    }
}

/// Panics whenever the first sentence starts with "Beta"
struct CrashesOnBeta;

impl EntailmentClassifier for CrashesOnBeta {
    type Error = NliError;

    fn classify(&self, a: &str, _b: &str) -> Result<RawClassification, Self::Error> {
        if a.starts_with("Beta") {
            panic!("model crashed");
        }
        Ok(RawClassification::new("NEUTRAL", 0.5))
    }
}

fn scripted_oracle() -> MockClassifier {
    let mut oracle = MockClassifier::new("NEUTRAL", 0.61);
    oracle.add_response(
        "The launch is planned for spring.",
        "The launch was cancelled.",
        "CONTRADICTION",
        0.944,
    );
    oracle.add_error("The total budget is $6,000.", "Uptime reached 99% this year.");
    oracle
}

#[tokio::test]
async fn test_concurrent_matches_sequential() {
    let oracle = scripted_oracle();
    let engine = ConsistencyEngine::from_database(
        oracle.clone().with_delay(Duration::from_millis(5)),
        &Thesaurus::builtin(),
        EngineConfig::default(),
    )
    .unwrap();

    let sequential = engine.analyze(DOCUMENT);
    let concurrent = engine.analyze_concurrent(DOCUMENT).await.unwrap();

    assert_eq!(sequential.results.len(), 10);
    assert_eq!(concurrent, sequential);
    assert_eq!(oracle.call_count(), 20);

    assert_eq!(concurrent.numeric_issues().count(), 1);
    assert_eq!(concurrent.logical_issues().count(), 1);
    assert_eq!(concurrent.errors().count(), 1);
    assert!(concurrent.requires_remediation());
}

#[tokio::test]
async fn test_concurrency_limit_is_respected() {
    let tracker = Arc::new(OverlapTracker::default());
    let config = EngineConfig {
        max_concurrent_requests: 2,
        ..EngineConfig::default()
    };
    let engine = ConsistencyEngine::from_shared(
        Arc::clone(&tracker),
        Arc::new(DomainLexicon::seeds_only()),
        config,
    )
    .unwrap();

    let report = engine.analyze_concurrent(DOCUMENT).await.unwrap();

    assert_eq!(report.results.len(), 10);
    let peak = tracker.peak.load(Ordering::SeqCst);
    assert!((1..=2).contains(&peak), "peak concurrency was {}", peak);
}

#[tokio::test]
async fn test_short_document_skips_workers() {
    let oracle = MockClassifier::default();
    let engine = ConsistencyEngine::new(
        oracle.clone(),
        DomainLexicon::seeds_only(),
        EngineConfig::default(),
    )
    .unwrap();

    let report = engine.analyze_concurrent("Just one sentence.").await.unwrap();
    assert!(report.results.is_empty());
    assert!(!report.has_issues);
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn test_slow_oracle_is_cut_off_at_timeout() {
    let config = EngineConfig {
        oracle_timeout_secs: 1,
        ..EngineConfig::default()
    };
    let engine = ConsistencyEngine::new(
        MockClassifier::new("CONTRADICTION", 0.9).with_delay(Duration::from_secs(3)),
        DomainLexicon::seeds_only(),
        config,
    )
    .unwrap();

    let started = Instant::now();
    let report = engine
        .analyze_concurrent("The sky is blue. The sky is green.")
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_millis(2_500), "took {:?}", elapsed);
    let pair = &report.results[0];
    assert_eq!(pair.entailment.label, EntailmentLabel::Error);
    assert_eq!(pair.entailment.confidence, 0.0);
    assert_eq!(pair.verdict, Verdict::Error);
    assert!(pair.entailment.error.as_deref().unwrap_or_default().contains("timed out"));
    assert!(!report.has_issues);
}

#[tokio::test]
async fn test_panicking_oracle_fails_only_its_pair() {
    let engine = ConsistencyEngine::new(
        CrashesOnBeta,
        DomainLexicon::expand(&Thesaurus::builtin()),
        EngineConfig::default(),
    )
    .unwrap();

    let report = engine
        .analyze_concurrent(
            "Alpha budget is $5,000. Beta budget is $6,000. Gamma budget is $6,000.",
        )
        .await
        .unwrap();

    assert_eq!(report.results.len(), 3);
    let crashed = &report.results[2];
    assert_eq!(crashed.sentence_a.index, 1);
    assert_eq!(crashed.sentence_b.index, 2);
    assert_eq!(crashed.entailment.label, EntailmentLabel::Error);
    assert_eq!(crashed.verdict, Verdict::Error);
    assert!(!crashed.numeric.mismatch);

    assert_eq!(report.results[0].verdict, Verdict::NumericMismatch);
    assert_eq!(report.results[1].verdict, Verdict::NumericMismatch);
    assert_eq!(report.errors().count(), 1);
    assert!(report.requires_remediation());
}

#[tokio::test]
async fn test_failing_oracle_never_aborts() {
    let engine = ConsistencyEngine::new(
        MockClassifier::always_failing(),
        DomainLexicon::seeds_only(),
        EngineConfig::fast(),
    )
    .unwrap();

    let report = engine.analyze_concurrent(DOCUMENT).await.unwrap();
    assert_eq!(report.results.len(), 10);
    assert!(report
        .results
        .iter()
        .all(|r| r.entailment.is_error() && r.entailment.confidence == 0.0));
    assert_eq!(report.logical_issues().count(), 0);
}
