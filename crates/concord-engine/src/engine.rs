//! Pairwise consistency engine

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::lexicon::DomainLexicon;
use crate::numeric::NumericMismatchDetector;
use crate::oracle::{self, EntailmentAdapter};
use crate::report;
use crate::segmenter::RuleSegmenter;
use concord_domain::traits::{EntailmentClassifier, LexicalDatabase, SentenceSegmenter};
use concord_domain::{
    ConsistencyReport, EntailmentVerdict, NumericComparison, PairResult, Sentence, Verdict,
};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

/// Suggestion for a logical contradiction
pub const CONTRADICTION_SUGGESTION: &str = "These statements express conflicting information.";

/// Suggestion for an entailed pair
pub const CONSISTENT_SUGGESTION: &str = "Statements are logically and numerically consistent.";

/// Suggestion for an unrelated pair
pub const NEUTRAL_SUGGESTION: &str =
    "No clear logical relation or numeric inconsistency detected.";

/// Suggestion when the oracle failed
pub const ERROR_SUGGESTION: &str = "Check input formatting or model initialization.";

/// The cross-section consistency engine
///
/// Segments a document, compares every unordered sentence pair numerically
/// and through the entailment oracle, and aggregates the verdicts into a
/// [`ConsistencyReport`].
///
/// # Examples
///
/// ```
/// use concord_engine::{ConsistencyEngine, DomainLexicon, EngineConfig};
/// use concord_nli::MockClassifier;
///
/// let engine = ConsistencyEngine::new(
///     MockClassifier::new("NEUTRAL", 0.6),
///     DomainLexicon::seeds_only(),
///     EngineConfig::default(),
/// )
/// .unwrap();
///
/// let report = engine.analyze("The budget is $5,000. The total budget is $6,000.");
/// assert!(report.has_issues);
/// assert!(report.requires_remediation());
/// ```
pub struct ConsistencyEngine<C, S = RuleSegmenter>
where
    C: EntailmentClassifier + ?Sized,
{
    classifier: Arc<C>,
    segmenter: S,
    lexicon: Arc<DomainLexicon>,
    config: EngineConfig,
}

impl<C> ConsistencyEngine<C, RuleSegmenter>
where
    C: EntailmentClassifier,
{
    /// Create an engine with the rule-based segmenter
    pub fn new(
        classifier: C,
        lexicon: DomainLexicon,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        Self::from_shared(Arc::new(classifier), Arc::new(lexicon), config)
    }

    /// Create an engine, expanding the domain lexicon through `database`
    pub fn from_database<L>(
        classifier: C,
        database: &L,
        config: EngineConfig,
    ) -> Result<Self, EngineError>
    where
        L: LexicalDatabase + ?Sized,
    {
        Self::new(classifier, DomainLexicon::expand(database), config)
    }
}

impl<C> ConsistencyEngine<C, RuleSegmenter>
where
    C: EntailmentClassifier + ?Sized,
{
    /// Create an engine over an already shared classifier and lexicon
    pub fn from_shared(
        classifier: Arc<C>,
        lexicon: Arc<DomainLexicon>,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;
        let segmenter =
            RuleSegmenter::new().with_abbreviations(config.extra_abbreviations.iter());
        Ok(Self {
            classifier,
            segmenter,
            lexicon,
            config,
        })
    }
}

impl<C, S> ConsistencyEngine<C, S>
where
    C: EntailmentClassifier + ?Sized,
{
    /// Replace the sentence segmenter
    pub fn with_segmenter<T>(self, segmenter: T) -> ConsistencyEngine<C, T>
    where
        T: SentenceSegmenter,
    {
        ConsistencyEngine {
            classifier: self.classifier,
            segmenter,
            lexicon: self.lexicon,
            config: self.config,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Expanded domain lexicon
    pub fn lexicon(&self) -> &DomainLexicon {
        &self.lexicon
    }
}

impl<C, S> ConsistencyEngine<C, S>
where
    C: EntailmentClassifier + ?Sized,
    C::Error: Display,
    S: SentenceSegmenter,
{
    /// Split `text` into indexed sentences
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        Sentence::sequence(self.segmenter.segment(text))
    }

    /// Analyze a document, one pair at a time
    pub fn analyze(&self, text: &str) -> ConsistencyReport {
        let span = info_span!("analysis", run_id = %Uuid::now_v7(), mode = "sequential");
        let _entered = span.enter();

        let sentences = self.segment(text);
        info!("Segmented document into {} sentences", sentences.len());
        self.analyze_sentences(&sentences)
    }

    /// Analyze pre-segmented sentences
    pub fn analyze_sentences(&self, sentences: &[Sentence]) -> ConsistencyReport {
        if sentences.len() < 2 {
            info!("Fewer than two sentences, nothing to compare");
            return report::not_enough_text();
        }
        self.warn_if_large(sentences.len());

        let results = pair_indices(sentences.len())
            .map(|(i, j)| self.evaluate_pair(&sentences[i], &sentences[j]))
            .collect();

        report::aggregate(results)
    }

    /// Evaluate a single sentence pair
    pub fn evaluate_pair(&self, sentence_a: &Sentence, sentence_b: &Sentence) -> PairResult {
        evaluate(
            &*self.classifier,
            &self.lexicon,
            self.config.oracle_timeout(),
            sentence_a.clone(),
            sentence_b.clone(),
        )
    }

    fn warn_if_large(&self, sentence_count: usize) {
        let pairs = pair_count(sentence_count);
        if pairs > self.config.pair_warning_threshold {
            warn!(
                "Document has {} sentences ({} pairs), above the warning threshold of {}",
                sentence_count, pairs, self.config.pair_warning_threshold
            );
        } else {
            debug!("Evaluating {} pairs", pairs);
        }
    }
}

impl<C, S> ConsistencyEngine<C, S>
where
    C: EntailmentClassifier + Send + Sync + ?Sized + 'static,
    C::Error: Display,
    S: SentenceSegmenter,
{
    /// Analyze a document with pairs evaluated on blocking worker tasks
    ///
    /// At most `max_concurrent_requests` oracle calls run at once. The
    /// results come back in the same order as [`analyze`](Self::analyze).
    pub async fn analyze_concurrent(&self, text: &str) -> Result<ConsistencyReport, EngineError> {
        let span = info_span!("analysis", run_id = %Uuid::now_v7(), mode = "concurrent");
        self.run_concurrent(text).instrument(span).await
    }

    async fn run_concurrent(&self, text: &str) -> Result<ConsistencyReport, EngineError> {
        let sentences = self.segment(text);
        info!("Segmented document into {} sentences", sentences.len());

        if sentences.len() < 2 {
            info!("Fewer than two sentences, nothing to compare");
            return Ok(report::not_enough_text());
        }
        self.warn_if_large(sentences.len());

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_requests));
        let timeout = self.config.oracle_timeout();
        let detector = NumericMismatchDetector::new(&self.lexicon);
        let mut pending = Vec::with_capacity(pair_count(sentences.len()));

        for (i, j) in pair_indices(sentences.len()) {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| EngineError::Worker(e.to_string()))?;
            let classifier = Arc::clone(&self.classifier);
            let sentence_a = sentences[i].clone();
            let sentence_b = sentences[j].clone();
            let numeric = detector.compare(&sentence_a.text, &sentence_b.text);
            let (text_a, text_b) = (sentence_a.text.clone(), sentence_b.text.clone());

            let worker = tokio::spawn(
                async move {
                    let _permit = permit;
                    let span = Span::current();
                    let call = tokio::task::spawn_blocking(move || {
                        let _entered = span.enter();
                        EntailmentAdapter::new(&*classifier)
                            .with_timeout(timeout)
                            .classify(&text_a, &text_b)
                    });
                    match tokio::time::timeout(timeout, call).await {
                        Ok(Ok(verdict)) => verdict,
                        Ok(Err(e)) => {
                            warn!("Oracle worker failed: {}", e);
                            EntailmentVerdict::failed(format!("Oracle worker failed: {}", e))
                        }
                        Err(_) => {
                            warn!("Abandoning oracle call after {}ms", timeout.as_millis());
                            oracle::timed_out(timeout)
                        }
                    }
                }
                .instrument(Span::current()),
            );
            pending.push((sentence_a, sentence_b, numeric, worker));
        }

        let mut results = Vec::with_capacity(pending.len());
        for (sentence_a, sentence_b, numeric, worker) in pending {
            let entailment = worker.await.unwrap_or_else(|e| {
                warn!("Pair task failed: {}", e);
                EntailmentVerdict::failed(format!("Oracle worker failed: {}", e))
            });
            results.push(assemble(sentence_a, sentence_b, numeric, entailment));
        }

        Ok(report::aggregate(results))
    }
}

fn evaluate<C>(
    classifier: &C,
    lexicon: &DomainLexicon,
    timeout: Duration,
    sentence_a: Sentence,
    sentence_b: Sentence,
) -> PairResult
where
    C: EntailmentClassifier + ?Sized,
    C::Error: Display,
{
    let numeric = NumericMismatchDetector::new(lexicon).compare(&sentence_a.text, &sentence_b.text);
    let entailment = EntailmentAdapter::new(classifier)
        .with_timeout(timeout)
        .classify(&sentence_a.text, &sentence_b.text);
    assemble(sentence_a, sentence_b, numeric, entailment)
}

fn assemble(
    sentence_a: Sentence,
    sentence_b: Sentence,
    numeric: NumericComparison,
    entailment: EntailmentVerdict,
) -> PairResult {
    let verdict = Verdict::classify(&numeric, &entailment);

    debug!(
        "Pair ({}, {}): {} [{} {}]",
        sentence_a.index, sentence_b.index, verdict, entailment.label, entailment.confidence
    );

    PairResult {
        suggestion: suggestion_for(verdict, &numeric),
        sentence_a,
        sentence_b,
        numeric,
        entailment,
        verdict,
    }
}

/// Human-readable suggestion for a verdict
pub fn suggestion_for(verdict: Verdict, numeric: &NumericComparison) -> String {
    match verdict {
        Verdict::NumericMismatch => format!("Inconsistency detected: {}", numeric.reason),
        Verdict::LogicalContradiction => CONTRADICTION_SUGGESTION.to_string(),
        Verdict::Consistent => CONSISTENT_SUGGESTION.to_string(),
        Verdict::Neutral => NEUTRAL_SUGGESTION.to_string(),
        Verdict::Error => ERROR_SUGGESTION.to_string(),
    }
}

/// Unordered index pairs of `n` sentences in combination order:
/// (0,1), (0,2), ..., (0,n-1), (1,2), ...
pub fn pair_indices(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Number of unordered pairs of `n` sentences
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
