//! Pair results and the final consistency report

use crate::{EntailmentVerdict, NumericComparison, Sentence, Verdict};

/// Marker phrase that downstream consumers use to trigger remediation
///
/// This text is a compatibility contract: a report that contains it has at
/// least one numeric or logical inconsistency.
pub const REMEDIATION_MARKER: &str = "Inconsistencies detected";

/// Verdict for one unordered sentence pair
///
/// `sentence_a.index < sentence_b.index` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct PairResult {
    /// Earlier sentence of the pair
    pub sentence_a: Sentence,
    /// Later sentence of the pair
    pub sentence_b: Sentence,
    /// Numeric mismatch evidence
    pub numeric: NumericComparison,
    /// Entailment evidence
    pub entailment: EntailmentVerdict,
    /// Combined verdict
    pub verdict: Verdict,
    /// Human-readable suggestion
    pub suggestion: String,
}

impl PairResult {
    /// Whether this pair belongs to the contradiction subset
    pub fn is_contradiction(&self) -> bool {
        self.verdict.is_contradiction()
    }

    /// Indices of the two sentences
    pub fn indices(&self) -> (usize, usize) {
        (self.sentence_a.index, self.sentence_b.index)
    }
}

/// Output of a full document analysis
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyReport {
    /// One result per unordered pair, in canonical combination order
    pub results: Vec<PairResult>,
    /// Rendered summary
    pub issues_report: String,
    /// Whether any contradiction was found
    pub has_issues: bool,
}

impl ConsistencyReport {
    /// All pairs counted as contradictions, in result order
    pub fn contradictions(&self) -> impl Iterator<Item = &PairResult> {
        self.results.iter().filter(|r| r.is_contradiction())
    }

    /// Contradictions caused by numeric mismatches
    pub fn numeric_issues(&self) -> impl Iterator<Item = &PairResult> {
        self.results
            .iter()
            .filter(|r| r.verdict == Verdict::NumericMismatch)
    }

    /// Contradictions reported by the entailment oracle
    pub fn logical_issues(&self) -> impl Iterator<Item = &PairResult> {
        self.results
            .iter()
            .filter(|r| r.verdict == Verdict::LogicalContradiction)
    }

    /// Pairs whose oracle call failed
    pub fn errors(&self) -> impl Iterator<Item = &PairResult> {
        self.results.iter().filter(|r| r.verdict == Verdict::Error)
    }

    /// Whether a downstream remediation step should run
    pub fn requires_remediation(&self) -> bool {
        self.issues_report.contains(REMEDIATION_MARKER)
    }
}
