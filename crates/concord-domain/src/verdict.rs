//! Per-pair evidence and verdicts

use crate::SemanticDomain;
use std::fmt;

/// Outcome of the numeric mismatch detector for one sentence pair
#[derive(Debug, Clone, PartialEq)]
pub struct NumericComparison {
    /// Whether the pair makes conflicting numeric claims in a shared domain
    pub mismatch: bool,
    /// Domain that triggered the mismatch (only set when `mismatch` is true)
    pub domain: Option<SemanticDomain>,
    /// Human-readable explanation
    pub reason: String,
}

impl NumericComparison {
    /// A non-mismatch with the given reason
    pub fn consistent(reason: impl Into<String>) -> Self {
        Self {
            mismatch: false,
            domain: None,
            reason: reason.into(),
        }
    }

    /// A mismatch in `domain`
    pub fn mismatch(domain: SemanticDomain, reason: impl Into<String>) -> Self {
        Self {
            mismatch: true,
            domain: Some(domain),
            reason: reason.into(),
        }
    }
}

/// Label reported by the entailment oracle, plus the local failure label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntailmentLabel {
    /// The second sentence follows from the first
    Entailment,
    /// The sentences conflict
    Contradiction,
    /// No clear relation
    Neutral,
    /// The oracle call failed
    Error,
}

impl EntailmentLabel {
    /// Uppercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            EntailmentLabel::Entailment => "ENTAILMENT",
            EntailmentLabel::Contradiction => "CONTRADICTION",
            EntailmentLabel::Neutral => "NEUTRAL",
            EntailmentLabel::Error => "ERROR",
        }
    }
}

impl fmt::Display for EntailmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The entailment oracle's judgement on a sentence pair
#[derive(Debug, Clone, PartialEq)]
pub struct EntailmentVerdict {
    /// Mapped label
    pub label: EntailmentLabel,
    /// Confidence in [0, 1], rounded to three decimals
    pub confidence: f64,
    /// Failure reason when `label` is [`EntailmentLabel::Error`]
    pub error: Option<String>,
}

impl EntailmentVerdict {
    /// A verdict from a mapped oracle label
    ///
    /// An [`EntailmentLabel::Error`] label always carries confidence 0.0.
    pub fn new(label: EntailmentLabel, confidence: f64) -> Self {
        let confidence = match label {
            EntailmentLabel::Error => 0.0,
            _ => confidence,
        };
        Self {
            label,
            confidence,
            error: None,
        }
    }

    /// The local fallback when the oracle fails. Confidence is always 0.0.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            label: EntailmentLabel::Error,
            confidence: 0.0,
            error: Some(reason.into()),
        }
    }

    /// Whether the oracle call failed
    pub fn is_error(&self) -> bool {
        self.label == EntailmentLabel::Error
    }
}

/// Final classification of one sentence pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Conflicting numbers in a shared domain
    NumericMismatch,
    /// The oracle reported a contradiction
    LogicalContradiction,
    /// The oracle reported entailment
    Consistent,
    /// No clear relation
    Neutral,
    /// The oracle call failed
    Error,
}

impl Verdict {
    /// Combine numeric and entailment evidence
    ///
    /// Numeric evidence always takes precedence over the entailment label.
    pub fn classify(numeric: &NumericComparison, entailment: &EntailmentVerdict) -> Self {
        if numeric.mismatch {
            return Verdict::NumericMismatch;
        }
        match entailment.label {
            EntailmentLabel::Contradiction => Verdict::LogicalContradiction,
            EntailmentLabel::Entailment => Verdict::Consistent,
            EntailmentLabel::Error => Verdict::Error,
            EntailmentLabel::Neutral => Verdict::Neutral,
        }
    }

    /// Whether the verdict counts towards the contradiction subset
    pub fn is_contradiction(&self) -> bool {
        matches!(self, Verdict::NumericMismatch | Verdict::LogicalContradiction)
    }

    /// Uppercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::NumericMismatch => "NUMERIC_MISMATCH",
            Verdict::LogicalContradiction => "LOGICAL_CONTRADICTION",
            Verdict::Consistent => "CONSISTENT",
            Verdict::Neutral => "NEUTRAL",
            Verdict::Error => "ERROR",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
