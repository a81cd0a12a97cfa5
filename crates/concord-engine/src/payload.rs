//! Consumer-facing serialization of a [`ConsistencyReport`]
//!
//! Flattens every pair into plain scalars and strings so the report can be
//! handed to web layers and scripts as JSON. `issues_report` is copied
//! verbatim, so the remediation marker survives serialization.

use crate::error::EngineError;
use concord_domain::{ConsistencyReport, NumericComparison, PairResult};
use serde::{Deserialize, Serialize};

/// Serialized form of a full analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyPayload {
    /// One record per pair, in combination order
    pub consistency_results: Vec<PairRecord>,
    /// Rendered summary, verbatim
    pub issues_report: String,
    /// Whether any contradiction was found
    pub has_issues: bool,
}

/// Serialized form of one pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    /// Earlier sentence
    pub sentence1: String,
    /// Later sentence
    pub sentence2: String,
    /// Document index of `sentence1`
    pub sentence1_index: usize,
    /// Document index of `sentence2`
    pub sentence2_index: usize,
    /// Verdict wire name, e.g. `NUMERIC_MISMATCH`
    pub verdict: String,
    /// Entailment label, e.g. `CONTRADICTION`
    pub label: String,
    /// Entailment confidence, 0.0 on oracle failure
    pub confidence: f64,
    /// Human-readable suggestion
    pub suggestion: String,
    /// Numeric evidence
    pub numeric_analysis: NumericRecord,
    /// Oracle failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Serialized numeric comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRecord {
    /// Whether the numbers conflict
    pub mismatch: bool,
    /// Lowercase domain name of the mismatch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Explanation
    pub reason: String,
}

impl From<&NumericComparison> for NumericRecord {
    fn from(numeric: &NumericComparison) -> Self {
        Self {
            mismatch: numeric.mismatch,
            domain: numeric.domain.map(|d| d.name().to_string()),
            reason: numeric.reason.clone(),
        }
    }
}

impl From<&PairResult> for PairRecord {
    fn from(result: &PairResult) -> Self {
        Self {
            sentence1: result.sentence_a.text.clone(),
            sentence2: result.sentence_b.text.clone(),
            sentence1_index: result.sentence_a.index,
            sentence2_index: result.sentence_b.index,
            verdict: result.verdict.as_str().to_string(),
            label: result.entailment.label.as_str().to_string(),
            confidence: result.entailment.confidence,
            suggestion: result.suggestion.clone(),
            numeric_analysis: NumericRecord::from(&result.numeric),
            error: result.entailment.error.clone(),
        }
    }
}

impl From<&ConsistencyReport> for ConsistencyPayload {
    fn from(report: &ConsistencyReport) -> Self {
        Self {
            consistency_results: report.results.iter().map(PairRecord::from).collect(),
            issues_report: report.issues_report.clone(),
            has_issues: report.has_issues,
        }
    }
}

impl ConsistencyPayload {
    /// Compact JSON
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON
    pub fn to_json_pretty(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report;
    use concord_domain::{
        EntailmentVerdict, SemanticDomain, Sentence, Verdict, REMEDIATION_MARKER,
    };

    fn mismatch_result() -> PairResult {
        let numeric = NumericComparison::mismatch(
            SemanticDomain::Financial,
            "Numeric mismatch in financial context: {5000.0} vs {6000.0}",
        );
        PairResult {
            sentence_a: Sentence::new(0, "The budget is $5,000.").unwrap(),
            sentence_b: Sentence::new(1, "The total budget is $6,000.").unwrap(),
            suggestion: format!("Inconsistency detected: {}", numeric.reason),
            numeric,
            entailment: EntailmentVerdict::failed("Mock error"),
            verdict: Verdict::NumericMismatch,
        }
    }

    #[test]
    fn test_payload_fields() {
        let report = report::aggregate(vec![mismatch_result()]);
        let payload = ConsistencyPayload::from(&report);

        assert!(payload.has_issues);
        assert!(payload.issues_report.contains(REMEDIATION_MARKER));
        let record = &payload.consistency_results[0];
        assert_eq!(record.sentence1, "The budget is $5,000.");
        assert_eq!(record.sentence2_index, 1);
        assert_eq!(record.verdict, "NUMERIC_MISMATCH");
        assert_eq!(record.label, "ERROR");
        assert_eq!(record.confidence, 0.0);
        assert_eq!(record.numeric_analysis.domain.as_deref(), Some("financial"));
        assert_eq!(record.error.as_deref(), Some("Mock error"));
    }

    #[test]
    fn test_json_shape() {
        let report = report::aggregate(vec![mismatch_result()]);
        let json = ConsistencyPayload::from(&report).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["consistency_results"].is_array());
        assert_eq!(value["consistency_results"][0]["numeric_analysis"]["mismatch"], true);
        assert_eq!(value["issues_report"], report.issues_report.as_str());
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let payload = ConsistencyPayload::from(&report::not_enough_text());
        let json = payload.to_json_pretty().unwrap();
        assert!(json.contains("\"consistency_results\": []"));
        assert!(!json.contains("\"error\""));

        let back: ConsistencyPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
