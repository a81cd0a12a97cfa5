//! Report aggregation
//!
//! Turns the ordered pair results into a [`ConsistencyReport`]. The rendered
//! text is deterministic: numeric issues first, then logical
//! contradictions, each in result order.

use concord_domain::{ConsistencyReport, PairResult, Verdict};
use tracing::info;

/// Issues report when no pair is a contradiction
pub const NO_ISSUES_MESSAGE: &str =
    "✅ No inconsistencies detected; the document aligns logically.";

/// Issues report for documents with fewer than two sentences
pub const NOT_ENOUGH_TEXT_MESSAGE: &str = "ℹ️ Not enough text to check.";

/// First line of a report with issues
pub const ISSUES_HEADER: &str = "⚠️ Inconsistencies detected:";

/// Title of the numeric section
pub const NUMERIC_SECTION_TITLE: &str = "🔢 Numeric Inconsistencies:";

/// Title of the logical section
pub const LOGICAL_SECTION_TITLE: &str = "❌ Logical Contradictions:";

/// Report for a document too short to pair up
pub fn not_enough_text() -> ConsistencyReport {
    ConsistencyReport {
        results: Vec::new(),
        issues_report: NOT_ENOUGH_TEXT_MESSAGE.to_string(),
        has_issues: false,
    }
}

/// Aggregate pair results into a report
pub fn aggregate(results: Vec<PairResult>) -> ConsistencyReport {
    let numeric: Vec<&PairResult> = results
        .iter()
        .filter(|r| r.verdict == Verdict::NumericMismatch)
        .collect();
    let logical: Vec<&PairResult> = results
        .iter()
        .filter(|r| r.verdict == Verdict::LogicalContradiction)
        .collect();

    info!(
        "Aggregated {} pairs: {} numeric issues, {} logical contradictions",
        results.len(),
        numeric.len(),
        logical.len()
    );

    if numeric.is_empty() && logical.is_empty() {
        return ConsistencyReport {
            results,
            issues_report: NO_ISSUES_MESSAGE.to_string(),
            has_issues: false,
        };
    }

    let mut lines = vec![ISSUES_HEADER.to_string()];

    if !numeric.is_empty() {
        lines.push(format!("\n{}", NUMERIC_SECTION_TITLE));
        for issue in &numeric {
            lines.push(render_issue(&issue.numeric.reason, issue));
        }
    }

    if !logical.is_empty() {
        lines.push(format!("\n{}", LOGICAL_SECTION_TITLE));
        for issue in &logical {
            lines.push(render_issue(&issue.suggestion, issue));
        }
    }

    ConsistencyReport {
        issues_report: lines.join("\n"),
        results,
        has_issues: true,
    }
}

fn render_issue(headline: &str, issue: &PairResult) -> String {
    format!(
        "- {}\n  \"{}\" vs.\n  \"{}\"",
        headline, issue.sentence_a.text, issue.sentence_b.text
    )
}
