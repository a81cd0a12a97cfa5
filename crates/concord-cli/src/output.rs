//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use concord_domain::{ConsistencyReport, PairResult, Verdict};
use concord_engine::report::{
    ISSUES_HEADER, LOGICAL_SECTION_TITLE, NOT_ENOUGH_TEXT_MESSAGE, NUMERIC_SECTION_TITLE,
};
use concord_engine::ConsistencyPayload;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Widest sentence excerpt shown in a table cell
const EXCERPT_CHARS: usize = 48;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis report.
    pub fn format_report(&self, report: &ConsistencyReport) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.format_report_text(report)),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Json => self.format_report_json(report),
        }
    }

    /// The issues report, with section titles highlighted.
    fn format_report_text(&self, report: &ConsistencyReport) -> String {
        if !report.has_issues {
            let color = if report.issues_report == NOT_ENOUGH_TEXT_MESSAGE {
                "blue"
            } else {
                "green"
            };
            return self.colorize(&report.issues_report, color);
        }

        report
            .issues_report
            .lines()
            .map(|line| match line {
                ISSUES_HEADER => self.colorize(line, "red"),
                NUMERIC_SECTION_TITLE | LOGICAL_SECTION_TITLE => self.colorize(line, "yellow"),
                _ => line.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One row per pair, followed by the summary line.
    fn format_report_table(&self, report: &ConsistencyReport) -> String {
        if report.results.is_empty() {
            return self.colorize(&report.issues_report, "blue");
        }

        let mut builder = Builder::default();
        builder.push_record(["Pair", "Sentence A", "Sentence B", "Verdict", "Label", "Conf."]);

        for result in &report.results {
            builder.push_record([
                format!("{}-{}", result.sentence_a.index, result.sentence_b.index),
                excerpt(&result.sentence_a.text),
                excerpt(&result.sentence_b.text),
                self.verdict_cell(result),
                result.entailment.label.to_string(),
                format!("{:.3}", result.entailment.confidence),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", table, self.summary(report))
    }

    /// The consumer-facing JSON payload.
    fn format_report_json(&self, report: &ConsistencyReport) -> Result<String> {
        Ok(ConsistencyPayload::from(report).to_json_pretty()?)
    }

    /// One-line tally of the report.
    pub fn summary(&self, report: &ConsistencyReport) -> String {
        let numeric = report.numeric_issues().count();
        let logical = report.logical_issues().count();
        let errors = report.errors().count();
        let line = format!(
            "{} pairs checked: {} numeric, {} logical, {} oracle errors",
            report.results.len(),
            numeric,
            logical,
            errors
        );
        if report.has_issues {
            self.colorize(&line, "red")
        } else {
            self.colorize(&line, "green")
        }
    }

    fn verdict_cell(&self, result: &PairResult) -> String {
        let text = result.verdict.as_str();
        match result.verdict {
            Verdict::NumericMismatch | Verdict::LogicalContradiction => self.colorize(text, "red"),
            Verdict::Error => self.colorize(text, "yellow"),
            Verdict::Consistent => self.colorize(text, "green"),
            Verdict::Neutral => text.to_string(),
        }
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(EXCERPT_CHARS - 1).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_engine::{ConsistencyEngine, DomainLexicon, EngineConfig};
    use concord_nli::MockClassifier;

    fn analyze(text: &str) -> ConsistencyReport {
        ConsistencyEngine::new(
            MockClassifier::new("NEUTRAL", 0.5),
            DomainLexicon::seeds_only(),
            EngineConfig::default(),
        )
        .unwrap()
        .analyze(text)
    }

    #[test]
    fn test_text_format_is_issues_report() {
        let report = analyze("The budget is $5,000. The total budget is $6,000.");
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.format_report(&report).unwrap(), report.issues_report);
    }

    #[test]
    fn test_table_format() {
        let report = analyze("The budget is $5,000. The total budget is $6,000. All good.");
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("Verdict"));
        assert!(output.contains("NUMERIC_MISMATCH"));
        assert!(output.contains("0-2"));
        assert!(output.contains("3 pairs checked: 1 numeric, 0 logical, 0 oracle errors"));
    }

    #[test]
    fn test_table_for_short_document() {
        let report = analyze("Too short.");
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.format_report(&report).unwrap(), NOT_ENOUGH_TEXT_MESSAGE);
    }

    #[test]
    fn test_json_format() {
        let report = analyze("The budget is $5,000. The total budget is $6,000.");
        let formatter = Formatter::new(OutputFormat::Json, true);
        let output = formatter.format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["has_issues"], true);
        assert_eq!(value["consistency_results"][0]["verdict"], "NUMERIC_MISMATCH");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");
        let long = "x".repeat(100);
        assert_eq!(excerpt(&long).chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.warning("slow oracle"), "⚠ slow oracle");
    }
}
