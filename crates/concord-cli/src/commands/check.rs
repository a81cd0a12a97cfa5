//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::oracle::Oracle;
use crate::output::Formatter;
use concord_domain::ConsistencyReport;
use concord_engine::ConsistencyEngine;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::info;

/// Execute the check command.
///
/// Prints the formatted report and returns whether issues were found.
pub fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<bool> {
    let text = read_document(args.file.as_deref())?;
    let report = analyze(&text, &args, config)?;

    let failed = report.errors().count();
    if failed > 0 {
        eprintln!(
            "{}",
            formatter.warning(&format!("{} pair(s) could not be classified by the oracle", failed))
        );
    }

    println!("{}", formatter.format_report(&report)?);
    Ok(report.has_issues)
}

/// Run the analysis described by `args` and `config`.
pub fn analyze(text: &str, args: &CheckArgs, config: &Config) -> Result<ConsistencyReport> {
    let mut engine_config = config.engine.clone();
    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 {
            return Err(CliError::InvalidInput(
                "Concurrency must be at least 1".to_string(),
            ));
        }
        engine_config.max_concurrent_requests = concurrency;
    }

    let oracle = Oracle::select(args.mock_oracle.as_deref(), &config.oracle)?;
    let thesaurus = config.thesaurus();
    let engine = ConsistencyEngine::from_database(oracle, &thesaurus, engine_config)?;

    match args.concurrency {
        Some(workers) if workers > 1 => {
            info!("Running concurrent analysis with {} workers", workers);
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let report = runtime.block_on(engine.analyze_concurrent(text));
            // Oracle calls abandoned after a timeout must not hold up exit
            runtime.shutdown_background();
            Ok(report?)
        }
        _ => Ok(engine.analyze(text)),
    }
}

/// Read the document from `path`, or stdin for `None` and `-`.
fn read_document(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mock_args(label: &str, concurrency: Option<usize>) -> CheckArgs {
        CheckArgs {
            file: None,
            mock_oracle: Some(label.to_string()),
            concurrency,
        }
    }

    #[test]
    fn test_sequential_and_concurrent_agree() {
        let text = "The budget is $5,000. The total budget is $6,000. The launch slipped.";
        let config = Config::default();

        let sequential = analyze(text, &mock_args("NEUTRAL", None), &config).unwrap();
        let concurrent = analyze(text, &mock_args("NEUTRAL", Some(3)), &config).unwrap();

        assert_eq!(sequential, concurrent);
        assert!(sequential.has_issues);
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let result = analyze("A. B.", &mock_args("NEUTRAL", Some(0)), &Config::default());
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_mock_contradiction() {
        let report = analyze(
            "The sky is blue. The sky is green.",
            &mock_args("contradiction", None),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(report.logical_issues().count(), 1);
    }

    #[test]
    fn test_unreadable_thesaurus_does_not_abort() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.lexicon.thesaurus_path = Some(dir.path().join("terms.json"));

        let report = analyze(
            "The budget is $5,000. The total budget is $6,000.",
            &mock_args("NEUTRAL", None),
            &config,
        )
        .unwrap();
        assert_eq!(report.numeric_issues().count(), 1);
    }

    #[test]
    fn test_read_document_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "First. Second.").unwrap();
        assert_eq!(read_document(Some(&path)).unwrap(), "First. Second.");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_document(Some(&dir.path().join("missing.txt")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
