//! Concord CLI - check documents for cross-section inconsistencies.

use clap::Parser;
use concord_cli::commands;
use concord_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

/// Exit code when the document has inconsistencies
const EXIT_ISSUES: i32 = 2;

fn main() {
    // Logs go to stderr so stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run() {
        Ok(true) => std::process::exit(EXIT_ISSUES),
        Ok(false) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether inconsistencies were found.
fn run() -> concord_cli::Result<bool> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Check(args) => commands::execute_check(args, &config, &formatter),
        Command::Config(args) => {
            commands::execute_config(args, &config)?;
            Ok(false)
        }
    }
}
