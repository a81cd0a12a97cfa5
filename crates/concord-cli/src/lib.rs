//! Concord CLI library.
//!
//! Configuration loading, oracle selection, command execution and output
//! formatting for the `concord` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod oracle;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use oracle::Oracle;
pub use output::Formatter;
