//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;

/// Execute the config command.
pub fn execute_config(args: ConfigArgs, config: &Config) -> Result<()> {
    match args.action {
        ConfigAction::Show => print!("{}", config.to_toml()?),
        ConfigAction::Path => println!("{}", Config::path()?.display()),
    }
    Ok(())
}
