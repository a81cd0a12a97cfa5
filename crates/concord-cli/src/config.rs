//! Configuration management for the CLI.
//!
//! ```toml
//! [engine]
//! oracle_timeout_secs = 30
//! max_concurrent_requests = 4
//!
//! [oracle]
//! endpoint = "http://localhost:8080/predict"
//!
//! [lexicon]
//! use_builtin = true
//! thesaurus_path = "/etc/concord/finance-terms.toml"
//! ```

use crate::error::{CliError, Result};
use concord_engine::EngineConfig;
use concord_lexicon::Thesaurus;
use concord_nli::HttpClassifierConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// Inference server settings
    #[serde(default)]
    pub oracle: HttpClassifierConfig,

    /// Synonym sources
    #[serde(default)]
    pub lexicon: LexiconSettings,

    /// Output settings
    #[serde(default)]
    pub settings: Settings,
}

/// Where domain synonyms come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconSettings {
    /// Use the embedded thesaurus
    #[serde(default = "default_true")]
    pub use_builtin: bool,

    /// Extra thesaurus file (JSON or TOML), merged over the embedded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thesaurus_path: Option<PathBuf>,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Issues report text
    Text,
    /// Per-pair table
    Table,
    /// JSON payload
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".concord").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it is missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize the configuration to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.engine
            .validate()
            .map_err(|e| CliError::Config(format!("[engine] {}", e)))?;
        self.oracle
            .validate()
            .map_err(|e| CliError::Config(format!("[oracle] {}", e)))?;
        Ok(())
    }

    /// Build the synonym table described by the `[lexicon]` section.
    ///
    /// An unreadable `thesaurus_path` is logged and skipped; the builtin
    /// table (or the seed keywords alone) still drives domain matching.
    pub fn thesaurus(&self) -> Thesaurus {
        let mut thesaurus = if self.lexicon.use_builtin {
            Thesaurus::builtin()
        } else {
            Thesaurus::new()
        };

        if let Some(path) = &self.lexicon.thesaurus_path {
            match Thesaurus::from_path(path) {
                Ok(extra) => {
                    info!("Loaded {} thesaurus entries from {}", extra.len(), path.display());
                    thesaurus.merge(extra);
                }
                Err(e) => warn!(
                    "Thesaurus {} unavailable, continuing without it: {}",
                    path.display(),
                    e
                ),
            }
        }

        thesaurus
    }
}

impl Default for LexiconSettings {
    fn default() -> Self {
        Self {
            use_builtin: true,
            thesaurus_path: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}
