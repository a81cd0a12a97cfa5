//! Configuration for the consistency engine

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the consistency engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Oracle calls slower than this (seconds) become `ERROR` verdicts
    pub oracle_timeout_secs: u64,

    /// Upper bound on simultaneous oracle calls in concurrent analysis
    pub max_concurrent_requests: usize,

    /// Log a warning when a document produces more pairs than this
    pub pair_warning_threshold: usize,

    /// Abbreviations the segmenter should never split after, without the
    /// trailing period (e.g. "approx", "dept")
    pub extra_abbreviations: Vec<String>,
}

impl EngineConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.oracle_timeout_secs == 0 {
            return Err("oracle_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrent_requests == 0 {
            return Err("max_concurrent_requests must be greater than 0".to_string());
        }
        if self.pair_warning_threshold == 0 {
            return Err("pair_warning_threshold must be greater than 0".to_string());
        }
        if let Some(bad) = self
            .extra_abbreviations
            .iter()
            .find(|a| a.trim().is_empty() || a.chars().any(char::is_whitespace))
        {
            return Err(format!("invalid abbreviation '{}'", bad));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            oracle_timeout_secs: 30,
            max_concurrent_requests: 4,
            pair_warning_threshold: 5_000,
            extra_abbreviations: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Fast preset: short oracle timeout, wide fan-out
    pub fn fast() -> Self {
        Self {
            oracle_timeout_secs: 10,
            max_concurrent_requests: 8,
            pair_warning_threshold: 2_000,
            extra_abbreviations: Vec::new(),
        }
    }

    /// Thorough preset: patient oracle, gentle on the inference server
    pub fn thorough() -> Self {
        Self {
            oracle_timeout_secs: 120,
            max_concurrent_requests: 2,
            pair_warning_threshold: 50_000,
            extra_abbreviations: Vec::new(),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
