//! Configuration management for the screening codec.
//!
//! Configuration lives in the shared file at `~/.codecoder/config.json`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables (ZERO_* prefix), applied by `load_with_env`
//! 2. Explicit config file values
//! 3. Default values
//!
//! # Environment Variable Mapping
//!
//! ## Observability
//! - `ZERO_LOG_LEVEL` → observability.log_level
//! - `ZERO_LOG_FORMAT` → observability.log_format
//!
//! ## Finviz codec
//! - `ZERO_FINVIZ_VIEW` → finviz.view
//! - `ZERO_FINVIZ_MAX_RESULTS` → finviz.max_results_cap
//! - `ZERO_FINVIZ_PRECISION` → finviz.precision_policy (`reject` | `round`)
//! - `ZERO_FINVIZ_UNKNOWN_COLUMNS` → finviz.unknown_columns (`reject` | `passthrough`)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Get the configuration directory path.
pub fn config_dir() -> PathBuf {
    directories::UserDirs::new()
        .map_or_else(
            || PathBuf::from(".codecoder"),
            |dirs| dirs.home_dir().join(".codecoder"),
        )
}

/// Get the configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// JSON schema reference (ignored)
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Screening codec configuration
    #[serde(default)]
    pub finviz: FinvizConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            tracing::info!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load configuration with environment variable overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Values that fail to parse are ignored and the file value is kept.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("ZERO_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("ZERO_LOG_FORMAT") {
            self.observability.log_format = format;
        }

        if let Some(view) = lookup("ZERO_FINVIZ_VIEW") {
            self.finviz.view = view;
        }
        if let Some(cap) = lookup("ZERO_FINVIZ_MAX_RESULTS") {
            if let Ok(c) = cap.parse() {
                self.finviz.max_results_cap = c;
            }
        }
        if let Some(policy) = lookup("ZERO_FINVIZ_PRECISION") {
            if let Ok(p) = policy.parse() {
                self.finviz.precision_policy = p;
            }
        }
        if let Some(policy) = lookup("ZERO_FINVIZ_UNKNOWN_COLUMNS") {
            if let Ok(p) = policy.parse() {
                self.finviz.unknown_columns = p;
            }
        }
    }
}

// ============================================================================
// Observability Configuration
// ============================================================================

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level", alias = "level")]
    pub log_level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format", alias = "format")]
    pub log_format: String,

    /// Additional module targets pinned to `warn`.
    #[serde(default)]
    pub excluded_targets: Vec<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            excluded_targets: Vec::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Finviz Codec Configuration
// ============================================================================

/// Export views accepted by the screener CSV endpoint.
pub const EXPORT_VIEWS: &[&str] = &["111", "121", "131", "141", "151", "161", "171"];

/// Screening codec configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinvizConfig {
    /// Screener view code sent as `v` (151 = custom columns)
    #[serde(default = "default_view")]
    pub view: String,

    /// Upper bound for a request's result limit (`ar`)
    #[serde(default = "default_max_results_cap")]
    pub max_results_cap: u32,

    /// What to do with range bounds finer than a field's precision
    #[serde(default)]
    pub precision_policy: PrecisionPolicy,

    /// What to do with CSV headers the response schema does not know
    #[serde(default)]
    pub unknown_columns: UnknownColumnPolicy,

    /// Row count from which decoding fans out across threads
    #[serde(default = "default_parallel_decode_threshold")]
    pub parallel_decode_threshold: usize,
}

impl Default for FinvizConfig {
    fn default() -> Self {
        Self {
            view: default_view(),
            max_results_cap: default_max_results_cap(),
            precision_policy: PrecisionPolicy::default(),
            unknown_columns: UnknownColumnPolicy::default(),
            parallel_decode_threshold: default_parallel_decode_threshold(),
        }
    }
}

fn default_view() -> String {
    "151".into()
}

fn default_max_results_cap() -> u32 {
    1000
}

fn default_parallel_decode_threshold() -> usize {
    2000
}

/// Handling of numeric bounds carrying more decimals than a field allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionPolicy {
    /// Fail validation with an excess-precision error
    #[default]
    Reject,
    /// Round half away from zero to the allowed precision
    Round,
}

impl FromStr for PrecisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "round" => Ok(Self::Round),
            other => Err(format!("unknown precision policy: {other}")),
        }
    }
}

/// Handling of CSV headers without a decode rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownColumnPolicy {
    /// Abort decoding with an unrecognized-column error
    #[default]
    Reject,
    /// Decode the column as a plain string
    Passthrough,
}

impl FromStr for UnknownColumnPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "passthrough" => Ok(Self::Passthrough),
            other => Err(format!("unknown column policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, "pretty");
        assert_eq!(config.finviz.view, "151");
        assert_eq!(config.finviz.max_results_cap, 1000);
        assert_eq!(config.finviz.precision_policy, PrecisionPolicy::Reject);
        assert_eq!(config.finviz.unknown_columns, UnknownColumnPolicy::Reject);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"finviz": {{"precision_policy": "round", "max_results_cap": 250}}}}"#
        )
        .unwrap();

        let config = Config::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.finviz.precision_policy, PrecisionPolicy::Round);
        assert_eq!(config.finviz.max_results_cap, 250);
        assert_eq!(config.finviz.view, "151");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ZERO_LOG_LEVEL", "debug"),
            ("ZERO_FINVIZ_VIEW", "111"),
            ("ZERO_FINVIZ_MAX_RESULTS", "not-a-number"),
            ("ZERO_FINVIZ_UNKNOWN_COLUMNS", "Passthrough"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.finviz.view, "111");
        assert_eq!(config.finviz.max_results_cap, 1000);
        assert_eq!(config.finviz.unknown_columns, UnknownColumnPolicy::Passthrough);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = Config::default();
        config.finviz.precision_policy = PrecisionPolicy::Round;
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"round\""));
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.finviz.precision_policy, PrecisionPolicy::Round);
    }
}
