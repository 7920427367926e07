//! Configuration file
//!
//! Optional JSON file; every key has a default:
//!
//! ```json
//! { "flush_threshold": 100, "validation": "every_row",
//!   "compare_header": false, "log_level": "info" }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::executor::{ExecutionOptions, DEFAULT_FLUSH_THRESHOLD};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::query::ValidationMode;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Buffered output lines per flush (default 100)
    #[serde(default = "default_flush_threshold")]
    pub flush_threshold: usize,

    /// Clause type checking: "every_row" (default) or "first_row"
    #[serde(default)]
    pub validation: ValidationMode,

    /// Write a header line to compare output (default false)
    #[serde(default)]
    pub compare_header: bool,

    /// Minimum log severity written to stderr (default "info")
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_flush_threshold() -> usize {
    DEFAULT_FLUSH_THRESHOLD
}

fn default_log_level() -> Severity {
    Severity::Info
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flush_threshold: default_flush_threshold(),
            validation: ValidationMode::default(),
            compare_header: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Loads `path` when given, else the defaults, and applies the log level.
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Logger::set_min_severity(config.log_level);

        if let Some(path) = path {
            let shown = path.display().to_string();
            log_event_with_fields(Event::ConfigLoaded, &[("path", shown.as_str())]);
        }
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.flush_threshold == 0 {
            return Err(CliError::config_error("flush_threshold must be > 0"));
        }
        Ok(())
    }

    /// Execution options for the query and compare scans
    pub fn execution_options(&self) -> ExecutionOptions {
        ExecutionOptions::default()
            .with_flush_threshold(self.flush_threshold)
            .with_validation(self.validation)
            .with_compare_header(self.compare_header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_partial_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datatool.json");
        fs::write(&path, r#"{"validation": "first_row", "log_level": "warn"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.flush_threshold, 100);
        assert_eq!(config.validation, ValidationMode::FirstRow);
        assert_eq!(config.log_level, Severity::Warn);
        assert!(!config.compare_header);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datatool.json");
        fs::write(&path, r#"{"flush_threshold": 0}"#).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "DATATOOL_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("datatool.json");
        fs::write(&path, r#"{"data_dir": "/tmp"}"#).unwrap();

        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        assert!(Config::load(&tmp.path().join("absent.json")).is_err());
    }

    #[test]
    fn test_execution_options() {
        let config = Config {
            flush_threshold: 7,
            compare_header: true,
            ..Config::default()
        };
        let options = config.execution_options();
        assert_eq!(options.flush_threshold, 7);
        assert!(options.compare_header);
    }
}
