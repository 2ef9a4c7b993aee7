//! Configuration loading.
//!
//! Binaries load one TOML file through [`ConfigLoader`]; the `[shared]`
//! table ([`SharedConfig`]) carries what every binary reads the same way.
//!
//! # Usage
//!
//! ```rust,no_run
//! use chrono_common::config::{ConfigLoader, SharedConfig, ConfigError};
//! use serde::Deserialize;
//! use std::path::Path;
//!
//! #[derive(Debug, Deserialize)]
//! struct MonitorConfig {
//!     shared: SharedConfig,
//!     interval_ms: u64,
//! }
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = MonitorConfig::load(Path::new("/etc/ubloxchrono/monitor.toml"))?;
//!     config.shared.validate()?;
//!     println!("{} every {} ms", config.shared.service_name, config.interval_ms);
//!     Ok(())
//! }
//! ```

use crate::consts::SNAPSHOT_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a configuration could not be used.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Unreadable file or invalid TOML.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Parsed, but the values make no sense.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// `log_level` values accepted in `[shared]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-sample tracing.
    Trace,
    /// Sector and lap events.
    Debug,
    /// Lifecycle messages.
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Equivalent `tracing` level.
    pub const fn as_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

fn default_service_name() -> String {
    SNAPSHOT_NAME.to_string()
}

/// The `[shared]` table.
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "ubloxchrono"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedConfig {
    #[serde(default)]
    pub log_level: LogLevel,

    /// Name used in log lines; defaults to the snapshot name.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            service_name: default_service_name(),
        }
    }
}

impl SharedConfig {
    /// `service_name` must be a non-empty single word.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        if self.service_name.chars().any(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "service_name {:?} contains whitespace",
                self.service_name
            )));
        }
        Ok(())
    }
}

/// Load any deserializable config type from TOML.
///
/// A missing file is [`ConfigError::FileNotFound`]; unreadable files and
/// syntax or type errors are [`ConfigError::ParseError`]. Semantic checks
/// belong to the concrete type.
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
            _ => ConfigError::ParseError(format!("{}: {e}", path.display())),
        })?;

        Self::from_toml(&content)
    }

    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[derive(Debug, Deserialize)]
    struct SharedOnly {
        #[serde(default)]
        shared: SharedConfig,
    }

    #[test]
    fn test_shared_table_defaults_to_snapshot_name() {
        let config = SharedOnly::from_toml("").unwrap();
        assert_eq!(config.shared.service_name, SNAPSHOT_NAME);
        assert_eq!(config.shared.log_level, LogLevel::Info);
        config.shared.validate().unwrap();
    }

    #[test]
    fn test_log_level_maps_to_tracing() {
        let config = SharedOnly::from_toml("[shared]\nlog_level = \"trace\"\n").unwrap();
        assert_eq!(config.shared.log_level.as_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Warn.as_tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_unknown_log_level_is_parse_error() {
        let result = SharedOnly::from_toml("[shared]\nlog_level = \"verbose\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_service_name_must_be_one_word() {
        let mut shared = SharedConfig::default();
        shared.service_name = "lap timer".to_string();
        assert!(matches!(
            shared.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        shared.service_name.clear();
        assert!(shared.validate().is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = Path::new("/nonexistent/ubloxchrono.toml");
        match SharedOnly::load(path) {
            Err(ConfigError::FileNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[shared]\nlog_level = \"debug\"\nservice_name = \"pitlane\"\n").unwrap();
        file.flush().unwrap();

        let config = SharedOnly::load(file.path()).unwrap();
        assert_eq!(config.shared.log_level, LogLevel::Debug);
        assert_eq!(config.shared.service_name, "pitlane");
    }
}
