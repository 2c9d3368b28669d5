//! Configuration schema for the AZ health agent.
//!
//! Configuration is read from a TOML file. Every section has defaults, so
//! an empty file (or no file at all) yields a usable [`Config`].
//!
//! ```toml
//! [sources]
//! snapshot = "/etc/az-health/provider.json"
//!
//! [health_events]
//! max_pages = 100
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

pub mod validate;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

pub use validate::{ErrorCategory, ValidationError, ValidationResult, ValidationWarning};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub health_events: HealthEventsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where provider data comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// Provider snapshot file (zones and health events).
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

/// Health event lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthEventsConfig {
    /// Upper bound on pages followed for one lookup.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_max_pages() -> usize {
    100
}

impl Default for HealthEventsConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        trace!(path = %path.display(), "Reading configuration file");

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            snapshot = ?config.sources.snapshot,
            max_pages = config.health_events.max_pages,
            "Loaded configuration"
        );

        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check for errors, failing on the first report that has any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = validate::validate_config(self);
        if result.errors.is_empty() {
            Ok(())
        } else {
            let messages: Vec<String> = result.errors.iter().map(|e| e.to_string()).collect();
            Err(ConfigError::Invalid(messages.join("; ")))
        }
    }

    /// Warnings about settings that work but are probably not intended.
    pub fn lint(&self) -> Vec<ValidationWarning> {
        validate::lint::lint_config(self).warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.health_events.max_pages, 100);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.sources.snapshot.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml(
            r#"
            [sources]
            snapshot = "/tmp/provider.json"

            [health_events]
            max_pages = 5

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.sources.snapshot, Some(PathBuf::from("/tmp/provider.json")));
        assert_eq!(config.health_events.max_pages, 5);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml("[sources]\nsnapshots = \"x\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[health_events]\nmax_pages = 3").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.health_events.max_pages, 3);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/az-health.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_validate_reports_errors() {
        let mut config = Config::default();
        config.health_events.max_pages = 0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_pages"));
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
