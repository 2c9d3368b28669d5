//! Configuration validation.
//!
//! Errors make a configuration unusable; warnings are reported by
//! `az-health test` but do not stop the agent.

pub mod lint;
pub mod sources;

use std::fmt;

use crate::Config;

/// Area of the configuration an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Sources,
    HealthEvents,
    Logging,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Sources => "sources",
            ErrorCategory::HealthEvents => "health_events",
            ErrorCategory::Logging => "logging",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub category: ErrorCategory,
    pub message: String,
}

impl ValidationError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub message: String,
}

impl ValidationWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Run every validation pass.
pub fn validate_config(config: &Config) -> ValidationResult {
    let mut result = sources::validate_sources(config);

    if config.health_events.max_pages == 0 {
        result.add_error(ValidationError::new(
            ErrorCategory::HealthEvents,
            "max_pages must be at least 1",
        ));
    }

    // Full filter directives (`target=level`) are left to the subscriber.
    let level = config.logging.level.trim();
    if level.is_empty() {
        result.add_error(ValidationError::new(
            ErrorCategory::Logging,
            "level cannot be empty",
        ));
    } else if !level.contains('=') && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        result.add_error(ValidationError::new(
            ErrorCategory::Logging,
            format!("unknown log level '{level}'"),
        ));
    }

    result.merge(lint::lint_config(config));
    result
}
