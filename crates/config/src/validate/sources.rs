//! Provider source validation
//!
//! Checks that a configured snapshot file can be read.

use super::{ErrorCategory, ValidationError, ValidationResult};
use crate::Config;

/// Validate the configured provider sources
pub fn validate_sources(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(ref snapshot) = config.sources.snapshot else {
        return result;
    };

    if snapshot.as_os_str().is_empty() {
        result.add_error(ValidationError::new(
            ErrorCategory::Sources,
            "snapshot path cannot be empty",
        ));
    } else if !snapshot.is_file() {
        result.add_error(ValidationError::new(
            ErrorCategory::Sources,
            format!("snapshot file '{}' does not exist", snapshot.display()),
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_no_snapshot_is_not_an_error() {
        assert!(validate_sources(&Config::default()).is_ok());
    }

    #[test]
    fn test_missing_snapshot_file() {
        let mut config = Config::default();
        config.sources.snapshot = Some(PathBuf::from("/nonexistent/provider.json"));

        let result = validate_sources(&config);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("does not exist"));
    }

    #[test]
    fn test_existing_snapshot_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.sources.snapshot = Some(file.path().to_path_buf());

        assert!(validate_sources(&config).is_ok());
    }

    #[test]
    fn test_empty_snapshot_path() {
        let mut config = Config::default();
        config.sources.snapshot = Some(PathBuf::new());

        let result = validate_sources(&config);
        assert!(result.errors[0].message.contains("cannot be empty"));
    }
}
