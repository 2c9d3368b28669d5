//! Configuration linting
//!
//! Flags settings that are valid but likely to surprise.

use super::{ValidationResult, ValidationWarning};
use crate::{Config, LogFormat};

/// Pages beyond this are almost certainly a looping provider.
const MAX_REASONABLE_PAGES: usize = 1000;

/// Lint configuration
pub fn lint_config(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::new();

    if config.sources.snapshot.is_none() {
        result.add_warning(ValidationWarning::new(
            "No provider snapshot configured (pass --snapshot or set AZ_HEALTH_SNAPSHOT)",
        ));
    }

    if config.health_events.max_pages > MAX_REASONABLE_PAGES {
        result.add_warning(ValidationWarning::new(format!(
            "max_pages is {} (lookups may run for a long time against a misbehaving provider)",
            config.health_events.max_pages
        )));
    }

    let level = config.logging.level.to_ascii_lowercase();
    if config.logging.format == LogFormat::Pretty && (level == "trace" || level == "debug") {
        result.add_warning(ValidationWarning::new(
            "Verbose pretty logging is hard to ingest (consider format = \"json\")",
        ));
    }

    result
}
