//! Severity ordering and reported health status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Escalation level accumulated by the classifier.
///
/// The derived ordering is `Healthy < Warning < Critical`. Severity only
/// moves upward through [`Severity::raise`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Healthy,
    Warning,
    Critical,
}

impl Severity {
    /// Raise to `level` if it is higher. Never lowers.
    pub fn raise(&mut self, level: Severity) {
        *self = (*self).max(level);
    }

    /// Reported status for this severity.
    pub fn status(self) -> HealthStatus {
        match self {
            Severity::Healthy => HealthStatus::Healthy,
            Severity::Warning => HealthStatus::Degraded,
            Severity::Critical => HealthStatus::Unhealthy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Externally reported health status.
///
/// `Error` is only produced when the zone does not exist; every other
/// status is derived from a [`Severity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
    Error,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::Error => "error",
        }
    }

    /// One-line human summary for this status.
    pub fn summary(&self) -> String {
        match self {
            HealthStatus::Error => "Availability Zone does not exist".to_string(),
            other => format!("AZ is {}", other.as_str()),
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Healthy < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
        assert_eq!(Severity::default(), Severity::Healthy);
    }

    #[test]
    fn test_raise_never_lowers() {
        let mut severity = Severity::Critical;
        severity.raise(Severity::Warning);
        assert_eq!(severity, Severity::Critical);

        let mut severity = Severity::Healthy;
        severity.raise(Severity::Warning);
        assert_eq!(severity, Severity::Warning);
        severity.raise(Severity::Healthy);
        assert_eq!(severity, Severity::Warning);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(Severity::Healthy.status(), HealthStatus::Healthy);
        assert_eq!(Severity::Warning.status(), HealthStatus::Degraded);
        assert_eq!(Severity::Critical.status(), HealthStatus::Unhealthy);
    }

    #[test]
    fn test_summaries() {
        insta::assert_snapshot!(HealthStatus::Degraded.summary(), @"AZ is degraded");
        insta::assert_snapshot!(HealthStatus::Error.summary(), @"Availability Zone does not exist");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        assert_eq!(serde_json::to_string(&HealthStatus::Unhealthy).unwrap(), "\"unhealthy\"");
    }
}
