//! Classifier output.

use serde::{Deserialize, Serialize};

use crate::event::EventSummary;
use crate::types::{HealthStatus, Severity};
use crate::zone::AzState;

/// Health judgment for one zone, with the evidence that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthVerdict {
    pub status: HealthStatus,
    pub severity: Severity,
    pub message: String,
    /// Evidence in discovery order: state, then messages, then events.
    pub issues: Vec<String>,
    pub critical_events: Vec<EventSummary>,
    pub warning_events: Vec<EventSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub az_info: Option<AzState>,
}

impl HealthVerdict {
    /// Verdict for a zone the provider has no record of.
    pub fn zone_not_found() -> Self {
        let status = HealthStatus::Error;
        Self {
            status,
            severity: Severity::Critical,
            message: status.summary(),
            issues: vec!["AZ not found".to_string()],
            critical_events: Vec::new(),
            warning_events: Vec::new(),
            az_info: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}
