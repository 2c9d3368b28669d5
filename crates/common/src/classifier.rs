//! Health classifier.
//!
//! Folds an [`AzState`] and the zone's active [`HealthEvent`]s into a
//! [`HealthVerdict`]. The rules run in a fixed order and each one can only
//! raise the accumulated [`Severity`]:
//!
//! 1. a missing zone short-circuits to an `error` verdict
//! 2. a lifecycle state other than `available` is critical
//! 3. operator messages are at least a warning
//! 4. `issue` and `accountNotification` events are critical, any other
//!    category is a warning
//!
//! The classifier is total and deterministic. Absent optional fields count
//! as "no evidence".

use crate::event::{EventSummary, HealthEvent};
use crate::types::Severity;
use crate::verdict::HealthVerdict;
use crate::zone::AzState;

/// Classify a zone from its state and active events.
pub fn classify(zone: &AzState, events: &[HealthEvent]) -> HealthVerdict {
    if !zone.exists {
        return HealthVerdict::zone_not_found();
    }

    let mut assessment = Assessment::default();
    assessment.apply_lifecycle_rule(zone);
    assessment.apply_message_rule(zone);
    assessment.apply_event_rule(events);
    assessment.finish(zone)
}

/// Accumulated state between rules.
#[derive(Debug, Default)]
struct Assessment {
    severity: Severity,
    issues: Vec<String>,
    critical_events: Vec<EventSummary>,
    warning_events: Vec<EventSummary>,
}

impl Assessment {
    fn apply_lifecycle_rule(&mut self, zone: &AzState) {
        if !zone.is_available() {
            self.issues.push(format!(
                "AZ state is {} (expected: available)",
                zone.state_label()
            ));
            self.severity.raise(Severity::Critical);
        }
    }

    /// Messages alone never make a zone critical.
    fn apply_message_rule(&mut self, zone: &AzState) {
        if zone.messages.is_empty() {
            return;
        }
        for message in &zone.messages {
            self.issues.push(format!("AZ message: {message}"));
        }
        self.severity.raise(Severity::Warning);
    }

    /// Each event lands in exactly one bucket, independently of the others.
    fn apply_event_rule(&mut self, events: &[HealthEvent]) {
        for event in events {
            let summary = EventSummary::from(event);
            if event.event_type_category.is_critical() {
                self.issues.push(event.critical_issue());
                self.critical_events.push(summary);
                self.severity.raise(Severity::Critical);
            } else {
                self.warning_events.push(summary);
                self.severity.raise(Severity::Warning);
            }
        }
    }

    fn finish(self, zone: &AzState) -> HealthVerdict {
        let status = self.severity.status();
        HealthVerdict {
            status,
            severity: self.severity,
            message: status.summary(),
            issues: self.issues,
            critical_events: self.critical_events,
            warning_events: self.warning_events,
            az_info: Some(zone.clone()),
        }
    }
}
