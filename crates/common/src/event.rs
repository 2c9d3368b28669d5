//! Provider health events, lookup filters and reported summaries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{AzName, Region};

/// Trailing lookback for health events, in days.
pub const LOOKBACK_DAYS: i64 = 7;

/// Event type category. Only `issue` and `accountNotification` are critical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Issue,
    AccountNotification,
    ScheduledChange,
    Investigation,
    Other(String),
}

impl EventCategory {
    pub fn as_str(&self) -> &str {
        match self {
            EventCategory::Issue => "issue",
            EventCategory::AccountNotification => "accountNotification",
            EventCategory::ScheduledChange => "scheduledChange",
            EventCategory::Investigation => "investigation",
            EventCategory::Other(s) => s,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            EventCategory::Issue | EventCategory::AccountNotification
        )
    }
}

impl Default for EventCategory {
    fn default() -> Self {
        EventCategory::Other(String::new())
    }
}

impl From<&str> for EventCategory {
    fn from(s: &str) -> Self {
        match s {
            "issue" => EventCategory::Issue,
            "accountNotification" => EventCategory::AccountNotification,
            "scheduledChange" => EventCategory::ScheduledChange,
            "investigation" => EventCategory::Investigation,
            other => EventCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for EventCategory {
    fn from(s: String) -> Self {
        EventCategory::from(s.as_str())
    }
}

impl From<EventCategory> for String {
    fn from(category: EventCategory) -> Self {
        match category {
            EventCategory::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider lifecycle of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    Open,
    Upcoming,
    Closed,
    Other(String),
}

impl EventStatus {
    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Open => "open",
            EventStatus::Upcoming => "upcoming",
            EventStatus::Closed => "closed",
            EventStatus::Other(s) => s,
        }
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Other(String::new())
    }
}

impl From<&str> for EventStatus {
    fn from(s: &str) -> Self {
        match s {
            "open" => EventStatus::Open,
            "upcoming" => EventStatus::Upcoming,
            "closed" => EventStatus::Closed,
            other => EventStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for EventStatus {
    fn from(s: String) -> Self {
        EventStatus::from(s.as_str())
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One provider-reported incident or notification, in the provider's
/// camelCase wire shape. Missing fields deserialize to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthEvent {
    #[serde(default)]
    pub arn: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub event_type_code: String,
    #[serde(default)]
    pub event_type_category: EventCategory,
    #[serde(default)]
    pub status_code: EventStatus,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated_time: Option<DateTime<Utc>>,
}

impl HealthEvent {
    pub fn new(
        arn: impl Into<String>,
        service: impl Into<String>,
        event_type_code: impl Into<String>,
        category: EventCategory,
    ) -> Self {
        Self {
            arn: arn.into(),
            service: service.into(),
            event_type_code: event_type_code.into(),
            event_type_category: category,
            status_code: EventStatus::Open,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status_code = status;
        self
    }

    pub fn with_start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Evidence line for a critical event.
    pub fn critical_issue(&self) -> String {
        format!(
            "Critical event: {} - {}",
            self.event_type_code, self.service
        )
    }
}

/// Reported form of an event inside a verdict bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub arn: String,
    pub service: String,
    pub event_type_code: String,
    pub event_type_category: String,
    pub status: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub last_updated: Option<String>,
}

impl From<&HealthEvent> for EventSummary {
    fn from(event: &HealthEvent) -> Self {
        Self {
            arn: event.arn.clone(),
            service: event.service.clone(),
            event_type_code: event.event_type_code.clone(),
            event_type_category: event.event_type_category.as_str().to_string(),
            status: event.status_code.as_str().to_string(),
            start_time: event.start_time.map(|t| t.to_rfc3339()),
            end_time: event.end_time.map(|t| t.to_rfc3339()),
            last_updated: event.last_updated_time.map(|t| t.to_rfc3339()),
        }
    }
}

/// Closed time interval `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    /// The `days` leading up to `now`.
    pub fn trailing_days(now: DateTime<Utc>, days: i64) -> Self {
        Self {
            from: now - Duration::days(days),
            to: now,
        }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at <= self.to
    }
}

/// Scope of a health event lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub region: Region,
    pub availability_zone: AzName,
    pub window: TimeRange,
    pub statuses: Vec<EventStatus>,
}

impl EventFilter {
    /// Open and upcoming events in the given scope and window.
    pub fn active(region: Region, availability_zone: AzName, window: TimeRange) -> Self {
        Self {
            region,
            availability_zone,
            window,
            statuses: vec![EventStatus::Open, EventStatus::Upcoming],
        }
    }

    pub fn admits_status(&self, status: &EventStatus) -> bool {
        self.statuses.contains(status)
    }

    /// Events without a start time are not excluded by the window.
    pub fn admits_start(&self, start: Option<DateTime<Utc>>) -> bool {
        start.map_or(true, |t| self.window.contains(t))
    }
}
