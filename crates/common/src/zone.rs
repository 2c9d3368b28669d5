//! Availability zone snapshot as reported by the provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider lifecycle state of a zone.
///
/// Unknown values are kept verbatim in `Other` so they are reported as the
/// provider sent them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ZoneState {
    Available,
    Information,
    Impaired,
    Unavailable,
    Constrained,
    Other(String),
}

impl ZoneState {
    pub fn as_str(&self) -> &str {
        match self {
            ZoneState::Available => "available",
            ZoneState::Information => "information",
            ZoneState::Impaired => "impaired",
            ZoneState::Unavailable => "unavailable",
            ZoneState::Constrained => "constrained",
            ZoneState::Other(s) => s,
        }
    }
}

impl From<&str> for ZoneState {
    fn from(s: &str) -> Self {
        match s {
            "available" => ZoneState::Available,
            "information" => ZoneState::Information,
            "impaired" => ZoneState::Impaired,
            "unavailable" => ZoneState::Unavailable,
            "constrained" => ZoneState::Constrained,
            other => ZoneState::Other(other.to_string()),
        }
    }
}

impl From<String> for ZoneState {
    fn from(s: String) -> Self {
        ZoneState::from(s.as_str())
    }
}

impl From<ZoneState> for String {
    fn from(state: ZoneState) -> Self {
        match state {
            ZoneState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ZoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of an availability zone's platform-reported condition.
///
/// When `exists` is false every other field is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzState {
    pub exists: bool,
    pub zone_name: Option<String>,
    pub zone_id: Option<String>,
    pub region: Option<String>,
    pub network_border_group: Option<String>,
    pub state: Option<ZoneState>,
    /// Operator advisories in provider order.
    #[serde(default)]
    pub messages: Vec<String>,
}

impl AzState {
    /// Marker for a zone the provider has no record of.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// An existing zone in the given lifecycle state.
    pub fn existing(zone_name: impl Into<String>, state: ZoneState) -> Self {
        Self {
            exists: true,
            zone_name: Some(zone_name.into()),
            state: Some(state),
            ..Default::default()
        }
    }

    pub fn with_zone_id(mut self, zone_id: impl Into<String>) -> Self {
        self.zone_id = Some(zone_id.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_network_border_group(mut self, group: impl Into<String>) -> Self {
        self.network_border_group = Some(group.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// True only for an existing zone reported as `available`.
    pub fn is_available(&self) -> bool {
        self.exists && self.state == Some(ZoneState::Available)
    }

    /// State label used in evidence strings; `unknown` when absent.
    pub fn state_label(&self) -> &str {
        self.state.as_ref().map_or("unknown", ZoneState::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_state_round_trips_unknown_values() {
        let state: ZoneState = serde_json::from_str("\"partially-impaired\"").unwrap();
        assert_eq!(state, ZoneState::Other("partially-impaired".to_string()));
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            "\"partially-impaired\""
        );

        let known: ZoneState = serde_json::from_str("\"impaired\"").unwrap();
        assert_eq!(known, ZoneState::Impaired);
    }

    #[test]
    fn test_not_found_is_empty() {
        let zone = AzState::not_found();
        assert!(!zone.exists);
        assert!(zone.zone_name.is_none());
        assert!(zone.messages.is_empty());
        assert!(!zone.is_available());
    }

    #[test]
    fn test_builder() {
        let zone = AzState::existing("us-east-1a", ZoneState::Available)
            .with_zone_id("use1-az1")
            .with_region("us-east-1")
            .with_network_border_group("us-east-1")
            .with_message("scheduled maintenance");

        assert!(zone.is_available());
        assert_eq!(zone.zone_id.as_deref(), Some("use1-az1"));
        assert_eq!(zone.messages, vec!["scheduled maintenance".to_string()]);
    }

    #[test]
    fn test_state_label() {
        let mut zone = AzState::existing("us-east-1a", ZoneState::Impaired);
        assert_eq!(zone.state_label(), "impaired");
        zone.state = None;
        assert_eq!(zone.state_label(), "unknown");
    }
}
