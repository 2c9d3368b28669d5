//! File-backed provider snapshot.
//!
//! A snapshot is a JSON document holding zones in the zone API's
//! PascalCase shape and health events in the health API's camelCase shape,
//! each event tagged with the region and zones it was recorded under:
//!
//! ```json
//! {
//!   "zones": [
//!     { "ZoneName": "us-east-1a", "ZoneId": "use1-az1", "RegionName": "us-east-1",
//!       "State": "available", "Messages": [{ "Message": "scheduled maintenance" }] }
//!   ],
//!   "health": {
//!     "access": "granted",
//!     "events": [
//!       { "region": "us-east-1", "availabilityZones": ["us-east-1a"],
//!         "arn": "arn:...", "service": "EC2", "eventTypeCode": "AWS_EC2_OPERATIONAL_ISSUE",
//!         "eventTypeCategory": "issue", "statusCode": "open",
//!         "startTime": "2026-10-18T12:00:00Z" }
//!     ]
//!   }
//! }
//! ```

use azhealth_common::{AzName, AzState, HealthEvent, Region, ZoneState};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

use super::{EventAccess, MemorySource, ScopedEvent};
use crate::errors::SourceError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotDocument {
    #[serde(default)]
    zones: Vec<ZoneRecord>,
    #[serde(default)]
    health: HealthSection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ZoneRecord {
    zone_name: String,
    #[serde(default)]
    zone_id: Option<String>,
    #[serde(default)]
    region_name: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    network_border_group: Option<String>,
    #[serde(default)]
    messages: Vec<ZoneMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ZoneMessage {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct HealthSection {
    #[serde(default)]
    access: EventAccess,
    #[serde(default)]
    page_size: Option<usize>,
    #[serde(default)]
    events: Vec<SnapshotEvent>,
}

#[derive(Debug, Deserialize)]
struct SnapshotEvent {
    region: String,
    #[serde(rename = "availabilityZones", default)]
    availability_zones: Vec<String>,
    #[serde(flatten)]
    event: HealthEvent,
}

impl From<ZoneRecord> for AzState {
    fn from(record: ZoneRecord) -> Self {
        AzState {
            exists: true,
            zone_name: Some(record.zone_name),
            zone_id: record.zone_id,
            region: record.region_name,
            network_border_group: record.network_border_group,
            state: record.state.map(ZoneState::from),
            messages: record.messages.into_iter().map(|m| m.message).collect(),
        }
    }
}

impl From<SnapshotEvent> for ScopedEvent {
    fn from(event: SnapshotEvent) -> Self {
        ScopedEvent {
            region: Region::new(event.region),
            availability_zones: event.availability_zones.into_iter().map(AzName::new).collect(),
            event: event.event,
        }
    }
}

/// Parse snapshot JSON into an in-memory provider.
pub fn parse(content: &str) -> Result<MemorySource, SourceError> {
    let document: SnapshotDocument = serde_json::from_str(content)
        .map_err(|e| SourceError::InvalidResponse(format!("snapshot: {e}")))?;

    let zone_count = document.zones.len();
    let event_count = document.health.events.len();

    let mut provider = MemorySource::new().with_event_access(document.health.access);
    if let Some(page_size) = document.health.page_size {
        provider = provider.with_page_size(page_size);
    }
    for zone in document.zones {
        provider = provider.with_zone(AzState::from(zone));
    }
    for event in document.health.events {
        provider = provider.with_scoped_event(ScopedEvent::from(event));
    }

    debug!(
        zones = zone_count,
        events = event_count,
        access = ?document.health.access,
        "Parsed provider snapshot"
    );

    Ok(provider)
}

/// Load a snapshot file.
pub async fn load(path: impl AsRef<Path>) -> Result<MemorySource, SourceError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        SourceError::Unavailable(format!("cannot read snapshot {}: {e}", path.display()))
    })?;

    let provider = parse(&content)?;
    info!(path = %path.display(), "Loaded provider snapshot");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceProvider;
    use azhealth_common::{EventCategory, EventFilter, TimeRange, LOOKBACK_DAYS};
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    const SNAPSHOT: &str = r#"{
        "zones": [
            { "ZoneName": "us-east-1a", "ZoneId": "use1-az1", "RegionName": "us-east-1",
              "State": "available", "NetworkBorderGroup": "us-east-1",
              "Messages": [{ "Message": "scheduled maintenance" }] }
        ],
        "health": {
            "page_size": 1,
            "events": [
                { "region": "us-east-1", "availabilityZones": ["us-east-1a"],
                  "arn": "arn:1", "service": "EC2", "eventTypeCode": "AWS_EC2_OPERATIONAL_ISSUE",
                  "eventTypeCategory": "issue", "statusCode": "open",
                  "startTime": "2026-10-18T12:00:00Z" }
            ]
        }
    }"#;

    #[tokio::test]
    async fn test_parse_zone_record() {
        let provider = parse(SNAPSHOT).unwrap();
        let source = provider.az_state_source(&Region::new("us-east-1")).unwrap();

        let zone = source
            .describe_zone(&AzName::new("us-east-1a"))
            .await
            .unwrap()
            .unwrap();
        assert!(zone.is_available());
        assert_eq!(zone.zone_id.as_deref(), Some("use1-az1"));
        assert_eq!(zone.messages, vec!["scheduled maintenance".to_string()]);
    }

    #[tokio::test]
    async fn test_parse_events() {
        let provider = parse(SNAPSHOT).unwrap();
        let source = provider.health_event_source().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let filter = EventFilter::active(
            Region::new("us-east-1"),
            AzName::new("us-east-1a"),
            TimeRange::trailing_days(now, LOOKBACK_DAYS),
        );

        let page = source.describe_events(&filter, None).await.unwrap();
        assert_eq!(page.events.len(), 1);
        assert_eq!(page.events[0].event_type_category, EventCategory::Issue);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse("{ not json").unwrap_err();
        assert!(matches!(err, SourceError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse("{}").is_ok());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let provider = load(file.path()).await.unwrap();
        let source = provider.az_state_source(&Region::new("us-east-1")).unwrap();
        assert!(source
            .describe_zone(&AzName::new("us-east-1a"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = load("/nonexistent/provider.json").await.unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }
}
