//! Provider source traits and implementations.
//!
//! The lookups only see these traits. A [`SourceProvider`] hands out
//! sources per request, with the region passed explicitly, so no client
//! state is shared or rebound between invocations.

mod memory;
pub mod snapshot;

pub use memory::MemorySource;

use async_trait::async_trait;
use azhealth_common::{AzName, AzState, EventFilter, HealthEvent, Region};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::SourceError;

/// Zone state queries against one region.
#[async_trait]
pub trait AzStateSource: Send + Sync {
    /// Describe a zone. `Ok(None)` when the provider has no record of it.
    async fn describe_zone(&self, zone: &AzName) -> Result<Option<AzState>, SourceError>;
}

/// Paged health event queries.
#[async_trait]
pub trait HealthEventSource: Send + Sync {
    /// Fetch one page of events matching `filter`.
    async fn describe_events(
        &self,
        filter: &EventFilter,
        next_token: Option<&str>,
    ) -> Result<EventPage, SourceError>;
}

/// Builds sources for a single request.
pub trait SourceProvider: Send + Sync {
    fn az_state_source(&self, region: &Region) -> Result<Arc<dyn AzStateSource>, SourceError>;

    /// The health API is global; it is not bound to the request region.
    fn health_event_source(&self) -> Result<Arc<dyn HealthEventSource>, SourceError>;
}

/// One page of health events.
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    pub events: Vec<HealthEvent>,
    pub next_token: Option<String>,
}

/// Whether the caller may use the health API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAccess {
    #[default]
    Granted,
    SubscriptionRequired,
    Denied,
}

impl EventAccess {
    pub fn check(&self) -> Result<(), SourceError> {
        match self {
            EventAccess::Granted => Ok(()),
            EventAccess::SubscriptionRequired => Err(SourceError::subscription_required()),
            EventAccess::Denied => Err(SourceError::AccessDenied {
                code: "AccessDeniedException".to_string(),
                message: "not authorized to call DescribeEvents".to_string(),
            }),
        }
    }
}

/// An event together with the scope the provider recorded it under.
#[derive(Debug, Clone)]
pub struct ScopedEvent {
    pub region: Region,
    pub availability_zones: Vec<AzName>,
    pub event: HealthEvent,
}

impl ScopedEvent {
    pub fn matches(&self, filter: &EventFilter) -> bool {
        self.region == filter.region
            && self.availability_zones.contains(&filter.availability_zone)
            && filter.admits_status(&self.event.status_code)
            && filter.admits_start(self.event.start_time)
    }
}

/// Cut one page out of `events`. Tokens are decimal offsets.
fn page_of(
    events: Vec<HealthEvent>,
    page_size: usize,
    next_token: Option<&str>,
) -> Result<EventPage, SourceError> {
    let offset = match next_token {
        None => 0,
        Some(token) => token.parse::<usize>().map_err(|_| SourceError::Provider {
            code: "InvalidPaginationToken".to_string(),
            message: format!("unrecognized pagination token '{token}'"),
        })?,
    };

    let page_size = page_size.max(1);
    let end = offset.saturating_add(page_size).min(events.len());
    let next_token = (end < events.len()).then(|| end.to_string());
    let events = events.into_iter().skip(offset).take(end.saturating_sub(offset)).collect();

    Ok(EventPage { events, next_token })
}
