//! In-memory provider with regional zone scoping and paged events.

use async_trait::async_trait;
use azhealth_common::{AzName, AzState, EventFilter, HealthEvent, Region};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{
    page_of, AzStateSource, EventAccess, EventPage, HealthEventSource, ScopedEvent, SourceProvider,
};
use crate::errors::SourceError;

const DEFAULT_PAGE_SIZE: usize = 10;

/// Provider contents.
#[derive(Debug)]
struct ProviderState {
    zones: Vec<AzState>,
    events: Vec<ScopedEvent>,
    event_access: EventAccess,
    page_size: usize,
    /// Injected failure for zone lookups.
    zone_failure: Option<SourceError>,
    /// Injected failure for event lookups.
    event_failure: Option<SourceError>,
}

impl Default for ProviderState {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            events: Vec::new(),
            event_access: EventAccess::Granted,
            page_size: DEFAULT_PAGE_SIZE,
            zone_failure: None,
            event_failure: None,
        }
    }
}

/// In-memory provider.
///
/// Zones are only visible to sources built for their own region, the way a
/// regional API client would see them. Zones without a region are visible
/// everywhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    state: Arc<RwLock<ProviderState>>,
    event_pages_served: Arc<AtomicUsize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(self, zone: AzState) -> Self {
        self.insert_zone(zone);
        self
    }

    pub fn with_event(self, region: Region, zone: AzName, event: HealthEvent) -> Self {
        self.state.write().events.push(ScopedEvent {
            region,
            availability_zones: vec![zone],
            event,
        });
        self
    }

    pub fn with_scoped_event(self, event: ScopedEvent) -> Self {
        self.state.write().events.push(event);
        self
    }

    pub fn with_event_access(self, access: EventAccess) -> Self {
        self.state.write().event_access = access;
        self
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        self.state.write().page_size = page_size;
        self
    }

    pub fn fail_zone_lookups(self, error: SourceError) -> Self {
        self.state.write().zone_failure = Some(error);
        self
    }

    pub fn fail_event_lookups(self, error: SourceError) -> Self {
        self.state.write().event_failure = Some(error);
        self
    }

    /// Add or replace a zone by name.
    pub fn insert_zone(&self, zone: AzState) {
        let mut state = self.state.write();
        state.zones.retain(|z| z.zone_name != zone.zone_name);
        state.zones.push(zone);
    }

    /// Number of event pages served so far.
    pub fn event_pages_served(&self) -> usize {
        self.event_pages_served.load(Ordering::Relaxed)
    }
}

/// Zone view bound to one region.
struct RegionalZones {
    state: Arc<RwLock<ProviderState>>,
    region: Region,
}

#[async_trait]
impl AzStateSource for RegionalZones {
    async fn describe_zone(&self, zone: &AzName) -> Result<Option<AzState>, SourceError> {
        let state = self.state.read();
        if let Some(ref error) = state.zone_failure {
            return Err(error.clone());
        }

        let found = state.zones.iter().find(|z| {
            z.zone_name.as_deref() == Some(zone.as_str())
                && z.region.as_deref().map_or(true, |r| r == self.region.as_str())
        });

        Ok(found.cloned())
    }
}

#[async_trait]
impl HealthEventSource for MemorySource {
    async fn describe_events(
        &self,
        filter: &EventFilter,
        next_token: Option<&str>,
    ) -> Result<EventPage, SourceError> {
        let (matching, page_size) = {
            let state = self.state.read();
            state.event_access.check()?;
            if let Some(ref error) = state.event_failure {
                return Err(error.clone());
            }

            let matching: Vec<HealthEvent> = state
                .events
                .iter()
                .filter(|scoped| scoped.matches(filter))
                .map(|scoped| scoped.event.clone())
                .collect();
            (matching, state.page_size)
        };

        self.event_pages_served.fetch_add(1, Ordering::Relaxed);
        page_of(matching, page_size, next_token)
    }
}

impl SourceProvider for MemorySource {
    fn az_state_source(&self, region: &Region) -> Result<Arc<dyn AzStateSource>, SourceError> {
        Ok(Arc::new(RegionalZones {
            state: Arc::clone(&self.state),
            region: region.clone(),
        }))
    }

    fn health_event_source(&self) -> Result<Arc<dyn HealthEventSource>, SourceError> {
        Ok(Arc::new(self.clone()))
    }
}
