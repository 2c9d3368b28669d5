//! AZ state and health event lookups.
//!
//! The two lookups follow different failure policies. Zone existence is
//! foundational, so any provider failure other than "not found" is fatal.
//! Health events are supplementary evidence: access denial and an
//! unreachable or unreadable health API degrade to an empty list, and only
//! errors the provider itself reports are fatal.

use azhealth_common::{
    AzName, AzState, EventFilter, HealthEvent, Region, TimeRange, LOOKBACK_DAYS,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::errors::{LookupError, LookupResult, SourceError};
use crate::source::{AzStateSource, HealthEventSource};

/// Default upper bound on pages followed for one event lookup.
pub const DEFAULT_MAX_PAGES: usize = 100;

/// The trailing lookback window ending at `now`.
pub fn lookback_window(now: DateTime<Utc>) -> TimeRange {
    TimeRange::trailing_days(now, LOOKBACK_DAYS)
}

/// Resolves a zone name to its [`AzState`].
pub struct AzStateLookup {
    source: Arc<dyn AzStateSource>,
}

impl AzStateLookup {
    pub fn new(source: Arc<dyn AzStateSource>) -> Self {
        Self { source }
    }

    /// Missing zones resolve to [`AzState::not_found`], not an error.
    pub async fn lookup(&self, zone: &AzName) -> LookupResult<AzState> {
        match self.source.describe_zone(zone).await {
            Ok(Some(state)) => {
                debug!(
                    zone = %zone,
                    state = state.state_label(),
                    messages = state.messages.len(),
                    "Resolved availability zone"
                );
                Ok(state)
            }
            Ok(None) | Err(SourceError::ZoneNotFound(_)) => {
                info!(zone = %zone, "Availability zone not found");
                Ok(AzState::not_found())
            }
            Err(source) => {
                error!(zone = %zone, error = %source, "Error checking AZ status");
                Err(LookupError::AzState {
                    zone: zone.to_string(),
                    source,
                })
            }
        }
    }
}

/// Collects active health events for a zone across pages.
pub struct HealthEventLookup {
    source: Arc<dyn HealthEventSource>,
    max_pages: usize,
}

impl HealthEventLookup {
    pub fn new(source: Arc<dyn HealthEventSource>) -> Self {
        Self {
            source,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Open and upcoming events for `zone` within `window`.
    ///
    /// Events repeated across pages are kept once by ARN, first occurrence
    /// wins. Events outside the status filter are dropped even if the
    /// source returned them.
    pub async fn lookup(
        &self,
        region: &Region,
        zone: &AzName,
        window: TimeRange,
    ) -> LookupResult<Vec<HealthEvent>> {
        let filter = EventFilter::active(region.clone(), zone.clone(), window);
        let mut events = Vec::new();
        let mut seen = HashSet::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = match self
                .source
                .describe_events(&filter, next_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(e) if e.is_access_denied() => {
                    warn!(
                        zone = %zone,
                        error = %e,
                        "Health API unavailable (requires Business or Enterprise support); continuing without events"
                    );
                    return Ok(Vec::new());
                }
                Err(e) if e.is_unreachable() => {
                    error!(
                        zone = %zone,
                        error = %e,
                        "Error querying health API; continuing without events"
                    );
                    return Ok(Vec::new());
                }
                Err(source) => {
                    error!(zone = %zone, error = %source, "Error querying health API");
                    return Err(LookupError::HealthEvents {
                        zone: zone.to_string(),
                        source,
                    });
                }
            };
            pages += 1;

            debug!(
                page = pages,
                events = page.events.len(),
                has_more = page.next_token.is_some(),
                "Fetched health event page"
            );

            for event in page.events {
                if !filter.admits_status(&event.status_code) {
                    debug!(arn = %event.arn, status = %event.status_code, "Dropping inactive event");
                    continue;
                }
                if !event.arn.is_empty() && !seen.insert(event.arn.clone()) {
                    debug!(arn = %event.arn, "Dropping duplicate event");
                    continue;
                }
                events.push(event);
            }

            match page.next_token {
                Some(token) if pages < self.max_pages => next_token = Some(token),
                Some(_) => {
                    warn!(
                        zone = %zone,
                        max_pages = self.max_pages,
                        "Stopped following health event pages at limit"
                    );
                    break;
                }
                None => break,
            }
        }

        info!(zone = %zone, count = events.len(), "Found health events");
        Ok(events)
    }
}
