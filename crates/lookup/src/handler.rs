//! Health check invocation handler.
//!
//! Validates the request, resolves the region, runs both lookups and folds
//! the results through the classifier. This is the only layer that turns
//! failures into an [`InvocationResponse`] envelope.

use azhealth_common::{classify, AzName, Region, RequestId};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::errors::{ErrorKind, InvocationError, SourceError};
use crate::lookup::{lookback_window, AzStateLookup, HealthEventLookup, DEFAULT_MAX_PAGES};
use crate::protocol::{HealthCheckRequest, HealthCheckResponse, InvocationResponse};
use crate::source::SourceProvider;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Runs AZ health checks against a [`SourceProvider`].
///
/// Holds no per-request state and can be shared behind an `Arc`.
#[derive(Clone)]
pub struct HealthCheckHandler {
    provider: Arc<dyn SourceProvider>,
    max_pages: usize,
    clock: Clock,
}

impl HealthCheckHandler {
    pub fn new(provider: Arc<dyn SourceProvider>) -> Self {
        Self {
            provider,
            max_pages: DEFAULT_MAX_PAGES,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Replace the wall clock used for the lookback window and timestamp.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Run one health check.
    pub async fn check(
        &self,
        request: HealthCheckRequest,
    ) -> Result<HealthCheckResponse, InvocationError> {
        let request_id = RequestId::new();
        let span = info_span!("health_check", request_id = %request_id);
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: HealthCheckRequest) -> Result<HealthCheckResponse, InvocationError> {
        let zone = request
            .availability_zone
            .filter(|az| !az.trim().is_empty())
            .map(AzName::new)
            .ok_or(InvocationError::MissingAvailabilityZone)?;

        let region = match request.region.filter(|r| !r.trim().is_empty()) {
            Some(region) => Region::new(region),
            None => {
                let region = zone.infer_region()?;
                debug!(zone = %zone, region = %region, "Inferred region from zone name");
                region
            }
        };

        info!(zone = %zone, region = %region, "Checking availability zone health");

        let unavailable = |source: SourceError| InvocationError::SourceUnavailable {
            region: region.to_string(),
            source,
        };
        let az_lookup = AzStateLookup::new(self.provider.az_state_source(&region).map_err(unavailable)?);
        let event_lookup = HealthEventLookup::new(self.provider.health_event_source().map_err(unavailable)?)
            .with_max_pages(self.max_pages);

        let now = (self.clock)();
        let window = lookback_window(now);

        let (az_state, events) = tokio::try_join!(
            az_lookup.lookup(&zone),
            event_lookup.lookup(&region, &zone, window),
        )?;

        let health = classify(&az_state, &events);

        info!(
            zone = %zone,
            status = health.status.as_str(),
            severity = health.severity.as_str(),
            issues = health.issues.len(),
            "Health check complete"
        );

        Ok(HealthCheckResponse {
            availability_zone: zone.to_string(),
            region: region.to_string(),
            timestamp: now.to_rfc3339(),
            health,
        })
    }

    /// Run one health check and render the result or failure as a response.
    pub async fn invoke(&self, request: HealthCheckRequest) -> InvocationResponse {
        let result = self
            .check(request)
            .await
            .and_then(|response| InvocationResponse::ok(&response).map_err(InvocationError::from));

        match result {
            Ok(response) => response,
            Err(err) => Self::failure(&err),
        }
    }

    /// Parse a raw JSON payload and invoke. Malformed payloads are bad requests.
    pub async fn invoke_payload(&self, payload: &str) -> InvocationResponse {
        match HealthCheckRequest::from_json(payload) {
            Ok(request) => self.invoke(request).await,
            Err(err) => Self::failure(&err),
        }
    }

    fn failure(err: &InvocationError) -> InvocationResponse {
        match err.kind() {
            ErrorKind::BadRequest => warn!(error = %err, "Rejected health check request"),
            ErrorKind::Upstream | ErrorKind::Internal => error!(error = %err, "Health check failed"),
        }
        InvocationResponse::from_error(err)
    }
}
