//! Shared types and the health classifier for AZ health checks.
//!
//! This crate is pure: it holds the data model produced by the lookups
//! (`AzState`, `HealthEvent`), the verdict returned to callers, and the
//! classifier that folds the former into the latter. Nothing here performs
//! I/O.
//!
//! # Modules
//!
//! - [`ids`]: identifier newtypes (`AzName`, `Region`, `RequestId`)
//! - [`types`]: severity ordering and reported status
//! - [`zone`]: availability zone snapshot
//! - [`event`]: provider health events, filters and summaries
//! - [`verdict`]: the classifier output
//! - [`classifier`]: the classification rules

pub mod classifier;
pub mod event;
pub mod ids;
pub mod types;
pub mod verdict;
pub mod zone;

pub use classifier::classify;
pub use event::{
    EventCategory, EventFilter, EventStatus, EventSummary, HealthEvent, TimeRange, LOOKBACK_DAYS,
};
pub use ids::{AzName, Region, RegionInferenceError, RequestId};
pub use types::{HealthStatus, Severity};
pub use verdict::HealthVerdict;
pub use zone::{AzState, ZoneState};
