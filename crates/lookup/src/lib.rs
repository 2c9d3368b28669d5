//! AZ Health Lookup Library
//!
//! Provider lookups and the invocation handler for availability zone health
//! checks. The handler validates a request, resolves the region, queries zone
//! state and health events through per-request sources, and classifies the
//! result with [`azhealth_common::classify`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use azhealth_lookup::{HealthCheckHandler, HealthCheckRequest, MemorySource};
//!
//! let provider = MemorySource::new();
//! let handler = HealthCheckHandler::new(Arc::new(provider));
//! let response = handler.invoke(HealthCheckRequest::new("us-east-1a")).await;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod errors;
pub mod handler;
pub mod lookup;
pub mod protocol;
pub mod source;

// ============================================================================
// Public API Re-exports
// ============================================================================

// Errors
pub use errors::{ErrorKind, InvocationError, LookupError, LookupResult, SourceError};

// Handler
pub use handler::HealthCheckHandler;

// Lookups
pub use lookup::{lookback_window, AzStateLookup, HealthEventLookup, DEFAULT_MAX_PAGES};

// Wire shapes
pub use protocol::{ErrorEnvelope, HealthCheckRequest, HealthCheckResponse, InvocationResponse};

// Sources
pub use source::{
    AzStateSource, EventAccess, EventPage, HealthEventSource, MemorySource, ScopedEvent,
    SourceProvider,
};
