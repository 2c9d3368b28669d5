//! Error types for provider lookups and invocations.

use azhealth_common::RegionInferenceError;
use thiserror::Error;

/// Errors reported by a provider source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The provider has no record of the zone.
    #[error("availability zone not found: {0}")]
    ZoneNotFound(String),

    /// The caller lacks the entitlement or permission for this API.
    #[error("access denied ({code}): {message}")]
    AccessDenied { code: String, message: String },

    /// Any other provider-side failure.
    #[error("provider error ({code}): {message}")]
    Provider { code: String, message: String },

    /// The provider could not be reached or loaded.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with something we cannot interpret.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl SourceError {
    /// Health API access without a qualifying support plan.
    pub fn subscription_required() -> Self {
        SourceError::AccessDenied {
            code: "SubscriptionRequiredException".to_string(),
            message: "the health API requires a Business or Enterprise support plan".to_string(),
        }
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, SourceError::AccessDenied { .. })
    }

    /// The provider could not be reached or its answer could not be read.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self,
            SourceError::Unavailable(_) | SourceError::InvalidResponse(_)
        )
    }
}

/// Lookup failures that are fatal for the request.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("AZ state lookup failed for {zone}: {source}")]
    AzState {
        zone: String,
        #[source]
        source: SourceError,
    },

    #[error("health event lookup failed for {zone}: {source}")]
    HealthEvents {
        zone: String,
        #[source]
        source: SourceError,
    },
}

/// Result type for lookups.
pub type LookupResult<T> = Result<T, LookupError>;

/// Errors surfaced by the invocation handler.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("Missing required parameter: availability_zone")]
    MissingAvailabilityZone,

    #[error(transparent)]
    RegionInference(#[from] RegionInferenceError),

    #[error("invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("source unavailable for region {region}: {source}")]
    SourceUnavailable {
        region: String,
        #[source]
        source: SourceError,
    },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("failed to serialize response: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse error classification exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Upstream,
    Internal,
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Upstream | ErrorKind::Internal => 500,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad request",
            ErrorKind::Upstream => "Upstream API error",
            ErrorKind::Internal => "Internal error",
        }
    }
}

impl InvocationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InvocationError::MissingAvailabilityZone
            | InvocationError::RegionInference(_)
            | InvocationError::InvalidPayload(_) => ErrorKind::BadRequest,
            InvocationError::SourceUnavailable { .. } | InvocationError::Lookup(_) => {
                ErrorKind::Upstream
            }
            InvocationError::Serialization(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            InvocationError::MissingAvailabilityZone.kind(),
            ErrorKind::BadRequest
        );

        let lookup = LookupError::AzState {
            zone: "us-east-1a".to_string(),
            source: SourceError::Provider {
                code: "UnauthorizedOperation".to_string(),
                message: "denied".to_string(),
            },
        };
        let err = InvocationError::from(lookup);
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.kind().status_code(), 500);
        assert!(err.to_string().contains("us-east-1a"));
    }

    #[test]
    fn test_unreachable_classification() {
        assert!(SourceError::Unavailable("connection refused".to_string()).is_unreachable());
        assert!(SourceError::InvalidResponse("truncated body".to_string()).is_unreachable());
        assert!(!SourceError::subscription_required().is_unreachable());
        assert!(!SourceError::Provider {
            code: "InternalFailure".to_string(),
            message: "boom".to_string(),
        }
        .is_unreachable());
    }

    #[test]
    fn test_subscription_required_is_access_denied() {
        let err = SourceError::subscription_required();
        assert!(err.is_access_denied());
        assert!(err.to_string().starts_with("access denied (SubscriptionRequiredException)"));
    }
}
