//! Request, response and error envelope shapes.

use azhealth_common::HealthVerdict;
use serde::{Deserialize, Serialize};

use crate::errors::InvocationError;

/// Incoming health check request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckRequest {
    #[serde(default)]
    pub availability_zone: Option<String>,
    /// Inferred from the zone name when absent or empty.
    #[serde(default)]
    pub region: Option<String>,
}

impl HealthCheckRequest {
    pub fn new(availability_zone: impl Into<String>) -> Self {
        Self {
            availability_zone: Some(availability_zone.into()),
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Parse a raw JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, InvocationError> {
        serde_json::from_str(payload).map_err(|e| InvocationError::InvalidPayload(e.to_string()))
    }
}

/// Successful health check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub availability_zone: String,
    pub region: String,
    /// RFC 3339 time of the check.
    pub timestamp: String,
    pub health: HealthVerdict,
}

/// Error body returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

impl From<&InvocationError> for ErrorEnvelope {
    fn from(err: &InvocationError) -> Self {
        Self {
            error: err.kind().label().to_string(),
            message: err.to_string(),
        }
    }
}

/// Transport-neutral invocation result: an HTTP-style status and JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: serde_json::Value,
}

impl InvocationResponse {
    pub fn ok(response: &HealthCheckResponse) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_value(response)?,
        })
    }

    pub fn from_error(err: &InvocationError) -> Self {
        let envelope = ErrorEnvelope::from(err);
        Self {
            status_code: err.kind().status_code(),
            body: serde_json::json!({
                "error": envelope.error,
                "message": envelope.message,
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_region_is_optional() {
        let request = HealthCheckRequest::from_json(r#"{"availability_zone": "us-east-1a"}"#).unwrap();
        assert_eq!(request, HealthCheckRequest::new("us-east-1a"));

        let request = HealthCheckRequest::from_json("{}").unwrap();
        assert!(request.availability_zone.is_none());
    }

    #[test]
    fn test_request_rejects_wrong_types() {
        let err = HealthCheckRequest::from_json(r#"{"availability_zone": 42}"#).unwrap_err();
        assert!(matches!(err, InvocationError::InvalidPayload(_)));
    }

    #[test]
    fn test_bad_request_envelope() {
        let response = InvocationResponse::from_error(&InvocationError::MissingAvailabilityZone);

        assert_eq!(response.status_code, 400);
        assert!(!response.is_success());
        assert_eq!(response.body["error"], "Bad request");
        insta::assert_snapshot!(
            response.body["message"].as_str().unwrap(),
            @"Missing required parameter: availability_zone"
        );
    }

    #[test]
    fn test_invocation_response_serializes_status_code() {
        let response = InvocationResponse::from_error(&InvocationError::MissingAvailabilityZone);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 400);
    }
}
