//! Type-safe identifier newtypes for AZ health checks.
//!
//! These types keep zone names, regions and request IDs from being mixed up
//! at call sites that take several plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique request ID for correlating the log lines of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Region inference failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot infer region from availability zone '{zone}'; supply the region explicitly")]
pub struct RegionInferenceError {
    pub zone: String,
}

/// Availability zone name, e.g. `us-east-1a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AzName(String);

impl AzName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Infer the region by stripping the trailing zone letter.
    ///
    /// `us-east-1a` becomes `us-east-1`. This follows the provider's naming
    /// convention and is not a guarantee; zone IDs such as `use1-az1` or
    /// other names that do not end in a letter are rejected.
    pub fn infer_region(&self) -> Result<Region, RegionInferenceError> {
        let mut chars = self.0.chars();
        match chars.next_back() {
            Some(letter) if letter.is_ascii_alphabetic() && !chars.as_str().is_empty() => {
                Ok(Region::new(chars.as_str()))
            }
            _ => Err(RegionInferenceError {
                zone: self.0.clone(),
            }),
        }
    }
}

impl fmt::Display for AzName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AzName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AzName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Cloud region name, e.g. `us-east-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Region {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id() {
        let id1 = RequestId::new();
        let id2 = RequestId::from_string("req-1");

        assert_ne!(id1, id2);
        assert_eq!(id2.as_str(), "req-1");
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_infer_region_strips_zone_letter() {
        let zone = AzName::new("us-east-1a");
        assert_eq!(zone.infer_region().unwrap(), Region::new("us-east-1"));

        let local = AzName::new("us-west-2-lax-1b");
        assert_eq!(local.infer_region().unwrap().as_str(), "us-west-2-lax-1");
    }

    #[test]
    fn test_infer_region_rejects_zone_ids() {
        let err = AzName::new("use1-az1").infer_region().unwrap_err();
        assert_eq!(err.zone, "use1-az1");
        assert!(err.to_string().contains("supply the region explicitly"));
    }

    #[test]
    fn test_infer_region_rejects_single_letter() {
        assert!(AzName::new("a").infer_region().is_err());
        assert!(AzName::new("").infer_region().is_err());
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&AzName::new("eu-west-1c")).unwrap();
        assert_eq!(json, "\"eu-west-1c\"");
        assert_eq!(Region::from("eu-west-1").to_string(), "eu-west-1");
    }
}
