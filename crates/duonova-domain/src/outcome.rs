//! Request correlation and the final output triple

use crate::{ExtractionResult, StrategyDecision, ValidationReport};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Correlation id for one processing request (UUIDv7, time-ordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new time-ordered id
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
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

impl std::str::FromStr for RequestId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid request id '{}': {}", s, e))
    }
}

/// Decision, result and validation for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingOutcome {
    /// Caller-supplied or generated correlation id
    pub correlation_id: RequestId,

    /// Strategy that was chosen
    pub decision: StrategyDecision,

    /// What extraction produced
    pub result: ExtractionResult,

    /// Completeness verdict
    pub validation: ValidationReport,
}
