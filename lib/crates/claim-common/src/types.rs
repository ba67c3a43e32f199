use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies one in-flight asynchronous broker operation.
///
/// Created when the operation is started and never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct OperationHandle {
    pub service_id: String,
    pub plan_id: String,
    /// Opaque operation token returned by the broker when provisioning began.
    pub operation: String,
    pub instance_id: String,
}

impl OperationHandle {
    pub fn new(
        service_id: impl Into<String>,
        plan_id: impl Into<String>,
        operation: impl Into<String>,
        instance_id: impl Into<String>,
    ) -> Self {
        Self {
            service_id: service_id.into(),
            plan_id: plan_id.into(),
            operation: operation.into(),
            instance_id: instance_id.into(),
        }
    }
}

/// Body of a broker last-operation response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastOperationSnapshot {
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LastOperationSnapshot {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            description: None,
        }
    }
}

/// Last-operation states a broker may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastOperationState {
    InProgress,
    Succeeded,
    Failed,
}

impl LastOperationState {
    /// The exact string a broker puts on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for LastOperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reported state outside the known vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized last operation state {raw:?}")]
pub struct UnknownStateError {
    pub raw: String,
}

impl FromStr for LastOperationState {
    type Err = UnknownStateError;

    /// Case-insensitive; leading and trailing whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        [Self::InProgress, Self::Succeeded, Self::Failed]
            .into_iter()
            .find(|state| trimmed.eq_ignore_ascii_case(state.as_str()))
            .ok_or_else(|| UnknownStateError { raw: s.to_string() })
    }
}

/// Status marker visible on a service plan claim
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimStatus {
    ProvisioningAsync,
    Provisioned,
    Failed,
}

impl ClaimStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProvisioningAsync => "provisioning-async",
            Self::Provisioned => "provisioned",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the poller does with a state outside the known vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownStatePolicy {
    /// Treat like a failed query: log and retry with backoff.
    #[default]
    Retry,
    /// Stop polling without a verdict.
    Fail,
}
