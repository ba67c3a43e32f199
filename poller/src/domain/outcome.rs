//! Outcome, notification and result types.

use std::fmt;

use claim_common::{ClaimStatus, LastOperationState};
use serde::Serialize;

/// Classification of one last-operation reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationOutcome {
    InProgress,
    Succeeded,
    Failed,
}

impl From<LastOperationState> for OperationOutcome {
    fn from(state: LastOperationState) -> Self {
        match state {
            LastOperationState::InProgress => Self::InProgress,
            LastOperationState::Succeeded => Self::Succeeded,
            LastOperationState::Failed => Self::Failed,
        }
    }
}

/// Emitted once per tick that classifies as in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    status: ClaimStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ProgressUpdate {
    /// An update carrying the `provisioning-async` marker.
    #[must_use]
    pub fn in_progress(description: Option<String>) -> Self {
        Self {
            status: ClaimStatus::ProvisioningAsync,
            description,
        }
    }

    #[must_use]
    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    /// Free-text description the broker attached to the reading, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl fmt::Display for ProgressUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{} ({description})", self.status),
            None => write!(f, "{}", self.status),
        }
    }
}

/// Why polling stopped without a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InconclusiveReason {
    Cancelled,
    DeadlineExceeded,
    /// The update consumer went away.
    SinkClosed,
    /// Broker reported a state outside the vocabulary under the `fail` policy.
    UnrecognizedState { raw: String },
}

impl fmt::Display for InconclusiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("cancelled"),
            Self::DeadlineExceeded => f.write_str("deadline exceeded"),
            Self::SinkClosed => f.write_str("update receiver closed"),
            Self::UnrecognizedState { raw } => write!(f, "unrecognized state {raw:?}"),
        }
    }
}

/// The authoritative answer returned once polling stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResult {
    Succeeded,
    Failed { description: Option<String> },
    Inconclusive(InconclusiveReason),
}

impl PollResult {
    /// Claim status to record for this result. `None` leaves the claim as is.
    #[must_use]
    pub fn claim_status(&self) -> Option<ClaimStatus> {
        match self {
            Self::Succeeded => Some(ClaimStatus::Provisioned),
            Self::Failed { .. } => Some(ClaimStatus::Failed),
            Self::Inconclusive(_) => None,
        }
    }
}
