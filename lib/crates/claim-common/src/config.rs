use std::time::Duration;

use serde::Deserialize;

use crate::types::UnknownStatePolicy;

/// Provision poller configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PollerConfig {
    /// Idle time between ticks (default: 5000)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// First delay after a failed tick; doubles per consecutive failure
    /// (default: the poll interval)
    #[serde(default)]
    pub error_backoff_ms: Option<u64>,

    /// Upper bound for the doubling error delay, never below the first delay
    /// (default: 60000)
    #[serde(default = "default_max_error_backoff_ms")]
    pub max_error_backoff_ms: u64,

    /// Give up after this many seconds without a terminal state (default: none)
    #[serde(default)]
    pub deadline_secs: Option<u64>,

    /// Handling of states outside the broker vocabulary (default: retry)
    #[serde(default)]
    pub unknown_state: UnknownStatePolicy,
}

fn default_poll_interval_ms() -> u64 {
    5_000
}

fn default_max_error_backoff_ms() -> u64 {
    60_000
}

impl PollerConfig {
    /// Zero-delay configuration for deterministic tests.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            poll_interval_ms: 0,
            error_backoff_ms: None,
            max_error_backoff_ms: 0,
            deadline_secs: None,
            unknown_state: UnknownStatePolicy::Retry,
        }
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn error_backoff(&self) -> Duration {
        self.error_backoff_ms
            .map_or_else(|| self.poll_interval(), Duration::from_millis)
    }

    #[must_use]
    pub fn max_error_backoff(&self) -> Duration {
        Duration::from_millis(self.max_error_backoff_ms).max(self.error_backoff())
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            error_backoff_ms: None,
            max_error_backoff_ms: default_max_error_backoff_ms(),
            deadline_secs: None,
            unknown_state: UnknownStatePolicy::default(),
        }
    }
}
