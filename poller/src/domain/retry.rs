//! Delay schedule for consecutive failed ticks.

use std::time::Duration;

use claim_common::PollerConfig;

/// Doubling delay, capped, reset by any successful classification.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    failures: u32,
}

impl Backoff {
    #[must_use]
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max,
            failures: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &PollerConfig) -> Self {
        Self::new(config.error_backoff(), config.max_error_backoff())
    }

    /// Record one more failure and return how long to wait before retrying.
    pub fn next_delay(&mut self) -> Duration {
        let exponent = self.failures.min(16);
        self.failures = self.failures.saturating_add(1);
        self.base.saturating_mul(1 << exponent).min(self.max)
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }

    #[must_use]
    pub fn failures(&self) -> u32 {
        self.failures
    }
}
