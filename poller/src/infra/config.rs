//! Environment configuration loading.
//!
//! Each [`PollerConfig`] field maps to `CLAIM_POLLER_<FIELD>`:
//!   - `CLAIM_POLLER_POLL_INTERVAL_MS`     (default `5000`)
//!   - `CLAIM_POLLER_ERROR_BACKOFF_MS`     (default: the poll interval)
//!   - `CLAIM_POLLER_MAX_ERROR_BACKOFF_MS` (default `60000`)
//!   - `CLAIM_POLLER_DEADLINE_SECS`        (optional)
//!   - `CLAIM_POLLER_UNKNOWN_STATE`        (`retry` or `fail`, default `retry`)

use anyhow::{Context, Result};
use claim_common::PollerConfig;

pub const ENV_PREFIX: &str = "CLAIM_POLLER_";

/// Load configuration from the process environment.
///
/// # Errors
///
/// Returns an error if a variable is set but cannot be parsed.
pub fn from_env() -> Result<PollerConfig> {
    envy::prefixed(ENV_PREFIX)
        .from_env()
        .context("failed to load poller config from CLAIM_POLLER_* env vars")
}

/// Load configuration from explicit `(name, value)` pairs.
///
/// # Errors
///
/// Returns an error if a value cannot be parsed.
pub fn from_pairs<I>(pairs: I) -> Result<PollerConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::prefixed(ENV_PREFIX)
        .from_iter(pairs)
        .context("failed to load poller config from CLAIM_POLLER_* pairs")
}
