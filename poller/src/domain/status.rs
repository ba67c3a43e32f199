//! Maps a broker-reported state onto an [`OperationOutcome`].

use claim_common::LastOperationState;

use super::error::UnknownStateError;
use super::outcome::OperationOutcome;

/// Classify a raw last-operation state.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Errors
///
/// Returns [`UnknownStateError`] when `raw` is none of `"in progress"`,
/// `"succeeded"` or `"failed"`.
pub fn classify(raw: &str) -> Result<OperationOutcome, UnknownStateError> {
    raw.parse::<LastOperationState>().map(OperationOutcome::from)
}
