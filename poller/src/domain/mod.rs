//! Domain layer — pure types and decisions.
//!
//! This module has zero imports from `crate::infra`, `crate::application`
//! or `tokio`. Nothing here suspends or sleeps.

pub mod error;
pub mod outcome;
pub mod retry;
pub mod status;

pub use error::{SinkClosedError, TickError, UnknownStateError};
pub use outcome::{InconclusiveReason, OperationOutcome, PollResult, ProgressUpdate};
pub use retry::Backoff;
pub use status::classify;
