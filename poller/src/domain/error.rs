//! Typed errors raised while polling.

use thiserror::Error;

pub use claim_common::UnknownStateError;

/// The consumer behind an [`UpdateSink`](crate::application::ports::UpdateSink)
/// is gone and will never accept another update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("update receiver closed")]
pub struct SinkClosedError;

/// A tick that produced no classification.
///
/// Both variants are retried under the default policy; neither is ever
/// delivered through the update sink.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("last operation query failed: {0:#}")]
    Query(anyhow::Error),

    #[error(transparent)]
    UnknownState(#[from] UnknownStateError),
}
