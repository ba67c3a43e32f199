//! Port trait definitions for the Application layer.
//!
//! Ports are the contracts the poller's collaborators must fulfil. Returned
//! futures are `Send` so a poller can run on a multi-threaded runtime.

use std::future::Future;

use anyhow::Result;
use claim_common::{LastOperationSnapshot, OperationHandle};
use tokio_util::sync::CancellationToken;

use crate::domain::{ProgressUpdate, SinkClosedError};

// ── Status Source Port ────────────────────────────────────────────────────────

/// Queries the broker for the state of one asynchronous operation.
///
/// A poller calls this sequentially, never concurrently, for a given handle.
pub trait OperationStatusSource {
    /// Fetch the current last-operation snapshot.
    ///
    /// Implementations may observe `cancel` to abort an in-flight request
    /// early; the poller races the call against the token either way.
    ///
    /// # Errors
    ///
    /// Any error is treated as transient and retried by the poller.
    fn query(
        &self,
        cancel: &CancellationToken,
        handle: &OperationHandle,
    ) -> impl Future<Output = Result<LastOperationSnapshot>> + Send;
}

// ── Update Sink Port ──────────────────────────────────────────────────────────

/// Receives progress notifications one at a time, in emission order.
pub trait UpdateSink {
    /// Hand `update` to the consumer.
    ///
    /// Resolves only once the consumer has accepted the update. Dropping the
    /// returned future before it resolves withdraws the offer.
    ///
    /// # Errors
    ///
    /// Returns [`SinkClosedError`] when no consumer will ever accept it.
    fn offer(
        &self,
        update: ProgressUpdate,
    ) -> impl Future<Output = Result<(), SinkClosedError>> + Send;
}
