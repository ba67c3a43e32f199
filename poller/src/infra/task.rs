//! Launches a poller as its own tokio task.

use std::sync::Arc;

use claim_common::{OperationHandle, PollerConfig};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::application::ports::OperationStatusSource;
use crate::application::services::provision::poll_provision_state;
use crate::domain::PollResult;
use crate::infra::handoff::{self, UpdateReceiver};

/// Spawn a poller for `handle` and return its result handle and update stream.
///
/// The caller owns both halves: awaiting the `JoinHandle` yields the
/// authoritative result, while the receiver streams progress notifications.
/// The poller stays throttled until the receiver takes each update.
pub fn spawn_provision_poller<S>(
    cancel: CancellationToken,
    handle: OperationHandle,
    source: Arc<S>,
    config: PollerConfig,
) -> (JoinHandle<PollResult>, UpdateReceiver)
where
    S: OperationStatusSource + Send + Sync + 'static,
{
    let (sink, updates) = handoff::channel();
    let span = tracing::info_span!(
        "provision_poller",
        instance_id = %handle.instance_id,
        operation = %handle.operation
    );
    let task = tokio::spawn(
        async move { poll_provision_state(&cancel, &handle, source.as_ref(), &sink, &config).await }
            .instrument(span),
    );
    (task, updates)
}
