//! The provision polling state machine.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//!
//! One tick: query the source, classify the snapshot, then either hand a
//! [`ProgressUpdate`] to the sink and wait, or stop with a [`PollResult`].
//! Every suspension point (query, handoff, idle wait) races against the
//! cancellation token and the optional deadline.

use std::future::Future;
use std::time::Duration;

use claim_common::{LastOperationSnapshot, OperationHandle, PollerConfig, UnknownStatePolicy};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{OperationStatusSource, UpdateSink};
use crate::domain::{
    Backoff, InconclusiveReason, OperationOutcome, PollResult, ProgressUpdate, SinkClosedError,
    TickError, UnknownStateError, classify,
};

/// What a completed tick asks the loop to do next.
enum Step {
    Wait(Duration),
    Done(PollResult),
}

/// Polls one asynchronous provisioning operation until it stops.
///
/// Borrows all collaborators; see [`poll_provision_state`] for the usual
/// entry point.
pub struct ProvisionPoller<'a, S, K> {
    cancel: &'a CancellationToken,
    handle: &'a OperationHandle,
    source: &'a S,
    sink: &'a K,
    config: &'a PollerConfig,
    backoff: Backoff,
    deadline: Option<Instant>,
}

impl<'a, S, K> ProvisionPoller<'a, S, K>
where
    S: OperationStatusSource + Sync,
    K: UpdateSink + Sync,
{
    #[must_use]
    pub fn new(
        cancel: &'a CancellationToken,
        handle: &'a OperationHandle,
        source: &'a S,
        sink: &'a K,
        config: &'a PollerConfig,
    ) -> Self {
        Self {
            cancel,
            handle,
            source,
            sink,
            config,
            backoff: Backoff::from_config(config),
            deadline: None,
        }
    }

    /// Run until a terminal state, cancellation, or the deadline.
    pub async fn run(mut self) -> PollResult {
        // A deadline too far out to represent is no deadline at all.
        self.deadline = self
            .config
            .deadline()
            .and_then(|d| Instant::now().checked_add(d));

        let result = self.poll_loop().await.unwrap_or_else(PollResult::Inconclusive);
        match &result {
            PollResult::Inconclusive(reason) => tracing::info!(
                instance_id = %self.handle.instance_id,
                %reason,
                "stopped polling without a verdict"
            ),
            PollResult::Succeeded | PollResult::Failed { .. } => tracing::info!(
                instance_id = %self.handle.instance_id,
                claim_status = ?result.claim_status(),
                "asynchronous provisioning finished"
            ),
        }
        result
    }

    async fn poll_loop(&mut self) -> Result<PollResult, InconclusiveReason> {
        loop {
            if self.cancel.is_cancelled() {
                return Err(InconclusiveReason::Cancelled);
            }
            if self.deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(InconclusiveReason::DeadlineExceeded);
            }
            match self.tick().await? {
                Step::Done(result) => return Ok(result),
                Step::Wait(delay) => self.idle(delay).await?,
            }
        }
    }

    async fn tick(&mut self) -> Result<Step, InconclusiveReason> {
        let queried = self.guard(self.source.query(self.cancel, self.handle)).await?;

        let (outcome, description) = match queried
            .map_err(TickError::Query)
            .and_then(|snapshot| classify_snapshot(snapshot).map_err(TickError::from))
        {
            Ok(classified) => classified,
            Err(TickError::UnknownState(err))
                if self.config.unknown_state == UnknownStatePolicy::Fail =>
            {
                tracing::warn!(
                    instance_id = %self.handle.instance_id,
                    raw_state = %err.raw,
                    "broker reported an unrecognized state, giving up"
                );
                return Err(InconclusiveReason::UnrecognizedState { raw: err.raw });
            }
            Err(err) => {
                let delay = self.backoff.next_delay();
                tracing::warn!(
                    instance_id = %self.handle.instance_id,
                    failures = self.backoff.failures(),
                    retry_in_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "last operation tick failed, retrying"
                );
                return Ok(Step::Wait(delay));
            }
        };
        self.backoff.reset();

        tracing::debug!(
            instance_id = %self.handle.instance_id,
            operation = %self.handle.operation,
            ?outcome,
            "polled last operation"
        );

        Ok(match outcome {
            OperationOutcome::InProgress => {
                let update = ProgressUpdate::in_progress(description);
                self.guard(self.sink.offer(update))
                    .await?
                    .map_err(|SinkClosedError| InconclusiveReason::SinkClosed)?;
                Step::Wait(self.config.poll_interval())
            }
            OperationOutcome::Succeeded => Step::Done(PollResult::Succeeded),
            OperationOutcome::Failed => Step::Done(PollResult::Failed { description }),
        })
    }

    async fn idle(&self, delay: Duration) -> Result<(), InconclusiveReason> {
        if delay.is_zero() {
            // Keep a zero-delay loop from starving the runtime.
            tokio::task::yield_now().await;
            return Ok(());
        }
        self.guard(tokio::time::sleep(delay)).await
    }

    /// Race `fut` against cancellation and the deadline.
    async fn guard<F: Future>(&self, fut: F) -> Result<F::Output, InconclusiveReason> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(InconclusiveReason::Cancelled),
            () = expire(self.deadline) => Err(InconclusiveReason::DeadlineExceeded),
            out = fut => Ok(out),
        }
    }
}

fn classify_snapshot(
    snapshot: LastOperationSnapshot,
) -> Result<(OperationOutcome, Option<String>), UnknownStateError> {
    let outcome = classify(&snapshot.state)?;
    Ok((outcome, snapshot.description))
}

async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Poll the operation identified by `handle` until it stops.
///
/// Emits one [`ProgressUpdate`] through `sink` for every tick that reads
/// "in progress", blocking until the consumer accepts it, and returns the
/// terminal outcome separately. A terminal outcome is never emitted.
pub async fn poll_provision_state<S, K>(
    cancel: &CancellationToken,
    handle: &OperationHandle,
    source: &S,
    sink: &K,
    config: &PollerConfig,
) -> PollResult
where
    S: OperationStatusSource + Sync,
    K: UpdateSink + Sync,
{
    ProvisionPoller::new(cancel, handle, source, sink, config)
        .run()
        .await
}
