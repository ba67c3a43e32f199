//! Tests for a poller running as its own task and handing updates through
//! the zero-capacity channel.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use claim_common::{ClaimStatus, PollerConfig};
use claim_poller::infra::handoff;
use claim_poller::{
    InconclusiveReason, PollResult, ProgressUpdate, UpdateReceiver, poll_provision_state,
    spawn_provision_poller,
};
use tokio_util::sync::CancellationToken;

use crate::mocks::{ScriptedSource, handle, in_progress, succeeded};

/// Receive one update or fail the test after a generous timeout.
async fn accept_status(updates: &mut UpdateReceiver, expected: ClaimStatus) -> ProgressUpdate {
    const TIMEOUT: Duration = Duration::from_secs(31);
    let update = tokio::time::timeout(TIMEOUT, updates.recv())
        .await
        .unwrap_or_else(|_| panic!("no status update after {TIMEOUT:?}"))
        .expect("update channel closed early");
    assert_eq!(update.status(), expected, "unexpected status");
    update
}

#[tokio::test(start_paused = true)]
async fn two_in_progress_then_succeeded() {
    let source = Arc::new(ScriptedSource::new([in_progress(), in_progress(), succeeded()]));
    let (sink, mut updates) = handoff::channel();

    // Keep one sender here so `recv` can only time out, never see a closed channel.
    let task = tokio::spawn({
        let source = Arc::clone(&source);
        let sink = sink.clone();
        async move {
            let cancel = CancellationToken::new();
            let handle = handle();
            let config = PollerConfig::immediate();
            poll_provision_state(&cancel, &handle, source.as_ref(), &sink, &config).await
        }
    });

    accept_status(&mut updates, ClaimStatus::ProvisioningAsync).await;
    accept_status(&mut updates, ClaimStatus::ProvisioningAsync).await;

    let extra = tokio::time::timeout(Duration::from_secs(3), updates.recv()).await;
    assert!(
        extra.is_err(),
        "received {extra:?} on update channel, expected nothing"
    );

    let result = task.await.expect("poller task");
    assert_eq!(result, PollResult::Succeeded);
    assert_eq!(source.calls(), 3);
    drop(sink);
}

#[tokio::test(start_paused = true)]
async fn no_query_while_an_update_is_unaccepted() {
    let source = Arc::new(ScriptedSource::new([in_progress()]));
    let cancel = CancellationToken::new();
    let (task, mut updates) = spawn_provision_poller(
        cancel.clone(),
        handle(),
        Arc::clone(&source),
        PollerConfig::immediate(),
    );

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(source.calls(), 1, "poller must block on the first handoff");

    accept_status(&mut updates, ClaimStatus::ProvisioningAsync).await;
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(source.calls(), 2, "exactly one more query per accepted update");

    cancel.cancel();
    assert_eq!(
        task.await.expect("poller task"),
        PollResult::Inconclusive(InconclusiveReason::Cancelled)
    );
}

#[tokio::test(start_paused = true)]
async fn cancellation_while_blocked_on_handoff_returns_promptly() {
    let source = Arc::new(ScriptedSource::new([in_progress()]));
    let cancel = CancellationToken::new();
    let (task, mut updates) = spawn_provision_poller(
        cancel.clone(),
        handle(),
        Arc::clone(&source),
        PollerConfig::immediate(),
    );

    tokio::time::sleep(Duration::from_secs(1)).await;
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("poller did not stop after cancellation")
        .expect("poller task");
    assert_eq!(result, PollResult::Inconclusive(InconclusiveReason::Cancelled));
    assert_eq!(source.calls(), 1, "no queries after cancellation");
    assert_eq!(updates.recv().await, None, "withdrawn update must not arrive");
}

#[tokio::test(start_paused = true)]
async fn dropped_receiver_ends_polling() {
    let source = Arc::new(ScriptedSource::new([in_progress(), succeeded()]));
    let (task, updates) = spawn_provision_poller(
        CancellationToken::new(),
        handle(),
        Arc::clone(&source),
        PollerConfig::immediate(),
    );
    drop(updates);

    let result = task.await.expect("poller task");
    assert_eq!(result, PollResult::Inconclusive(InconclusiveReason::SinkClosed));
    assert_eq!(source.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_consumer_throttles_the_poller() {
    let source = Arc::new(ScriptedSource::new([
        in_progress(),
        in_progress(),
        in_progress(),
        succeeded(),
    ]));
    let (task, mut updates) = spawn_provision_poller(
        CancellationToken::new(),
        handle(),
        Arc::clone(&source),
        PollerConfig::immediate(),
    );

    for expected_calls in 1..=3 {
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(source.calls(), expected_calls);
        accept_status(&mut updates, ClaimStatus::ProvisioningAsync).await;
    }

    assert_eq!(task.await.expect("poller task"), PollResult::Succeeded);
    assert_eq!(source.calls(), 4);
}
