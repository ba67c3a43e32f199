//! Asynchronous provisioning poller for service-broker claims.
//!
//! Tracks one in-flight "create service instance" operation until the broker
//! reports a terminal state, handing in-progress notifications to a consumer
//! one at a time along the way.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod application;
pub mod domain;
pub mod infra;

pub use application::ports::{OperationStatusSource, UpdateSink};
pub use application::services::provision::{ProvisionPoller, poll_provision_state};
pub use domain::{InconclusiveReason, OperationOutcome, PollResult, ProgressUpdate, classify};
pub use infra::handoff::{HandoffSender, UpdateReceiver};
pub use infra::task::spawn_provision_poller;
