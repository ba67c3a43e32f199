//! Application layer — port trait definitions and the polling use case.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`.

pub mod ports;
pub mod services;

pub use ports::{OperationStatusSource, UpdateSink};
