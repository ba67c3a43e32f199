//! Infrastructure layer — concrete adapters for the application ports and
//! the runtime glue that launches pollers.

pub mod config;
pub mod handoff;
pub mod task;
