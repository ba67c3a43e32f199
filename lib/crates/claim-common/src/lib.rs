pub mod config;
pub mod types;

pub use config::PollerConfig;
pub use types::*;
