//! Single-car elevator simulation: a dispatch-and-door controller, the
//! passenger lifecycle and the call queue, driven by discrete ticks.

pub mod config;
pub mod elevator;
pub mod error;
pub mod shared;
pub mod simulation;

pub use config::Config;
pub use elevator::ElevatorController;
pub use error::{ConfigError, SimError};
pub use shared::Snapshot;
