pub mod report;
pub mod runner;
pub mod runner_tests;
pub mod traffic;

pub use runner::Command;
pub use runner::SimulationRunner;
