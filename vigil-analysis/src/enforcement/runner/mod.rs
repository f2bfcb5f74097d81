//! Check runner: executes the battery in order and isolates failures.

pub mod orchestrator;
pub mod types;

pub use orchestrator::CheckRunner;
pub use types::{CheckTiming, RunnerOutput};
