//! Vigil core: shared types, clock, configuration, errors, tracing, and constants.
//!
//! Every other Vigil crate depends on this one. It carries no audit logic of
//! its own.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;
pub mod tracing;
pub mod types;
