//! Enforcement: findings, checks, the runner, trend analytics, auto-fix and
//! reporters.

pub mod audit;
pub mod checks;
pub mod findings;
pub mod fixes;
pub mod reporters;
pub mod runner;
