//! Auto-fix: deduplicate remedial actions, apply them, publish the result.

pub mod actions;
pub mod orchestrator;

pub use actions::{apply_action, fill_metadata, rebuild_index_fix, REBUILD_INDEX};
pub use orchestrator::{dedup_fixes, maintenance_message, FixOrchestrator, FixReport, FixResult, FixStatus};
