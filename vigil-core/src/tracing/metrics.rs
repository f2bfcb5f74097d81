//! Span names shared by every Vigil subsystem.
//!
//! Keeping the names in one place lets log queries target the same span
//! across crates. Field names inside the spans stay literal (`check`,
//! `duration_ms`, `files`, `entries`, `grade`).

/// Runner: one span per executed check.
pub const CHECK_SPAN: &str = "vigil.check";

/// Scanner: snapshot capture.
pub const SCAN_SPAN: &str = "vigil.scan";

/// Trend store: load, upsert and save.
pub const TREND_SPAN: &str = "vigil.trends";

/// Fix orchestrator: apply and publish.
pub const FIX_SPAN: &str = "vigil.fixes";

/// Engine: a whole audit run.
pub const AUDIT_SPAN: &str = "vigil.audit";
