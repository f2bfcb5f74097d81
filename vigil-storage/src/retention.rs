//! Retention for the trend series.
//!
//! The series keeps one entry per day and at most `max_entries` of them.
//! Eviction always drops the oldest dates first.

use serde::Serialize;

use vigil_core::constants;

use crate::trend_entry::TrendEntry;

/// Configurable retention cap.
#[derive(Debug, Clone)]
pub struct RetentionPolicy {
    /// Maximum entries kept (default 90).
    pub max_entries: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_entries: constants::DEFAULT_MAX_TREND_ENTRIES,
        }
    }
}

impl RetentionPolicy {
    pub fn new(max_entries: usize) -> Self {
        Self { max_entries }
    }
}

/// Report of what was evicted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetentionReport {
    pub evicted: usize,
    pub retained: usize,
}

/// Apply the retention cap to an ascending-by-date series.
pub fn apply_retention(entries: &mut Vec<TrendEntry>, policy: &RetentionPolicy) -> RetentionReport {
    let cap = policy.max_entries.max(1);
    let evicted = entries.len().saturating_sub(cap);
    if evicted > 0 {
        entries.drain(..evicted);
        tracing::debug!(evicted, retained = entries.len(), "trend retention applied");
    }
    RetentionReport {
        evicted,
        retained: entries.len(),
    }
}
