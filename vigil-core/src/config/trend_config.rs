//! Trend store configuration.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the trend store and its analytics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrendConfig {
    /// Maximum entries retained. Default: 90.
    pub max_entries: Option<usize>,
    /// Weekday of the weekly rollup ("sun", "friday", ...). Default: "sun".
    pub weekly_rollup_day: Option<String>,
    /// Documents untouched this many days are stale. Default: 30.
    pub stale_after_days: Option<u32>,
}

impl TrendConfig {
    pub fn effective_max_entries(&self) -> usize {
        self.max_entries.unwrap_or(constants::DEFAULT_MAX_TREND_ENTRIES)
    }

    /// Returns the rollup weekday, or `None` if the configured name does not parse.
    pub fn effective_weekly_rollup_day(&self) -> Option<Weekday> {
        self.weekly_rollup_day
            .as_deref()
            .unwrap_or(constants::DEFAULT_WEEKLY_ROLLUP_DAY)
            .parse::<Weekday>()
            .ok()
    }

    pub fn effective_stale_after_days(&self) -> u32 {
        self.stale_after_days
            .unwrap_or(constants::DEFAULT_STALE_AFTER_DAYS)
    }
}
