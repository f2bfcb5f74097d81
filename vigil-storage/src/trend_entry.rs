//! One calendar day of repository statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use vigil_core::types::Grade;

/// A day's summary statistics. `date` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendEntry {
    pub date: NaiveDate,
    pub kb_file_count: u64,
    pub kb_size_bytes: u64,
    pub memory_file_count: u64,
    pub memory_size_bytes: u64,
    pub script_count: u64,
    pub critical_count: u32,
    pub warning_count: u32,
    pub grade: Grade,
}

/// On-disk layout of the trend store: `{ "entries": [...] }`, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendFile {
    #[serde(default)]
    pub entries: Vec<TrendEntry>,
}
