//! Audit run and trend analysis types.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use vigil_core::types::Grade;
use vigil_storage::TrendEntry;

use super::grading::SeverityCounts;
use crate::enforcement::findings::Finding;
use crate::enforcement::runner::CheckTiming;
use crate::scanner::RepositoryStats;

/// One invocation's results. Built once, then only read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRun {
    pub date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub repo_root: PathBuf,
    pub findings: Vec<Finding>,
    pub counts: SeverityCounts,
    pub grade: Grade,
    pub stats: RepositoryStats,
    /// Latest trend entry dated strictly before `date`.
    pub prior: Option<TrendEntry>,
    pub timings: Vec<CheckTiming>,
}

impl AuditRun {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: NaiveDate,
        generated_at: DateTime<Utc>,
        repo_root: PathBuf,
        findings: Vec<Finding>,
        stats: RepositoryStats,
        prior: Option<TrendEntry>,
        timings: Vec<CheckTiming>,
    ) -> Self {
        let counts = SeverityCounts::tally(&findings);
        Self {
            date,
            generated_at,
            repo_root,
            grade: counts.grade(),
            counts,
            findings,
            stats,
            prior,
            timings,
        }
    }

    /// The row this run contributes to the trend store.
    pub fn trend_entry(&self) -> TrendEntry {
        TrendEntry {
            date: self.date,
            kb_file_count: self.stats.kb_file_count,
            kb_size_bytes: self.stats.kb_size_bytes,
            memory_file_count: self.stats.memory_file_count,
            memory_size_bytes: self.stats.memory_size_bytes,
            script_count: self.stats.script_count,
            critical_count: self.counts.critical,
            warning_count: self.counts.warning,
            grade: self.grade,
        }
    }

    pub fn has_critical(&self) -> bool {
        self.counts.critical > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegressionKind {
    CriticalIncrease,
    WarningJump,
    MemoryGrowth,
}

/// A worsening between the two most recent entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Regression {
    pub kind: RegressionKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecurrenceKind {
    RecurringCriticals,
    GradeInstability,
    ChronicWarnings,
    RunawayGeneration,
}

/// A pattern across the trailing recurrence window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecurringIssue {
    pub kind: RecurrenceKind,
    pub message: String,
}

/// End-of-week summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRollup {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub best: (NaiveDate, Grade),
    pub worst: (NaiveDate, Grade),
    /// `(label, last - first)` over the window.
    pub deltas: Vec<(&'static str, i64)>,
    pub stale_documents: Vec<String>,
}

/// Everything read out of the trend series for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub regressions: Vec<Regression>,
    pub recurring: Vec<RecurringIssue>,
    pub rollup: Option<WeeklyRollup>,
}
