//! Regression, recurrence and weekly rollup analytics over the trend series.

use std::cmp::Reverse;
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

use vigil_core::config::TrendConfig;
use vigil_core::constants::{
    MEMORY_GROWTH_FLOOR_BYTES, MEMORY_GROWTH_RATIO, RECURRENCE_WINDOW,
    REGRESSION_WINDOW, ROLLUP_WINDOW, WARNING_JUMP_THRESHOLD,
};
use vigil_storage::TrendEntry;

use super::types::{
    RecurrenceKind, RecurringIssue, Regression, RegressionKind, TrendAnalysis, WeeklyRollup,
};
use crate::enforcement::findings::format_bytes;
use crate::scanner::RepositorySnapshot;

/// Days with criticals needed to call them recurring.
const RECURRING_CRITICAL_DAYS: usize = 2;
/// Grade changes within the window that count as instability.
const INSTABILITY_TRANSITIONS: usize = 3;
/// Mean warnings per entry above which warnings are chronic.
const CHRONIC_WARNING_MEAN: f64 = 3.0;
/// Document growth across the window that counts as runaway generation.
const RUNAWAY_FILE_GROWTH: u64 = 100;

/// Reads an ascending trend series. Holds no state between runs.
pub struct TrendAnalyzer {
    rollup_day: Weekday,
}

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self {
            rollup_day: Weekday::Sun,
        }
    }

    pub fn from_config(config: &TrendConfig) -> Self {
        Self {
            rollup_day: config.effective_weekly_rollup_day().unwrap_or(Weekday::Sun),
        }
    }

    pub fn rollup_day(&self) -> Weekday {
        self.rollup_day
    }

    /// Full analysis. `entries` must be ascending and already include today.
    pub fn analyze(&self, entries: &[TrendEntry], today: NaiveDate, stale: Vec<String>) -> TrendAnalysis {
        TrendAnalysis {
            regressions: self.regressions(entries),
            recurring: self.recurring(entries),
            rollup: self.weekly_rollup(entries, today, stale),
        }
    }

    /// Compare the two most recent entries.
    pub fn regressions(&self, entries: &[TrendEntry]) -> Vec<Regression> {
        let [prev, cur] = tail(entries, REGRESSION_WINDOW) else {
            return Vec::new();
        };
        let mut out = Vec::new();

        if cur.critical_count > prev.critical_count {
            out.push(Regression {
                kind: RegressionKind::CriticalIncrease,
                message: format!(
                    "Critical findings rose from {} to {}",
                    prev.critical_count, cur.critical_count
                ),
            });
        }
        if cur.warning_count > prev.warning_count.saturating_add(WARNING_JUMP_THRESHOLD) {
            out.push(Regression {
                kind: RegressionKind::WarningJump,
                message: format!(
                    "Warnings jumped from {} to {} (+{})",
                    prev.warning_count,
                    cur.warning_count,
                    cur.warning_count - prev.warning_count
                ),
            });
        }
        let (before, after) = (prev.memory_size_bytes, cur.memory_size_bytes);
        if before > 0
            && after >= MEMORY_GROWTH_FLOOR_BYTES
            && after as f64 > before as f64 * MEMORY_GROWTH_RATIO
        {
            out.push(Regression {
                kind: RegressionKind::MemoryGrowth,
                message: format!(
                    "Memory grew from {} to {} ({:.1}x)",
                    format_bytes(before),
                    format_bytes(after),
                    after as f64 / before as f64
                ),
            });
        }
        out
    }

    /// Patterns across the trailing recurrence window.
    pub fn recurring(&self, entries: &[TrendEntry]) -> Vec<RecurringIssue> {
        let window = tail(entries, RECURRENCE_WINDOW);
        let k = window.len();
        let mut out = Vec::new();
        if k == 0 {
            return out;
        }

        let critical_days = window.iter().filter(|e| e.critical_count > 0).count();
        if critical_days >= RECURRING_CRITICAL_DAYS {
            out.push(RecurringIssue {
                kind: RecurrenceKind::RecurringCriticals,
                message: format!("Recurring: criticals occurred {critical_days} times in the last {k} entries."),
            });
        }

        let transitions = window.windows(2).filter(|w| w[0].grade != w[1].grade).count();
        if transitions >= INSTABILITY_TRANSITIONS {
            out.push(RecurringIssue {
                kind: RecurrenceKind::GradeInstability,
                message: format!("Grade instability: {transitions} grade changes in the last {k} entries."),
            });
        }

        let mean = window.iter().map(|e| f64::from(e.warning_count)).sum::<f64>() / k as f64;
        if mean > CHRONIC_WARNING_MEAN {
            out.push(RecurringIssue {
                kind: RecurrenceKind::ChronicWarnings,
                message: format!("Chronic warnings: {mean:.1} per day over the last {k} entries."),
            });
        }

        if let (Some(first), Some(last)) = (window.first(), window.last()) {
            let growth = last.kb_file_count.saturating_sub(first.kb_file_count);
            if growth > RUNAWAY_FILE_GROWTH {
                out.push(RecurringIssue {
                    kind: RecurrenceKind::RunawayGeneration,
                    message: format!("Runaway generation: +{growth} documents over the last {k} entries."),
                });
            }
        }
        out
    }

    /// Rollup over the trailing entries, only on the rollup weekday.
    pub fn weekly_rollup(&self, entries: &[TrendEntry], today: NaiveDate, stale: Vec<String>) -> Option<WeeklyRollup> {
        if today.weekday() != self.rollup_day {
            return None;
        }
        let window = tail(entries, ROLLUP_WINDOW);
        let (first, last) = (window.first()?, window.last()?);
        let health = |e: &&TrendEntry| (e.grade, Reverse(e.critical_count), Reverse(e.warning_count));
        let best = window.iter().max_by_key(health)?;
        let worst = window.iter().min_by_key(health)?;

        let wide = |v: u64| i64::try_from(v).unwrap_or(i64::MAX);
        let delta = |a: u64, b: u64| wide(b).saturating_sub(wide(a));
        let deltas = vec![
            ("Documents", delta(first.kb_file_count, last.kb_file_count)),
            ("Content bytes", delta(first.kb_size_bytes, last.kb_size_bytes)),
            ("Memory files", delta(first.memory_file_count, last.memory_file_count)),
            ("Memory bytes", delta(first.memory_size_bytes, last.memory_size_bytes)),
            ("Scripts", delta(first.script_count, last.script_count)),
            ("Criticals", i64::from(last.critical_count) - i64::from(first.critical_count)),
            ("Warnings", i64::from(last.warning_count) - i64::from(first.warning_count)),
        ];

        Some(WeeklyRollup {
            from: first.date,
            to: last.date,
            best: (best.date, best.grade),
            worst: (worst.date, worst.grade),
            deltas,
            stale_documents: stale,
        })
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Documents not modified for `days` days, repo-relative and sorted.
pub fn stale_documents(snapshot: &RepositorySnapshot, now: DateTime<Utc>, days: u32) -> Vec<String> {
    let cutoff = SystemTime::from(now - Duration::days(i64::from(days)));
    let mut stale: Vec<String> = snapshot
        .documents()
        .filter(|doc| doc.modified.is_some_and(|m| m < cutoff))
        .map(|doc| snapshot.repo_relative(doc))
        .collect();
    stale.sort();
    stale
}

fn tail(entries: &[TrendEntry], n: usize) -> &[TrendEntry] {
    &entries[entries.len().saturating_sub(n)..]
}
