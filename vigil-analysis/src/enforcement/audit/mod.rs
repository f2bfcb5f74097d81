//! Audit: grading a run and reading the trend series.

pub mod grading;
pub mod trends;
pub mod types;

pub use grading::SeverityCounts;
pub use trends::{stale_documents, TrendAnalyzer};
pub use types::{AuditRun, RecurringIssue, RecurrenceKind, Regression, RegressionKind, TrendAnalysis, WeeklyRollup};
