//! Vigil storage: the trend store and the report archive.
//!
//! Both live under the state directory as plain files. Every write goes
//! through [`atomic::atomic_write`]. A trend store load and its save happen
//! under one exclusive lock on a sidecar lock file.

pub mod atomic;
pub mod report_archive;
pub mod retention;
pub mod trend_entry;
pub mod trend_store;

pub use report_archive::ReportArchive;
pub use retention::{apply_retention, RetentionPolicy, RetentionReport};
pub use trend_entry::{TrendEntry, TrendFile};
pub use trend_store::{CorruptionNotice, TrendGuard, TrendLock, TrendStore};
