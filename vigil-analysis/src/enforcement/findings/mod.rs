//! Finding & severity model.

pub mod details;
pub mod routing;
pub mod types;

pub use details::{bounded_list, format_bytes, signed};
pub use routing::{bucket_for, route_for, ActionRoute, CategoryRoute};
pub use types::{AutoFix, Category, CheckOutcome, Finding, FixAction, Severity};
