//! Scheduled-job health document.

pub mod schedule;
pub mod types;

pub use schedule::Schedule;
pub use types::{JobHealthDocument, JobRecord};
