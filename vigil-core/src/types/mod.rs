//! Shared value types.

pub mod collections;
pub mod grade;

pub use grade::Grade;
