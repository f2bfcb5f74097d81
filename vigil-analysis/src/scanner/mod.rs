//! Scanner: deterministic recursive file discovery.

pub mod snapshot;
pub mod types;
pub mod walker;

pub use snapshot::{RepositorySnapshot, RepositoryStats};
pub use types::{FileFilter, ScanEntry};
pub use walker::walk;
