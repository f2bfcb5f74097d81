//! Content index and discovery structures produced by the external index tool.

pub mod loader;
pub mod types;

pub use loader::{load_json, normalize_entry, IndexSet};
pub use types::{ContentIndex, KeywordMap, TopicMap};
