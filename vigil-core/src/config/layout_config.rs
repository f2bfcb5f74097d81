//! Repository layout configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Where things live inside the audited repository.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LayoutConfig {
    /// Content directory holding Markdown documents. Default: "kb".
    pub content_dir: Option<String>,
    /// Memory directory. Default: "memory".
    pub memory_dir: Option<String>,
    /// Scripts directory. Default: "scripts".
    pub scripts_dir: Option<String>,
    /// Index document, relative to the content directory. Default: "_index.json".
    pub index_file: Option<String>,
    /// Topic discovery document. Default: "_topics.json".
    pub topics_file: Option<String>,
    /// Keyword discovery document. Default: "_keywords.json".
    pub keywords_file: Option<String>,
    /// Allowed top-level directories under the content directory.
    /// Empty disables the structure check.
    #[serde(default)]
    pub allowed_dirs: Vec<String>,
}

impl LayoutConfig {
    pub fn effective_content_dir(&self) -> &str {
        self.content_dir.as_deref().unwrap_or(constants::DEFAULT_CONTENT_DIR)
    }

    pub fn effective_memory_dir(&self) -> &str {
        self.memory_dir.as_deref().unwrap_or(constants::DEFAULT_MEMORY_DIR)
    }

    pub fn effective_scripts_dir(&self) -> &str {
        self.scripts_dir.as_deref().unwrap_or(constants::DEFAULT_SCRIPTS_DIR)
    }

    pub fn effective_index_file(&self) -> &str {
        self.index_file.as_deref().unwrap_or(constants::DEFAULT_INDEX_FILE)
    }

    pub fn effective_topics_file(&self) -> &str {
        self.topics_file.as_deref().unwrap_or(constants::DEFAULT_TOPICS_FILE)
    }

    pub fn effective_keywords_file(&self) -> &str {
        self.keywords_file.as_deref().unwrap_or(constants::DEFAULT_KEYWORDS_FILE)
    }
}
