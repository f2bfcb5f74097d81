//! Durable state location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

/// Where Vigil keeps its trend store, reports and credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StateConfig {
    /// State directory. Default: `~/.vigil`, or `<repo>/.vigil` without a home directory.
    pub dir: Option<String>,
}

impl StateConfig {
    /// Resolve the state directory against the repository root.
    pub fn effective_dir(&self, repo_root: &Path) -> PathBuf {
        match self.dir.as_deref() {
            Some(raw) => super::resolve_path(repo_root, raw),
            None => super::home_dir()
                .map(|h| h.join(constants::USER_DIR))
                .unwrap_or_else(|| repo_root.join(constants::USER_DIR)),
        }
    }
}
