//! Scanner data types.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

/// Metadata for a single discovered file.
#[derive(Debug, Clone, Serialize)]
pub struct ScanEntry {
    /// Absolute (root-joined) path.
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated.
    pub relative: String,
    pub size: u64,
    #[serde(skip)]
    pub modified: Option<SystemTime>,
}

impl ScanEntry {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }

    /// True when the file was modified at or after `cutoff`.
    pub fn modified_since(&self, cutoff: SystemTime) -> bool {
        self.modified.is_some_and(|m| m >= cutoff)
    }

    /// Path relative to `base`, `/`-separated, falling back to `relative`.
    pub fn relative_to(&self, base: &Path) -> String {
        self.path
            .strip_prefix(base)
            .map(normalize_separators)
            .unwrap_or_else(|_| self.relative.clone())
    }
}

/// Which files a walk yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFilter {
    /// Every regular file.
    All,
    /// Files whose extension (case-insensitive) is in the list.
    Extensions(&'static [&'static str]),
}

impl FileFilter {
    pub fn accepts(&self, path: &Path) -> bool {
        match self {
            FileFilter::All => true,
            FileFilter::Extensions(exts) => path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| exts.iter().any(|x| x.eq_ignore_ascii_case(e))),
        }
    }
}

/// Markdown documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Files counted as scripts.
pub const SCRIPT_EXTENSIONS: &[&str] = &[
    "sh", "bash", "zsh", "py", "js", "mjs", "cjs", "ts", "rb", "pl", "ps1",
];

pub(crate) fn normalize_separators(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
