//! Loading index documents.
//!
//! Missing documents are `Ok(None)`. Unparseable ones are
//! `CheckError::CorruptInput`, which the checks surface as Critical.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::de::DeserializeOwned;

use vigil_core::errors::{CheckError, ScanError};

/// Read and parse a JSON document.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CheckError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ScanError::IoError {
                path: path.to_path_buf(),
                source: e,
            }
            .into())
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| CheckError::CorruptInput {
            what: path.display().to_string(),
            message: e.to_string(),
        })
}

/// Normalize an index entry to a content-relative `/` path.
///
/// Accepts `./a.md`, `a\b.md` and entries prefixed with the content
/// directory name (`kb/a.md`).
pub fn normalize_entry(entry: &str, content_dir: &str) -> String {
    let mut path = entry.trim().replace('\\', "/");
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }
    let prefix = format!("{}/", content_dir.trim_end_matches('/'));
    if let Some(rest) = path.strip_prefix(&prefix) {
        path = rest.to_string();
    }
    path
}

/// Normalized set of paths referenced by an index structure.
#[derive(Debug, Clone, Default)]
pub struct IndexSet {
    paths: FxHashSet<String>,
}

impl IndexSet {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a String>, content_dir: &str) -> Self {
        Self {
            paths: entries
                .into_iter()
                .map(|e| normalize_entry(e, content_dir))
                .collect(),
        }
    }

    pub fn contains(&self, relative: &str) -> bool {
        self.paths.contains(relative)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::ContentIndex;

    #[test]
    fn missing_is_none_and_garbage_is_corrupt() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("_index.json");
        assert!(load_json::<ContentIndex>(&path).unwrap().is_none());

        std::fs::write(&path, "{ totalFiles: ").unwrap();
        let err = load_json::<ContentIndex>(&path).unwrap_err();
        assert!(matches!(err, CheckError::CorruptInput { .. }));

        std::fs::write(&path, r#"{"totalFiles": 2, "files": ["a.md", "b.md"]}"#).unwrap();
        let index = load_json::<ContentIndex>(&path).unwrap().unwrap();
        assert_eq!(index.total_files, 2);
        assert!(index.generated_at.is_none());
    }

    #[test]
    fn entries_normalize() {
        assert_eq!(normalize_entry("./guides/a.md", "kb"), "guides/a.md");
        assert_eq!(normalize_entry("kb/guides/a.md", "kb"), "guides/a.md");
        assert_eq!(normalize_entry("guides\\a.md", "kb"), "guides/a.md");
        assert_eq!(normalize_entry("kbx/a.md", "kb"), "kbx/a.md");
    }
}
