//! Recursive walk built on `ignore::WalkBuilder`.
//!
//! Hidden entries (names starting with `.`) are skipped and never descended
//! into. Ignore files are not consulted: the audit looks at what is on disk,
//! not at what git would track.

use std::path::Path;

use ignore::WalkBuilder;

use super::types::{normalize_separators, FileFilter, ScanEntry};

/// Walk `root` and return matching files sorted by relative path.
///
/// A missing root yields an empty list. Unreadable entries are logged and
/// skipped.
pub fn walk(root: &Path, filter: FileFilter) -> Vec<ScanEntry> {
    if !root.is_dir() {
        return Vec::new();
    }

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut entries = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if !filter.accepts(path) {
            continue;
        }
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping file without metadata");
                continue;
            }
        };
        let relative = path
            .strip_prefix(root)
            .map(normalize_separators)
            .unwrap_or_else(|_| path.display().to_string());
        entries.push(ScanEntry {
            path: path.to_path_buf(),
            relative,
            size: metadata.len(),
            modified: metadata.modified().ok(),
        });
    }
    entries.sort_by(|a, b| a.relative.cmp(&b.relative));
    entries
}
