//! One capture of the repository per run. Checks read this instead of walking.

use std::path::{Path, PathBuf};

use serde::Serialize;

use vigil_core::config::VigilConfig;
use vigil_core::tracing::metrics::SCAN_SPAN;

use super::types::{FileFilter, ScanEntry, DOCUMENT_EXTENSIONS, SCRIPT_EXTENSIONS};
use super::walker::walk;

/// File lists for the three audited areas of the repository.
#[derive(Debug, Clone)]
pub struct RepositorySnapshot {
    pub repo_root: PathBuf,
    pub content_root: PathBuf,
    pub memory_root: PathBuf,
    pub scripts_root: PathBuf,
    /// Every file under the content directory.
    pub content: Vec<ScanEntry>,
    /// Every file under the memory directory.
    pub memory: Vec<ScanEntry>,
    /// Script files under the scripts directory.
    pub scripts: Vec<ScanEntry>,
}

/// Size and count statistics persisted in the trend series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    pub kb_file_count: u64,
    pub kb_size_bytes: u64,
    pub memory_file_count: u64,
    pub memory_size_bytes: u64,
    pub script_count: u64,
}

impl RepositorySnapshot {
    /// Walk the content, memory and scripts directories of `repo_root`.
    pub fn capture(repo_root: &Path, config: &VigilConfig) -> Self {
        let _span = tracing::info_span!(SCAN_SPAN, root = %repo_root.display()).entered();
        let content_root = config.content_root(repo_root);
        let memory_root = config.memory_root(repo_root);
        let scripts_root = config.scripts_root(repo_root);

        let snapshot = Self {
            content: walk(&content_root, FileFilter::All),
            memory: walk(&memory_root, FileFilter::All),
            scripts: walk(&scripts_root, FileFilter::Extensions(SCRIPT_EXTENSIONS)),
            repo_root: repo_root.to_path_buf(),
            content_root,
            memory_root,
            scripts_root,
        };
        tracing::debug!(
            content = snapshot.content.len(),
            memory = snapshot.memory.len(),
            scripts = snapshot.scripts.len(),
            "snapshot captured"
        );
        snapshot
    }

    /// Markdown documents under the content directory.
    pub fn documents(&self) -> impl Iterator<Item = &ScanEntry> {
        let docs = FileFilter::Extensions(DOCUMENT_EXTENSIONS);
        self.content.iter().filter(move |e| docs.accepts(&e.path))
    }

    pub fn document_count(&self) -> usize {
        self.documents().count()
    }

    /// Content, memory and script files, in that order.
    pub fn all_files(&self) -> impl Iterator<Item = &ScanEntry> {
        self.content
            .iter()
            .chain(self.memory.iter())
            .chain(self.scripts.iter())
    }

    /// Path of `entry` relative to the repository root.
    pub fn repo_relative(&self, entry: &ScanEntry) -> String {
        entry.relative_to(&self.repo_root)
    }

    pub fn stats(&self) -> RepositoryStats {
        RepositoryStats {
            kb_file_count: self.document_count() as u64,
            kb_size_bytes: self.content.iter().map(|e| e.size).sum(),
            memory_file_count: self.memory.len() as u64,
            memory_size_bytes: self.memory.iter().map(|e| e.size).sum(),
            script_count: self.scripts.len() as u64,
        }
    }
}
