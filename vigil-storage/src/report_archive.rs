//! Date-named Markdown report archive.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use vigil_core::errors::StorageError;

use crate::atomic::atomic_write;

/// Reports live at `<dir>/health-YYYY-MM-DD.md`. A same-day write replaces
/// that day's report; other days are never touched.
#[derive(Debug, Clone)]
pub struct ReportArchive {
    dir: PathBuf,
}

impl ReportArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(format!("health-{}.md", date.format("%Y-%m-%d")))
    }

    /// Write the report for `date` atomically and return its path.
    pub fn write(&self, date: NaiveDate, report: &str) -> Result<PathBuf, StorageError> {
        let path = self.path_for(date);
        atomic_write(&path, report.as_bytes())?;
        tracing::info!(path = %path.display(), bytes = report.len(), "report written");
        Ok(path)
    }

    /// Read back the report for `date`, if one exists.
    pub fn read(&self, date: NaiveDate) -> Result<Option<String>, StorageError> {
        let path = self.path_for(date);
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }
}
