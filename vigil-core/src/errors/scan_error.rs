//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur while reading repository files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File too large: {path} ({size} bytes, max {max})")]
    MaxFileSizeExceeded { path: PathBuf, size: u64, max: u64 },
}

impl VigilErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        error_code::SCAN_ERROR
    }
}
