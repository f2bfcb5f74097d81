//! Storage errors for the trend store and report archive.

use std::path::PathBuf;

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur while persisting or loading durable state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Trend store {path} is corrupt: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("Could not lock {path}: {message}")]
    LockFailed { path: PathBuf, message: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

impl VigilErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Corrupt { .. } => error_code::STORE_CORRUPT,
            Self::LockFailed { .. } => error_code::LOCK_FAILED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
