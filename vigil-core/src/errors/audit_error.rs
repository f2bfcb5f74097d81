//! Top-level audit errors. Only these abort a run.

use std::path::PathBuf;

use super::error_code::{self, VigilErrorCode};
use super::{ConfigError, StorageError};

/// Fatal errors for an audit run. Everything else surfaces as a finding.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Repository root not found: {0}")]
    RepositoryMissing(PathBuf),

    #[error("Content directory not found: {0}")]
    ContentDirMissing(PathBuf),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl VigilErrorCode for AuditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RepositoryMissing(_) | Self::ContentDirMissing(_) => {
                error_code::PRECONDITION_FAILED
            }
            Self::Config(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
        }
    }
}
