//! Check errors. The runner downgrades every one of these into a Critical finding.

use super::error_code::{self, VigilErrorCode};
use super::ScanError;

/// Errors a single check can return instead of its outcome.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Corrupt input {what}: {message}")]
    CorruptInput { what: String, message: String },

    #[error("Version control error: {0}")]
    Vcs(String),

    #[error("Check panicked: {0}")]
    Panicked(String),

    #[error("{0}")]
    Internal(String),
}

impl VigilErrorCode for CheckError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::CorruptInput { .. } => error_code::CORRUPT_INPUT,
            Self::Vcs(_) => error_code::VCS_ERROR,
            Self::Panicked(_) | Self::Internal(_) => error_code::CHECK_FAILED,
        }
    }
}
