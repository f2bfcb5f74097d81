//! Auto-fix errors.

use std::path::PathBuf;

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur while applying a single fix or publishing the result.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("Failed to spawn `{program}`: {message}")]
    Spawn { program: String, message: String },

    #[error("`{program}` exited with status {code}")]
    CommandFailed { program: String, code: i32 },

    #[error("`{program}` timed out after {timeout_secs}s")]
    Timeout { program: String, timeout_secs: u64 },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Version control error: {0}")]
    Vcs(String),
}

impl VigilErrorCode for FixError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::COMMAND_TIMEOUT,
            Self::Vcs(_) => error_code::VCS_ERROR,
            _ => error_code::FIX_FAILED,
        }
    }
}
