//! Notification sink errors.

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur while delivering the operator notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Credentials file {path} is unreadable: {message}")]
    Credentials { path: String, message: String },

    #[error("Notification request failed: {0}")]
    Request(String),

    #[error("Notification rejected with HTTP {status}")]
    Rejected { status: u16 },
}

impl VigilErrorCode for NotifyError {
    fn error_code(&self) -> &'static str {
        error_code::NOTIFY_ERROR
    }
}
