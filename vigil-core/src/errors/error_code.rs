//! VigilErrorCode trait: stable error codes for logs and exit messages.

/// Every error enum implements this to expose a structured code string.
pub trait VigilErrorCode {
    /// Returns the error code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const CHECK_FAILED: &str = "CHECK_FAILED";
pub const CORRUPT_INPUT: &str = "CORRUPT_INPUT";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const STORE_CORRUPT: &str = "STORE_CORRUPT";
pub const LOCK_FAILED: &str = "LOCK_FAILED";
pub const FIX_FAILED: &str = "FIX_FAILED";
pub const COMMAND_TIMEOUT: &str = "COMMAND_TIMEOUT";
pub const VCS_ERROR: &str = "VCS_ERROR";
pub const NOTIFY_ERROR: &str = "NOTIFY_ERROR";
pub const PRECONDITION_FAILED: &str = "PRECONDITION_FAILED";
