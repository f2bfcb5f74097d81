//! Error handling for Vigil.
//! One error enum per subsystem, `thiserror` only.

pub mod audit_error;
pub mod check_error;
pub mod config_error;
pub mod error_code;
pub mod fix_error;
pub mod notify_error;
pub mod scan_error;
pub mod storage_error;

pub use audit_error::AuditError;
pub use check_error::CheckError;
pub use config_error::ConfigError;
pub use error_code::VigilErrorCode;
pub use fix_error::FixError;
pub use notify_error::NotifyError;
pub use scan_error::ScanError;
pub use storage_error::StorageError;
