//! Operator notification: credentials and the HTTPS sink.
//!
//! Missing credentials mean "not configured" and are never an error.

pub mod credentials;
pub mod sink;

pub use credentials::{load_credentials, NotifyCredentials};
pub use sink::{NotificationSink, TelegramSink};
