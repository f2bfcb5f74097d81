//! Notification sink configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the operator notification.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NotifyConfig {
    /// Send notifications at all. Default: true.
    pub enabled: Option<bool>,
    /// Credentials file. Default: `<state_dir>/notify.json`.
    pub credentials_path: Option<String>,
    /// API base URL. Default: "https://api.telegram.org".
    pub api_base: Option<String>,
    /// Request timeout in seconds. Default: 10.
    pub timeout_secs: Option<u64>,
}

impl NotifyConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or(constants::DEFAULT_NOTIFY_API_BASE)
    }

    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs
            .unwrap_or(constants::DEFAULT_NOTIFY_TIMEOUT_SECS)
    }
}
