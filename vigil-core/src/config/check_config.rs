//! Check thresholds and allow-lists.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the check battery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CheckConfig {
    /// Required header keys. Default: title, category, tags, summary.
    #[serde(default)]
    pub required_keys: Vec<String>,
    /// Trailing window in days for content-risk matching. Default: 7.
    pub content_risk_window_days: Option<u32>,
    /// Glob patterns (relative to the repository root) excluded from content-risk matching.
    #[serde(default)]
    pub content_risk_allowlist: Vec<String>,
    /// Document file names exempt from the naming convention.
    #[serde(default)]
    pub naming_exceptions: Vec<String>,
    /// Consecutive failures that open a job's circuit breaker. Default: 3.
    pub circuit_breaker_threshold: Option<u32>,
    /// Single-file bloat threshold in bytes. Default: 5 MiB.
    pub large_file_bytes: Option<u64>,
    /// Content directory budget in bytes. Default: 200 MiB.
    pub content_budget_bytes: Option<u64>,
    /// Memory directory budget in bytes. Default: 50 MiB.
    pub memory_budget_bytes: Option<u64>,
    /// Files above this size are not pattern-scanned. Default: 2 MiB.
    pub max_scan_bytes: Option<u64>,
    /// Job-health document path. Default: `<state_dir>/jobs-health.json`.
    pub job_health_path: Option<String>,
    /// Per-check time budget in seconds. Default: 30.
    pub check_budget_secs: Option<u64>,
}

impl CheckConfig {
    pub fn effective_required_keys(&self) -> Vec<String> {
        if self.required_keys.is_empty() {
            constants::DEFAULT_REQUIRED_KEYS
                .iter()
                .map(|k| k.to_string())
                .collect()
        } else {
            self.required_keys.clone()
        }
    }

    pub fn effective_content_risk_window_days(&self) -> u32 {
        self.content_risk_window_days
            .unwrap_or(constants::DEFAULT_CONTENT_RISK_WINDOW_DAYS)
    }

    pub fn effective_content_risk_allowlist(&self) -> Vec<String> {
        if self.content_risk_allowlist.is_empty() {
            vec![
                "**/AGENTS.md".to_string(),
                "**/SECURITY.md".to_string(),
                "**/health-audit*.md".to_string(),
            ]
        } else {
            self.content_risk_allowlist.clone()
        }
    }

    pub fn effective_naming_exceptions(&self) -> Vec<String> {
        if self.naming_exceptions.is_empty() {
            vec![
                "README.md".to_string(),
                "CHANGELOG.md".to_string(),
                "AGENTS.md".to_string(),
            ]
        } else {
            self.naming_exceptions.clone()
        }
    }

    pub fn effective_circuit_breaker_threshold(&self) -> u32 {
        self.circuit_breaker_threshold
            .unwrap_or(constants::DEFAULT_CIRCUIT_BREAKER_THRESHOLD)
    }

    pub fn effective_large_file_bytes(&self) -> u64 {
        self.large_file_bytes.unwrap_or(constants::DEFAULT_LARGE_FILE_BYTES)
    }

    pub fn effective_content_budget_bytes(&self) -> u64 {
        self.content_budget_bytes
            .unwrap_or(constants::DEFAULT_CONTENT_BUDGET_BYTES)
    }

    pub fn effective_memory_budget_bytes(&self) -> u64 {
        self.memory_budget_bytes
            .unwrap_or(constants::DEFAULT_MEMORY_BUDGET_BYTES)
    }

    pub fn effective_max_scan_bytes(&self) -> u64 {
        self.max_scan_bytes.unwrap_or(constants::DEFAULT_MAX_SCAN_BYTES)
    }

    pub fn effective_check_budget_secs(&self) -> u64 {
        self.check_budget_secs.unwrap_or(constants::DEFAULT_CHECK_BUDGET_SECS)
    }
}
