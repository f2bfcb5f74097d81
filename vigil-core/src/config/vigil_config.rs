//! Top-level Vigil configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    resolve_path, CheckConfig, FixConfig, LayoutConfig, NotifyConfig, StateConfig, TrendConfig,
};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`VIGIL_*`)
/// 3. Explicit config file (`--config`)
/// 4. Project config (`vigil.toml` in the repository root)
/// 5. User config (`~/.vigil/config.toml`)
/// 6. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VigilConfig {
    pub layout: LayoutConfig,
    pub checks: CheckConfig,
    pub trends: TrendConfig,
    pub fixes: FixConfig,
    pub notify: NotifyConfig,
    pub state: StateConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub state_dir: Option<String>,
    pub content_dir: Option<String>,
    pub notify_enabled: Option<bool>,
}

impl VigilConfig {
    /// Load configuration with layered resolution for the repository at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Project config
        let project_config_path = root.join(constants::PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Explicit config file must exist when given
        if let Some(path) = cli_overrides.and_then(|c| c.config_file.as_deref()) {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            Self::merge_toml_file(&mut config, path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &VigilConfig) -> Result<(), ConfigError> {
        if config.checks.content_risk_window_days == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "checks.content_risk_window_days".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.checks.circuit_breaker_threshold == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "checks.circuit_breaker_threshold".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.trends.max_entries == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "trends.max_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.trends.effective_weekly_rollup_day().is_none() {
            return Err(ConfigError::ValidationFailed {
                field: "trends.weekly_rollup_day".to_string(),
                message: "must be a weekday name such as \"sun\" or \"friday\"".to_string(),
            });
        }
        if config.fixes.command_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "fixes.command_timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for pattern in &config.checks.content_risk_allowlist {
            if pattern.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "checks.content_risk_allowlist".to_string(),
                    message: "entries must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    // ---- Resolved paths ----

    pub fn content_root(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(self.layout.effective_content_dir())
    }

    pub fn memory_root(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(self.layout.effective_memory_dir())
    }

    pub fn scripts_root(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(self.layout.effective_scripts_dir())
    }

    pub fn state_dir(&self, repo_root: &Path) -> PathBuf {
        self.state.effective_dir(repo_root)
    }

    pub fn trend_store_path(&self, repo_root: &Path) -> PathBuf {
        self.state_dir(repo_root).join(constants::TREND_STORE_FILE)
    }

    pub fn reports_dir(&self, repo_root: &Path) -> PathBuf {
        self.state_dir(repo_root).join(constants::REPORTS_DIR)
    }

    pub fn credentials_path(&self, repo_root: &Path) -> PathBuf {
        match self.notify.credentials_path.as_deref() {
            Some(raw) => resolve_path(repo_root, raw),
            None => self
                .state_dir(repo_root)
                .join(constants::DEFAULT_CREDENTIALS_FILE),
        }
    }

    pub fn job_health_path(&self, repo_root: &Path) -> PathBuf {
        match self.checks.job_health_path.as_deref() {
            Some(raw) => resolve_path(repo_root, raw),
            None => self
                .state_dir(repo_root)
                .join(constants::DEFAULT_JOB_HEALTH_FILE),
        }
    }

    /// Returns the user config path: `~/.vigil/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        super::home_dir().map(|h| h.join(constants::USER_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut VigilConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: VigilConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut VigilConfig, other: &VigilConfig) {
        // Layout
        if other.layout.content_dir.is_some() {
            base.layout.content_dir = other.layout.content_dir.clone();
        }
        if other.layout.memory_dir.is_some() {
            base.layout.memory_dir = other.layout.memory_dir.clone();
        }
        if other.layout.scripts_dir.is_some() {
            base.layout.scripts_dir = other.layout.scripts_dir.clone();
        }
        if other.layout.index_file.is_some() {
            base.layout.index_file = other.layout.index_file.clone();
        }
        if other.layout.topics_file.is_some() {
            base.layout.topics_file = other.layout.topics_file.clone();
        }
        if other.layout.keywords_file.is_some() {
            base.layout.keywords_file = other.layout.keywords_file.clone();
        }
        if !other.layout.allowed_dirs.is_empty() {
            base.layout.allowed_dirs = other.layout.allowed_dirs.clone();
        }

        // Checks
        if !other.checks.required_keys.is_empty() {
            base.checks.required_keys = other.checks.required_keys.clone();
        }
        if other.checks.content_risk_window_days.is_some() {
            base.checks.content_risk_window_days = other.checks.content_risk_window_days;
        }
        if !other.checks.content_risk_allowlist.is_empty() {
            base.checks.content_risk_allowlist = other.checks.content_risk_allowlist.clone();
        }
        if !other.checks.naming_exceptions.is_empty() {
            base.checks.naming_exceptions = other.checks.naming_exceptions.clone();
        }
        if other.checks.circuit_breaker_threshold.is_some() {
            base.checks.circuit_breaker_threshold = other.checks.circuit_breaker_threshold;
        }
        if other.checks.large_file_bytes.is_some() {
            base.checks.large_file_bytes = other.checks.large_file_bytes;
        }
        if other.checks.content_budget_bytes.is_some() {
            base.checks.content_budget_bytes = other.checks.content_budget_bytes;
        }
        if other.checks.memory_budget_bytes.is_some() {
            base.checks.memory_budget_bytes = other.checks.memory_budget_bytes;
        }
        if other.checks.max_scan_bytes.is_some() {
            base.checks.max_scan_bytes = other.checks.max_scan_bytes;
        }
        if other.checks.job_health_path.is_some() {
            base.checks.job_health_path = other.checks.job_health_path.clone();
        }
        if other.checks.check_budget_secs.is_some() {
            base.checks.check_budget_secs = other.checks.check_budget_secs;
        }

        // Trends
        if other.trends.max_entries.is_some() {
            base.trends.max_entries = other.trends.max_entries;
        }
        if other.trends.weekly_rollup_day.is_some() {
            base.trends.weekly_rollup_day = other.trends.weekly_rollup_day.clone();
        }
        if other.trends.stale_after_days.is_some() {
            base.trends.stale_after_days = other.trends.stale_after_days;
        }

        // Fixes
        if !other.fixes.index_command.is_empty() {
            base.fixes.index_command = other.fixes.index_command.clone();
        }
        if other.fixes.command_timeout_secs.is_some() {
            base.fixes.command_timeout_secs = other.fixes.command_timeout_secs;
        }
        if other.fixes.push.is_some() {
            base.fixes.push = other.fixes.push;
        }
        if other.fixes.remote.is_some() {
            base.fixes.remote = other.fixes.remote.clone();
        }
        if other.fixes.author_name.is_some() {
            base.fixes.author_name = other.fixes.author_name.clone();
        }
        if other.fixes.author_email.is_some() {
            base.fixes.author_email = other.fixes.author_email.clone();
        }

        // Notify
        if other.notify.enabled.is_some() {
            base.notify.enabled = other.notify.enabled;
        }
        if other.notify.credentials_path.is_some() {
            base.notify.credentials_path = other.notify.credentials_path.clone();
        }
        if other.notify.api_base.is_some() {
            base.notify.api_base = other.notify.api_base.clone();
        }
        if other.notify.timeout_secs.is_some() {
            base.notify.timeout_secs = other.notify.timeout_secs;
        }

        // State
        if other.state.dir.is_some() {
            base.state.dir = other.state.dir.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VIGIL_CONTENT_DIR`, `VIGIL_STATE_DIR`, etc.
    fn apply_env_overrides(config: &mut VigilConfig) {
        if let Ok(val) = std::env::var("VIGIL_CONTENT_DIR") {
            config.layout.content_dir = Some(val);
        }
        if let Ok(val) = std::env::var("VIGIL_STATE_DIR") {
            config.state.dir = Some(val);
        }
        if let Ok(val) = std::env::var("VIGIL_INDEX_COMMAND") {
            let parts: Vec<String> = val.split_whitespace().map(str::to_string).collect();
            if !parts.is_empty() {
                config.fixes.index_command = parts;
            }
        }
        if let Ok(val) = std::env::var("VIGIL_NOTIFY_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.notify.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VIGIL_NOTIFY_CREDENTIALS") {
            config.notify.credentials_path = Some(val);
        }
        if let Ok(val) = std::env::var("VIGIL_CIRCUIT_BREAKER_THRESHOLD") {
            if let Ok(v) = val.parse::<u32>() {
                config.checks.circuit_breaker_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VIGIL_WEEKLY_ROLLUP_DAY") {
            config.trends.weekly_rollup_day = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut VigilConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.state_dir {
            config.state.dir = Some(v.clone());
        }
        if let Some(ref v) = cli.content_dir {
            config.layout.content_dir = Some(v.clone());
        }
        if let Some(v) = cli.notify_enabled {
            config.notify.enabled = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
