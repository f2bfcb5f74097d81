//! Auto-fix configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the auto-fix orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FixConfig {
    /// External index rebuild command, program first. Empty: no rebuild fixes.
    #[serde(default)]
    pub index_command: Vec<String>,
    /// Timeout for the index command and `git push`, in seconds. Default: 120.
    pub command_timeout_secs: Option<u64>,
    /// Push the maintenance commit upstream. Default: true.
    pub push: Option<bool>,
    /// Remote to push to. Default: "origin".
    pub remote: Option<String>,
    /// Commit author name when the repository has none configured.
    pub author_name: Option<String>,
    /// Commit author email when the repository has none configured.
    pub author_email: Option<String>,
}

impl FixConfig {
    /// Returns the index command split into program and arguments.
    pub fn index_command(&self) -> Option<(&str, &[String])> {
        self.index_command
            .split_first()
            .map(|(program, args)| (program.as_str(), args))
    }

    pub fn effective_command_timeout_secs(&self) -> u64 {
        self.command_timeout_secs
            .unwrap_or(constants::DEFAULT_COMMAND_TIMEOUT_SECS)
    }

    pub fn effective_push(&self) -> bool {
        self.push.unwrap_or(true)
    }

    pub fn effective_remote(&self) -> &str {
        self.remote.as_deref().unwrap_or(constants::DEFAULT_REMOTE)
    }

    pub fn effective_author_name(&self) -> &str {
        self.author_name.as_deref().unwrap_or("vigil")
    }

    pub fn effective_author_email(&self) -> &str {
        self.author_email.as_deref().unwrap_or("vigil@localhost")
    }
}
