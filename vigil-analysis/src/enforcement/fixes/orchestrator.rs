//! Fix orchestrator.
//!
//! Fixes are deduplicated by description and applied once each. When the
//! working state actually changed, exactly the changed paths are committed
//! and, if configured and tracked, pushed with a timeout. A failing fix is
//! recorded and the rest still run.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::Serialize;

use vigil_core::config::FixConfig;
use vigil_core::errors::{FixError, VigilErrorCode};
use vigil_core::tracing::metrics::FIX_SPAN;

use super::actions::apply_action;
use crate::enforcement::findings::AutoFix;
use crate::process::run_with_timeout;
use crate::vcs::{GitRepo, StatusSnapshot, UpstreamState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "kebab-case")]
pub enum FixStatus {
    Applied(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixResult {
    pub description: String,
    pub status: FixStatus,
}

impl FixResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.status, FixStatus::Applied(_))
    }
}

/// What `--fix` did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixReport {
    pub results: Vec<FixResult>,
    /// Repo-relative paths whose working state changed.
    pub changed_paths: Vec<String>,
    pub commit: Option<String>,
    pub pushed: bool,
    pub notes: Vec<String>,
}

/// First occurrence of each description wins; order is preserved.
pub fn dedup_fixes(fixes: impl IntoIterator<Item = AutoFix>) -> Vec<AutoFix> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    fixes
        .into_iter()
        .filter(|fix| seen.insert(fix.description.clone()))
        .collect()
}

/// `vigil: automated maintenance YYYY-MM-DD`.
pub fn maintenance_message(date: NaiveDate) -> String {
    format!("vigil: automated maintenance {}", date.format("%Y-%m-%d"))
}

pub struct FixOrchestrator<'a> {
    repo_root: &'a Path,
    config: &'a FixConfig,
    date: NaiveDate,
}

impl<'a> FixOrchestrator<'a> {
    pub fn new(repo_root: &'a Path, config: &'a FixConfig, date: NaiveDate) -> Self {
        Self {
            repo_root,
            config,
            date,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.effective_command_timeout_secs())
    }

    pub fn run(&self, fixes: Vec<AutoFix>) -> FixReport {
        let span = tracing::info_span!(FIX_SPAN, date = %self.date);
        let _guard = span.enter();
        let unique = dedup_fixes(fixes);
        let mut report = FixReport::default();
        if unique.is_empty() {
            return report;
        }

        let repo = match GitRepo::open(self.repo_root) {
            Ok(repo) => repo,
            Err(e) => {
                report.notes.push(format!("Could not open repository: {}", e.message()));
                None
            }
        };
        let before = repo.as_ref().and_then(|r| snapshot(r, &mut report));

        for fix in &unique {
            let status = match apply_action(&fix.action, self.repo_root, self.timeout()) {
                Ok(summary) => {
                    tracing::info!(fix = %fix.description, %summary, "fix applied");
                    FixStatus::Applied(summary)
                }
                Err(e) => {
                    tracing::warn!(fix = %fix.description, code = e.error_code(), error = %e, "fix failed");
                    FixStatus::Failed(e.to_string())
                }
            };
            report.results.push(FixResult {
                description: fix.description.clone(),
                status,
            });
        }

        let Some(repo) = repo else {
            report
                .notes
                .push("Not a git repository; fixes applied without committing".to_string());
            return report;
        };
        let (Some(before), Some(after)) = (before, snapshot(&repo, &mut report)) else {
            return report;
        };
        report.changed_paths = after.changed_since(&before);
        if report.changed_paths.is_empty() {
            report.notes.push("No changes to commit".to_string());
            return report;
        }

        match self.publish(&repo, &report.changed_paths) {
            Ok((oid, pushed)) => {
                report.commit = Some(oid);
                report.pushed = pushed;
                if !pushed {
                    report.notes.push("Committed locally; push skipped".to_string());
                }
            }
            Err(e) => {
                tracing::error!(code = e.error_code(), error = %e, "publishing fixes failed");
                report.notes.push(format!("Publishing failed: {e}"));
            }
        }
        report
    }

    /// Commit `paths`, then push when enabled and the branch tracks a remote.
    fn publish(&self, repo: &GitRepo, paths: &[String]) -> Result<(String, bool), FixError> {
        let vcs = |e: git2::Error| FixError::Vcs(e.message().to_string());
        let oid = repo
            .commit_paths(
                paths,
                &maintenance_message(self.date),
                self.config.effective_author_name(),
                self.config.effective_author_email(),
            )
            .map_err(vcs)?;
        let oid = oid.to_string();
        tracing::info!(commit = %oid, files = paths.len(), "maintenance commit created");

        if !self.config.effective_push() {
            return Ok((oid, false));
        }
        let status = repo.status().map_err(vcs)?;
        if !matches!(status.upstream, UpstreamState::Tracking { .. }) {
            return Ok((oid, false));
        }

        let args = vec![
            "push".to_string(),
            self.config.effective_remote().to_string(),
            "HEAD".to_string(),
        ];
        let output = run_with_timeout("git", &args, self.repo_root, self.timeout()).map_err(|e| {
            FixError::Spawn {
                program: "git".to_string(),
                message: e.to_string(),
            }
        })?;
        if output.timed_out {
            return Err(FixError::Timeout {
                program: "git push".to_string(),
                timeout_secs: self.timeout().as_secs(),
            });
        }
        if !output.success() {
            return Err(FixError::CommandFailed {
                program: "git push".to_string(),
                code: output.code(),
            });
        }
        Ok((oid, true))
    }
}

fn snapshot(repo: &GitRepo, report: &mut FixReport) -> Option<StatusSnapshot> {
    match repo.snapshot() {
        Ok(s) => Some(s),
        Err(e) => {
            report
                .notes
                .push(format!("Could not read working state: {}", e.message()));
            None
        }
    }
}
