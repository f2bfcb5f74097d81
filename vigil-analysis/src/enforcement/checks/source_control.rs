//! Working tree and upstream state.

use vigil_core::errors::CheckError;

use super::{plural, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, Category, CheckOutcome, Finding};
use crate::vcs::{GitRepo, UpstreamState};

pub struct SourceControlCheck;

impl Check for SourceControlCheck {
    fn id(&self) -> &'static str {
        "source-control"
    }

    fn category(&self) -> Category {
        Category::SourceControl
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let vcs = |e: git2::Error| CheckError::Vcs(e.message().to_string());
        let Some(repo) = GitRepo::open(ctx.repo_root).map_err(vcs)? else {
            return Ok(CheckOutcome::single(Finding::info(
                Category::SourceControl,
                "Not a git repository; source-control check skipped",
            )));
        };
        let status = repo.status().map_err(vcs)?;
        let mut outcome = CheckOutcome::new();

        if !status.changes.is_empty() {
            outcome.push(
                Finding::warning(
                    Category::SourceControl,
                    format!("{} uncommitted", plural(status.changes.len(), "change", "changes")),
                )
                .with_details(bounded_list(&status.changes)),
            );
        }

        match &status.upstream {
            UpstreamState::Tracking { name, ahead, behind } => {
                if *behind > 0 {
                    outcome.push(Finding::warning(
                        Category::SourceControl,
                        format!("{} behind {name}", plural(*behind, "commit", "commits")),
                    ));
                }
                if *ahead > 0 {
                    outcome.push(Finding::warning(
                        Category::SourceControl,
                        format!("{} ahead of {name} (unpushed)", plural(*ahead, "commit", "commits")),
                    ));
                }
            }
            UpstreamState::NoUpstream => outcome.push(Finding::info(
                Category::SourceControl,
                match &status.branch {
                    Some(branch) => format!("Branch {branch} has no upstream"),
                    None => "No upstream configured".to_string(),
                },
            )),
            UpstreamState::Detached => outcome.push(Finding::info(
                Category::SourceControl,
                "HEAD is detached; upstream comparison skipped",
            )),
        }

        if !outcome.findings.iter().any(|f| f.severity.is_problem()) {
            outcome.push(Finding::ok(Category::SourceControl, "Working tree is clean"));
        }
        Ok(outcome)
    }
}
