//! Large files and directory budgets.

use vigil_core::errors::CheckError;

use super::{plural, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, format_bytes, Category, CheckOutcome, Finding};

pub struct StorageBloatCheck;

impl Check for StorageBloatCheck {
    fn id(&self) -> &'static str {
        "storage-bloat"
    }

    fn category(&self) -> Category {
        Category::StorageBloat
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let checks = &ctx.config.checks;
        let large_limit = checks.effective_large_file_bytes();
        let stats = ctx.snapshot.stats();
        let mut outcome = CheckOutcome::new();

        let mut large: Vec<(u64, String)> = ctx
            .snapshot
            .all_files()
            .filter(|f| f.size > large_limit)
            .map(|f| (f.size, ctx.snapshot.repo_relative(f)))
            .collect();
        large.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        if !large.is_empty() {
            let listed: Vec<String> = large
                .iter()
                .map(|(size, path)| format!("{path} ({})", format_bytes(*size)))
                .collect();
            outcome.push(
                Finding::warning(
                    Category::StorageBloat,
                    format!(
                        "{} larger than {}",
                        plural(large.len(), "file", "files"),
                        format_bytes(large_limit)
                    ),
                )
                .with_details(bounded_list(&listed)),
            );
        }

        let budgets = [
            (ctx.content_dir(), stats.kb_size_bytes, checks.effective_content_budget_bytes()),
            (
                ctx.config.layout.effective_memory_dir(),
                stats.memory_size_bytes,
                checks.effective_memory_budget_bytes(),
            ),
        ];
        for (dir, used, budget) in budgets {
            if used > budget {
                outcome.push(Finding::warning(
                    Category::StorageBloat,
                    format!(
                        "{dir}/ uses {}, over its {} budget",
                        format_bytes(used),
                        format_bytes(budget)
                    ),
                ));
            }
        }

        if outcome.findings.is_empty() {
            outcome.push(Finding::ok(
                Category::StorageBloat,
                format!(
                    "Storage within budget ({} content, {} memory)",
                    format_bytes(stats.kb_size_bytes),
                    format_bytes(stats.memory_size_bytes)
                ),
            ));
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::config::VigilConfig;

    use crate::enforcement::checks::testing::{repo, run, write};
    use crate::enforcement::findings::Severity;

    #[test]
    fn large_files_and_budget_overruns_are_warned() {
        let dir = repo();
        write(dir.path(), "kb/big.md", &"x".repeat(200));
        write(dir.path(), "kb/small.md", "x");
        write(dir.path(), "memory/a.md", &"m".repeat(100));
        write(dir.path(), "memory/b.md", &"m".repeat(100));
        let mut config = VigilConfig::default();
        config.checks.large_file_bytes = Some(100);
        config.checks.memory_budget_bytes = Some(150);

        let outcome = run(&StorageBloatCheck, dir.path(), &config);
        let messages: Vec<&str> = outcome.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["1 file larger than 100 B", "memory/ uses 200 B, over its 150 B budget"]
        );
        assert!(outcome.findings.iter().all(|f| f.severity == Severity::Warning));
        assert_eq!(outcome.findings[0].details.as_deref(), Some("kb/big.md (200 B)"));
    }

    #[test]
    fn within_budget_is_ok() {
        let dir = repo();
        write(dir.path(), "kb/a.md", "short");
        let outcome = run(&StorageBloatCheck, dir.path(), &VigilConfig::default());
        assert_eq!(outcome.findings.len(), 1);
        assert_eq!(outcome.findings[0].severity, Severity::Ok);
    }
}
