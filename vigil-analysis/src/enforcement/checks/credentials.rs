//! Credential patterns over the whole corpus.

use std::collections::BTreeMap;

use vigil_core::errors::CheckError;

use super::{plural, read_text, unreadable_files, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, format_bytes, Category, CheckOutcome, Finding, Severity};
use crate::patterns::credential_matcher;

pub struct CredentialsCheck;

impl Check for CredentialsCheck {
    fn id(&self) -> &'static str {
        "credentials"
    }

    fn category(&self) -> Category {
        Category::Credentials
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let matcher = credential_matcher()
            .ok_or_else(|| CheckError::Internal("credential catalogue failed to compile".to_string()))?;
        let max_bytes = ctx.config.checks.effective_max_scan_bytes();

        let mut hits: BTreeMap<Severity, Vec<String>> = BTreeMap::new();
        let mut scanned = 0usize;
        let mut skipped = Vec::new();
        let mut unreadable = Vec::new();
        for file in ctx.snapshot.all_files() {
            let rel = ctx.snapshot.repo_relative(file);
            if file.size > max_bytes {
                skipped.push(rel);
                continue;
            }
            let text = match read_text(file) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(path = %rel, error = %e, "credential scan skipped unreadable file");
                    unreadable.push(rel);
                    continue;
                }
            };
            scanned += 1;
            for m in matcher.scan(&text) {
                hits.entry(m.severity)
                    .or_default()
                    .push(format!("{rel}:{} ({})", m.line, m.name));
            }
        }

        let mut outcome = CheckOutcome::new();
        for (severity, locations) in hits.iter().rev() {
            outcome.push(
                Finding::new(
                    *severity,
                    Category::Credentials,
                    format!("{} found", plural(locations.len(), "possible credential", "possible credentials")),
                )
                .with_details(bounded_list(locations)),
            );
        }
        if !unreadable.is_empty() {
            outcome.push(unreadable_files(Category::Credentials, &unreadable));
        }
        if !skipped.is_empty() {
            outcome.push(
                Finding::info(
                    Category::Credentials,
                    format!(
                        "{} over {} not scanned",
                        plural(skipped.len(), "file", "files"),
                        format_bytes(max_bytes)
                    ),
                )
                .with_details(bounded_list(&skipped)),
            );
        }
        if hits.is_empty() {
            outcome.push(Finding::ok(
                Category::Credentials,
                format!("No credentials in {}", plural(scanned, "file", "files")),
            ));
        }
        Ok(outcome)
    }
}
