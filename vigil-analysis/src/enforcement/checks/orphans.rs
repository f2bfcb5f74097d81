//! Documents on disk that the index does not list.

use vigil_core::errors::CheckError;

use super::{plural, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, Category, CheckOutcome, Finding};
use crate::index::{load_json, ContentIndex, IndexSet};

pub struct OrphansCheck;

impl Check for OrphansCheck {
    fn id(&self) -> &'static str {
        "orphans"
    }

    fn category(&self) -> Category {
        Category::Orphans
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let path = ctx
            .snapshot
            .content_root
            .join(ctx.config.layout.effective_index_file());
        // Missing and corrupt indexes are reported by index-freshness.
        let index = match load_json::<ContentIndex>(&path) {
            Ok(Some(index)) => index,
            Ok(None) | Err(CheckError::CorruptInput { .. }) => {
                return Ok(CheckOutcome::single(Finding::info(
                    Category::Orphans,
                    "Content index unavailable; orphan check skipped",
                )));
            }
            Err(e) => return Err(e),
        };

        let listed = IndexSet::from_entries(&index.files, ctx.content_dir());
        let orphans: Vec<String> = ctx
            .snapshot
            .documents()
            .filter(|doc| !listed.contains(&doc.relative))
            .map(|doc| ctx.snapshot.repo_relative(doc))
            .collect();

        if orphans.is_empty() {
            return Ok(CheckOutcome::single(Finding::ok(
                Category::Orphans,
                "Every document is listed in the content index",
            )));
        }

        let mut outcome = CheckOutcome::new();
        let mut finding = Finding::warning(
            Category::Orphans,
            format!(
                "{} not listed in the content index",
                plural(orphans.len(), "document is", "documents are")
            ),
        )
        .with_details(bounded_list(&orphans));
        if let Some(fix) = ctx.rebuild_fix() {
            finding = finding.with_fix(&fix);
            outcome.push_fix(fix);
        }
        outcome.push(finding);
        Ok(outcome)
    }
}
