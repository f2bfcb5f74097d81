//! Document count on disk against the index's `totalFiles`.

use std::cmp::Ordering;

use vigil_core::errors::CheckError;

use super::{Check, CheckContext};
use crate::enforcement::findings::{Category, CheckOutcome, Finding};
use crate::index::{load_json, ContentIndex};

pub struct IndexFreshnessCheck;

impl Check for IndexFreshnessCheck {
    fn id(&self) -> &'static str {
        "index-freshness"
    }

    fn category(&self) -> Category {
        Category::IndexFreshness
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let index_file = ctx.config.layout.effective_index_file();
        let label = format!("{}/{index_file}", ctx.content_dir());
        let path = ctx.snapshot.content_root.join(index_file);
        let fix = ctx.rebuild_fix();
        let mut outcome = CheckOutcome::new();

        let finding = match load_json::<ContentIndex>(&path) {
            Ok(None) => Finding::warning(Category::IndexFreshness, format!("Content index missing ({label})")),
            Err(CheckError::CorruptInput { message, .. }) => {
                Finding::critical(Category::IndexFreshness, format!("Content index is corrupt ({label})"))
                    .with_details(message)
            }
            Err(e) => return Err(e),
            Ok(Some(index)) => {
                let actual = ctx.snapshot.document_count() as u64;
                let recorded = index.total_files;
                match actual.cmp(&recorded) {
                    Ordering::Equal => {
                        outcome.push(Finding::ok(
                            Category::IndexFreshness,
                            format!("Content index is current ({actual} documents)"),
                        ));
                        return Ok(outcome);
                    }
                    Ordering::Greater => Finding::warning(
                        Category::IndexFreshness,
                        format!(
                            "Content index is stale: {actual} documents on disk, {recorded} indexed (behind by {})",
                            actual - recorded
                        ),
                    ),
                    Ordering::Less => Finding::warning(
                        Category::IndexFreshness,
                        format!(
                            "Content index is ahead of disk: {recorded} indexed, {actual} on disk ({} orphaned entries)",
                            recorded - actual
                        ),
                    ),
                }
            }
        };

        match fix {
            Some(fix) => {
                outcome.push(finding.with_fix(&fix));
                outcome.push_fix(fix);
            }
            None => outcome.push(finding),
        }
        Ok(outcome)
    }
}
