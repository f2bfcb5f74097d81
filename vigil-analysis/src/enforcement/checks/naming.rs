//! Document file name convention.

use vigil_core::errors::CheckError;

use super::{plural, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, Category, CheckOutcome, Finding};
use crate::patterns::naming::is_kebab_case_document;

pub struct NamingCheck;

impl Check for NamingCheck {
    fn id(&self) -> &'static str {
        "naming"
    }

    fn category(&self) -> Category {
        Category::Naming
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let exceptions = ctx.config.checks.effective_naming_exceptions();
        let mut checked = 0usize;
        let violations: Vec<String> = ctx
            .snapshot
            .documents()
            .filter(|doc| !exceptions.iter().any(|e| e == doc.file_name()))
            .inspect(|_| checked += 1)
            .filter(|doc| !is_kebab_case_document(doc.file_name()))
            .map(|doc| ctx.snapshot.repo_relative(doc))
            .collect();

        if violations.is_empty() {
            return Ok(CheckOutcome::single(Finding::ok(
                Category::Naming,
                format!("{} follow the naming convention", plural(checked, "document", "documents")),
            )));
        }
        Ok(CheckOutcome::single(
            Finding::warning(
                Category::Naming,
                format!(
                    "{} not kebab-case",
                    plural(violations.len(), "document name is", "document names are")
                ),
            )
            .with_details(bounded_list(&violations)),
        ))
    }
}
