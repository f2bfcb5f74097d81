//! Script families that differ only by a version-like suffix.

use std::collections::BTreeMap;

use vigil_core::errors::CheckError;

use super::{plural, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, Category, CheckOutcome, Finding};
use crate::patterns::naming::script_family;

pub struct ScriptSprawlCheck;

impl Check for ScriptSprawlCheck {
    fn id(&self) -> &'static str {
        "script-sprawl"
    }

    fn category(&self) -> Category {
        Category::ScriptSprawl
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let mut families: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for script in &ctx.snapshot.scripts {
            families
                .entry(script_family(&script.relative))
                .or_default()
                .push(script.relative.as_str());
        }

        let sprawl: Vec<String> = families
            .iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(stem, members)| format!("{stem}: {}", members.join(", ")))
            .collect();

        if sprawl.is_empty() {
            return Ok(CheckOutcome::single(Finding::ok(
                Category::ScriptSprawl,
                format!("{} with no duplicate families", plural(ctx.snapshot.scripts.len(), "script", "scripts")),
            )));
        }
        Ok(CheckOutcome::single(
            Finding::warning(
                Category::ScriptSprawl,
                format!("{} with multiple variants", plural(sprawl.len(), "script family", "script families")),
            )
            .with_details(bounded_list(&sprawl)),
        ))
    }
}
