//! Top-level content directories against the configured allow-list.

use vigil_core::errors::{CheckError, ScanError};

use super::{plural, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, Category, CheckOutcome, Finding};

pub struct StructureCheck;

impl Check for StructureCheck {
    fn id(&self) -> &'static str {
        "structure"
    }

    fn category(&self) -> Category {
        Category::Structure
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let allowed = &ctx.config.layout.allowed_dirs;
        if allowed.is_empty() {
            return Ok(CheckOutcome::single(Finding::info(
                Category::Structure,
                "No allowed directories configured; structure check disabled",
            )));
        }

        let root = &ctx.snapshot.content_root;
        let read_dir = std::fs::read_dir(root).map_err(|e| ScanError::IoError {
            path: root.clone(),
            source: e,
        })?;

        let mut dirs: Vec<String> = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| ScanError::IoError {
                path: root.clone(),
                source: e,
            })?;
            if !entry.file_type().is_ok_and(|t| t.is_dir()) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') {
                dirs.push(name);
            }
        }
        dirs.sort();

        let unexpected: Vec<String> = dirs
            .iter()
            .filter(|d| !allowed.contains(d))
            .map(|d| format!("{}/{d}/", ctx.content_dir()))
            .collect();

        if unexpected.is_empty() {
            return Ok(CheckOutcome::single(Finding::ok(
                Category::Structure,
                format!("All {} allowed", plural(dirs.len(), "top-level directory is", "top-level directories are")),
            )));
        }
        Ok(CheckOutcome::single(
            Finding::warning(
                Category::Structure,
                format!(
                    "{} not in the allow-list",
                    plural(unexpected.len(), "top-level directory", "top-level directories")
                ),
            )
            .with_details(bounded_list(&unexpected)),
        ))
    }
}
