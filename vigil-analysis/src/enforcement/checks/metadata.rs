//! Required header keys.

use std::path::PathBuf;

use vigil_core::errors::CheckError;

use super::{plural, read_text, unreadable_files, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, AutoFix, Category, CheckOutcome, Finding, FixAction};
use crate::frontmatter::parse_header;

/// Fix key carried by the metadata finding when every gap is derivable.
pub const METADATA_FIX_KEY: &str = "Fill derivable metadata";

pub struct MetadataCheck;

impl Check for MetadataCheck {
    fn id(&self) -> &'static str {
        "metadata"
    }

    fn category(&self) -> Category {
        Category::Metadata
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let required = ctx.config.checks.effective_required_keys();
        let max_bytes = ctx.config.checks.effective_max_scan_bytes();
        let mut outcome = CheckOutcome::new();
        let mut incomplete: Vec<String> = Vec::new();
        let mut all_derivable = true;
        let mut checked = 0usize;
        let mut unreadable = Vec::new();

        for doc in ctx.snapshot.documents() {
            if doc.size > max_bytes {
                continue;
            }
            let text = match read_text(doc) {
                Ok(text) => text,
                Err(e) => {
                    let rel = ctx.snapshot.repo_relative(doc);
                    tracing::warn!(path = %rel, error = %e, "metadata check skipped unreadable document");
                    unreadable.push(rel);
                    continue;
                }
            };
            checked += 1;
            let header = parse_header(&text);
            let missing: Vec<&str> = match &header {
                Some(h) => h.missing(&required),
                None => required.iter().map(String::as_str).collect(),
            };
            if missing.is_empty() {
                continue;
            }

            let repo_rel = ctx.snapshot.repo_relative(doc);
            incomplete.push(format!("{repo_rel} (missing: {})", missing.join(", ")));

            let body = match &header {
                Some(h) => &text[h.range.end..],
                None => text.as_str(),
            };
            let title = missing
                .contains(&"title")
                .then(|| derive_title(body, doc.file_name()));
            let category = if missing.contains(&"category") {
                derive_category(&doc.relative)
            } else {
                None
            };
            let derivable = missing
                .iter()
                .all(|k| (*k == "title" && title.is_some()) || (*k == "category" && category.is_some()));
            all_derivable &= derivable;

            if title.is_some() || category.is_some() {
                outcome.push_fix(AutoFix::new(
                    format!("Fill metadata in {repo_rel}"),
                    FixAction::FillMetadata {
                        path: PathBuf::from(&repo_rel),
                        title,
                        category,
                    },
                ));
            }
        }

        if !unreadable.is_empty() {
            outcome.push(unreadable_files(Category::Metadata, &unreadable));
        }
        if incomplete.is_empty() {
            outcome.push(Finding::ok(
                Category::Metadata,
                format!("{} carry all required metadata", plural(checked, "document", "documents")),
            ));
            return Ok(outcome);
        }

        let mut finding = Finding::warning(
            Category::Metadata,
            format!(
                "{} missing required metadata",
                plural(incomplete.len(), "document is", "documents are")
            ),
        )
        .with_details(bounded_list(&incomplete));
        if all_derivable {
            finding = finding.with_fix_key(METADATA_FIX_KEY);
        }
        outcome.push(finding);
        Ok(outcome)
    }
}

/// First `# ` heading, else the file name in title case.
pub fn derive_title(body: &str, file_name: &str) -> String {
    for line in body.lines() {
        if let Some(rest) = line.strip_prefix("# ") {
            let title = rest.trim();
            if !title.is_empty() {
                return title.to_string();
            }
        }
    }
    let stem = file_name.rsplit_once('.').map_or(file_name, |(s, _)| s);
    stem.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Top-level directory under the content root, if the document is nested.
pub fn derive_category(content_relative: &str) -> Option<String> {
    let (first, rest) = content_relative.split_once('/')?;
    (!first.is_empty() && !rest.is_empty()).then(|| first.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::config::VigilConfig;

    use crate::enforcement::checks::testing::{repo, run_on, write};
    use crate::enforcement::findings::Severity;
    use crate::scanner::RepositorySnapshot;

    #[test]
    fn title_from_heading_or_file_name() {
        assert_eq!(derive_title("intro\n# Deploy Guide\n", "x.md"), "Deploy Guide");
        assert_eq!(derive_title("no heading", "deploy-guide.md"), "Deploy Guide");
        assert_eq!(derive_title("", "faq"), "Faq");
    }

    #[test]
    fn category_from_directory() {
        assert_eq!(derive_category("ops/deploy.md").as_deref(), Some("ops"));
        assert_eq!(derive_category("ops/deep/deploy.md").as_deref(), Some("ops"));
        assert_eq!(derive_category("deploy.md"), None);
    }

    #[test]
    fn unreadable_document_is_reported_and_others_still_checked() {
        let dir = repo();
        write(dir.path(), "kb/gone.md", "# Gone\n");
        write(dir.path(), "kb/bare.md", "# Bare\n");
        let config = VigilConfig::default();
        let snapshot = RepositorySnapshot::capture(dir.path(), &config);
        std::fs::remove_file(dir.path().join("kb/gone.md")).unwrap();

        let outcome = run_on(&MetadataCheck, dir.path(), &config, &snapshot);
        let messages: Vec<&str> = outcome.findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["1 file could not be read and went unscanned", "1 document is missing required metadata"]
        );
        assert!(outcome.findings.iter().all(|f| f.severity == Severity::Warning));
        assert!(outcome.findings[1].details.as_deref().unwrap().starts_with("kb/bare.md"));
    }
}
