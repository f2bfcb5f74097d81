//! The check battery.
//!
//! Each check is independent: it reads the snapshot and the filesystem, and
//! never looks at another check's output. Order here is run order, cheap
//! structural checks first and content scans last.

pub mod content_risk;
pub mod credentials;
pub mod index_freshness;
pub mod job_health;
pub mod metadata;
pub mod naming;
pub mod orphans;
pub mod reachability;
pub mod script_sprawl;
pub mod source_control;
pub mod storage_bloat;
pub mod structure;

use std::path::Path;

use chrono::{DateTime, Utc};

use vigil_core::config::VigilConfig;
use vigil_core::errors::{CheckError, ScanError};

use crate::enforcement::findings::{bounded_list, AutoFix, Category, CheckOutcome, Finding};
use crate::enforcement::fixes::actions::rebuild_index_fix;
use crate::scanner::{RepositorySnapshot, ScanEntry};

/// Everything a check may read.
pub struct CheckContext<'a> {
    pub repo_root: &'a Path,
    pub config: &'a VigilConfig,
    pub snapshot: &'a RepositorySnapshot,
    pub now: DateTime<Utc>,
}

impl CheckContext<'_> {
    /// The index rebuild fix, when an index command is configured.
    pub fn rebuild_fix(&self) -> Option<AutoFix> {
        rebuild_index_fix(&self.config.fixes)
    }

    /// Content directory as configured, for messages.
    pub fn content_dir(&self) -> &str {
        self.config.layout.effective_content_dir()
    }
}

/// An independent evaluator over the repository snapshot.
pub trait Check: Send + Sync {
    /// Stable kebab-case id, also the name used in failure findings.
    fn id(&self) -> &'static str;
    fn category(&self) -> Category;
    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError>;
}

/// All checks in run order.
pub fn default_checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(structure::StructureCheck),
        Box::new(naming::NamingCheck),
        Box::new(metadata::MetadataCheck),
        Box::new(index_freshness::IndexFreshnessCheck),
        Box::new(orphans::OrphansCheck),
        Box::new(reachability::ReachabilityCheck),
        Box::new(script_sprawl::ScriptSprawlCheck),
        Box::new(storage_bloat::StorageBloatCheck),
        Box::new(source_control::SourceControlCheck),
        Box::new(job_health::JobHealthCheck),
        Box::new(credentials::CredentialsCheck),
        Box::new(content_risk::ContentRiskCheck),
    ]
}

/// Read a file as text, replacing invalid UTF-8.
pub(crate) fn read_text(entry: &ScanEntry) -> Result<String, ScanError> {
    std::fs::read(&entry.path)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|e| ScanError::IoError {
            path: entry.path.clone(),
            source: e,
        })
}

/// Files a content scan could not read. The rest of the scan still counts.
pub(crate) fn unreadable_files(category: Category, paths: &[String]) -> Finding {
    Finding::warning(
        category,
        format!("{} could not be read and went unscanned", plural(paths.len(), "file", "files")),
    )
    .with_details(bounded_list(paths))
}

/// Pluralize a count: `1 document`, `2 documents`.
pub(crate) fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Run a single check against a scratch repository.

    use std::fs;
    use std::path::Path;

    use chrono::Utc;
    use tempfile::TempDir;

    use vigil_core::config::VigilConfig;

    use super::{Check, CheckContext};
    use crate::enforcement::findings::{CheckOutcome, Finding, Severity};
    use crate::scanner::RepositorySnapshot;

    /// Empty `kb/`, `memory/` and `scripts/`.
    pub fn repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        for sub in ["kb", "memory", "scripts"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        dir
    }

    pub fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Capture a snapshot of `root` and run `check` over it.
    pub fn run(check: &dyn Check, root: &Path, config: &VigilConfig) -> CheckOutcome {
        let snapshot = RepositorySnapshot::capture(root, config);
        run_on(check, root, config, &snapshot)
    }

    /// Run `check` over an already captured snapshot.
    pub fn run_on(
        check: &dyn Check,
        root: &Path,
        config: &VigilConfig,
        snapshot: &RepositorySnapshot,
    ) -> CheckOutcome {
        let ctx = CheckContext {
            repo_root: root,
            config,
            snapshot,
            now: Utc::now(),
        };
        check.run(&ctx).unwrap()
    }

    pub fn with_severity(outcome: &CheckOutcome, severity: Severity) -> Vec<&Finding> {
        outcome.findings.iter().filter(|f| f.severity == severity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ordered() {
        let ids: Vec<&str> = default_checks().iter().map(|c| c.id()).collect();
        assert_eq!(
            ids,
            vec![
                "structure",
                "naming",
                "metadata",
                "index-freshness",
                "orphans",
                "reachability",
                "script-sprawl",
                "storage-bloat",
                "source-control",
                "job-health",
                "credentials",
                "content-risk",
            ]
        );
    }

    #[test]
    fn check_ids_match_categories() {
        for check in default_checks() {
            assert_eq!(check.id(), check.category().as_str());
        }
    }
}
