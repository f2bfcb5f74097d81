//! Core finding types.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Finding severity. Declared lowest-first so `Critical > Warning > Info > Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Ok => "✅",
            Self::Info => "ℹ️",
            Self::Warning => "⚠️",
            Self::Critical => "🔴",
        }
    }

    /// Critical and Warning findings need attention; Info and Ok do not.
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::Critical | Self::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed category tags. One per check, plus `Trends` for the trend store itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Structure,
    Naming,
    Metadata,
    IndexFreshness,
    Orphans,
    Reachability,
    ScriptSprawl,
    StorageBloat,
    SourceControl,
    JobHealth,
    Credentials,
    ContentRisk,
    Trends,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Naming => "naming",
            Self::Metadata => "metadata",
            Self::IndexFreshness => "index-freshness",
            Self::Orphans => "orphans",
            Self::Reachability => "reachability",
            Self::ScriptSprawl => "script-sprawl",
            Self::StorageBloat => "storage-bloat",
            Self::SourceControl => "source-control",
            Self::JobHealth => "job-health",
            Self::Credentials => "credentials",
            Self::ContentRisk => "content-risk",
            Self::Trends => "trends",
        }
    }

    /// Human heading used in reports.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Structure => "Structure",
            Self::Naming => "Naming",
            Self::Metadata => "Metadata",
            Self::IndexFreshness => "Index Freshness",
            Self::Orphans => "Orphaned Documents",
            Self::Reachability => "Reachability",
            Self::ScriptSprawl => "Script Sprawl",
            Self::StorageBloat => "Storage Bloat",
            Self::SourceControl => "Source Control",
            Self::JobHealth => "Job Health",
            Self::Credentials => "Credentials",
            Self::ContentRisk => "Content Risk",
            Self::Trends => "Trend Store",
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Structure,
            Self::Naming,
            Self::Metadata,
            Self::IndexFreshness,
            Self::Orphans,
            Self::Reachability,
            Self::ScriptSprawl,
            Self::StorageBloat,
            Self::SourceControl,
            Self::JobHealth,
            Self::Credentials,
            Self::ContentRisk,
            Self::Trends,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported observation. Immutable once built; only counts outlive the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Description of the AutoFix that resolves this finding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl Finding {
    pub fn new(severity: Severity, category: Category, message: impl Into<String>) -> Self {
        Self {
            severity,
            category,
            message: message.into(),
            details: None,
            fix: None,
        }
    }

    pub fn ok(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Ok, category, message)
    }

    pub fn info(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, message)
    }

    pub fn warning(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    pub fn critical(category: Category, message: impl Into<String>) -> Self {
        Self::new(Severity::Critical, category, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        if !details.is_empty() {
            self.details = Some(details);
        }
        self
    }

    pub fn with_fix(mut self, fix: &AutoFix) -> Self {
        self.fix = Some(fix.description.clone());
        self
    }

    pub fn with_fix_key(mut self, key: impl Into<String>) -> Self {
        self.fix = Some(key.into());
        self
    }
}

/// An idempotent operation against the audited repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FixAction {
    /// Run an external command from the repository root.
    RunCommand { program: String, args: Vec<String> },
    /// Insert missing derivable header keys. Existing values are never touched.
    FillMetadata {
        /// Path relative to the repository root.
        path: PathBuf,
        title: Option<String>,
        category: Option<String>,
    },
}

/// A remedial action. `description` is the dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoFix {
    pub description: String,
    pub action: FixAction,
}

impl AutoFix {
    pub fn new(description: impl Into<String>, action: FixAction) -> Self {
        Self {
            description: description.into(),
            action,
        }
    }
}

/// What one check produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    pub findings: Vec<Finding>,
    pub fixes: Vec<AutoFix>,
}

impl CheckOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(finding: Finding) -> Self {
        Self {
            findings: vec![finding],
            fixes: Vec::new(),
        }
    }

    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn push_fix(&mut self, fix: AutoFix) {
        self.fixes.push(fix);
    }

    /// Highest severity among the findings, `Ok` when empty.
    pub fn worst(&self) -> Severity {
        self.findings
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(Severity::Ok)
    }
}
