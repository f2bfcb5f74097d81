//! Vigil analysis: everything between "here is a repository" and "here is
//! the report".
//!
//! - `scanner`: file discovery and the per-run repository snapshot
//! - `frontmatter`: `---` header block parsing
//! - `patterns`: the credential / content-risk catalogue and naming rules
//! - `index`: the content index and discovery structures
//! - `enforcement`: findings, checks, runner, trend analytics, fixes, reporters
//! - `vcs`, `process`, `jobs`, `notify`: collaborators the checks and fixes call
//! - `engine`: one audit run end to end

pub mod engine;
pub mod enforcement;
pub mod frontmatter;
pub mod index;
pub mod jobs;
pub mod notify;
pub mod patterns;
pub mod process;
pub mod scanner;
pub mod vcs;

pub use engine::{AuditEngine, AuditOptions, AuditOutcome};
