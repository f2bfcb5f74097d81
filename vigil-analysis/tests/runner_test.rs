//! Runner fault isolation with custom checks.

use chrono::Utc;
use tempfile::TempDir;

use vigil_analysis::enforcement::checks::{Check, CheckContext};
use vigil_analysis::enforcement::findings::{Category, CheckOutcome, Finding, Severity};
use vigil_analysis::enforcement::runner::CheckRunner;
use vigil_analysis::scanner::RepositorySnapshot;
use vigil_core::config::VigilConfig;
use vigil_core::errors::CheckError;

struct Healthy;
struct Failing;
struct Panicking;

impl Check for Healthy {
    fn id(&self) -> &'static str {
        "naming"
    }
    fn category(&self) -> Category {
        Category::Naming
    }
    fn run(&self, _ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        Ok(CheckOutcome::single(Finding::ok(Category::Naming, "fine")))
    }
}

impl Check for Failing {
    fn id(&self) -> &'static str {
        "orphans"
    }
    fn category(&self) -> Category {
        Category::Orphans
    }
    fn run(&self, _ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        Err(CheckError::CorruptInput {
            what: "kb/_index.json".to_string(),
            message: "expected value".to_string(),
        })
    }
}

impl Check for Panicking {
    fn id(&self) -> &'static str {
        "structure"
    }
    fn category(&self) -> Category {
        Category::Structure
    }
    fn run(&self, _ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        panic!("boom")
    }
}

#[test]
fn failures_become_critical_findings_and_the_run_continues() {
    let dir = TempDir::new().unwrap();
    let config = VigilConfig::default();
    let snapshot = RepositorySnapshot::capture(dir.path(), &config);
    let ctx = CheckContext {
        repo_root: dir.path(),
        config: &config,
        snapshot: &snapshot,
        now: Utc::now(),
    };

    let runner = CheckRunner::with_checks(vec![Box::new(Panicking), Box::new(Failing), Box::new(Healthy)]);
    let output = runner.run(&ctx);

    assert_eq!(output.findings.len(), 3);
    assert_eq!(output.findings[0].severity, Severity::Critical);
    assert!(output.findings[0].message.contains("`structure` failed"));
    assert!(output.findings[0].message.contains("boom"));
    assert_eq!(output.findings[1].severity, Severity::Critical);
    assert!(output.findings[1].message.contains("`orphans` failed"));
    assert_eq!(output.findings[2].message, "fine");

    let failed: Vec<&str> = output.failed_checks().map(|t| t.check).collect();
    assert_eq!(failed, vec!["structure", "orphans"]);
    assert_eq!(output.count(Severity::Critical), 2);
}

#[test]
fn default_battery_runs_every_check() {
    assert_eq!(CheckRunner::new().check_ids().len(), 12);
}
