//! Runner output types.

use serde::Serialize;

use crate::enforcement::findings::{AutoFix, Finding, Severity};

/// How one check went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckTiming {
    pub check: &'static str,
    pub elapsed_ms: u64,
    pub worst: Severity,
    /// The check returned an error or panicked.
    pub failed: bool,
    /// The check took longer than the configured budget.
    pub over_budget: bool,
}

/// Everything the battery produced, in check order.
#[derive(Debug, Clone, Default)]
pub struct RunnerOutput {
    pub findings: Vec<Finding>,
    pub fixes: Vec<AutoFix>,
    pub timings: Vec<CheckTiming>,
}

impl RunnerOutput {
    pub fn count(&self, severity: Severity) -> u32 {
        self.findings.iter().filter(|f| f.severity == severity).count() as u32
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckTiming> {
        self.timings.iter().filter(|t| t.failed)
    }
}
