//! Sequential check execution with per-check fault isolation.
//!
//! A check that returns `Err` or panics becomes one Critical finding naming
//! the check; the remaining checks still run.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use vigil_core::constants::DEFAULT_CHECK_BUDGET_SECS;
use vigil_core::errors::{CheckError, VigilErrorCode};
use vigil_core::tracing::metrics::CHECK_SPAN;

use super::types::{CheckTiming, RunnerOutput};
use crate::enforcement::checks::{default_checks, Check, CheckContext};
use crate::enforcement::findings::{CheckOutcome, Finding};

/// Runs checks in registration order.
pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
    /// Checks slower than this are logged. They are never interrupted.
    budget: Duration,
}

impl CheckRunner {
    /// The full default battery.
    pub fn new() -> Self {
        Self::with_checks(default_checks())
    }

    /// A runner over custom checks.
    pub fn with_checks(checks: Vec<Box<dyn Check>>) -> Self {
        Self {
            checks,
            budget: Duration::from_secs(DEFAULT_CHECK_BUDGET_SECS),
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    pub fn check_ids(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.id()).collect()
    }

    pub fn run(&self, ctx: &CheckContext<'_>) -> RunnerOutput {
        let mut output = RunnerOutput::default();

        for check in &self.checks {
            let id = check.id();
            let span = tracing::info_span!(CHECK_SPAN, check = id);
            let _guard = span.enter();

            let start = Instant::now();
            let result = panic::catch_unwind(AssertUnwindSafe(|| check.run(ctx)))
                .unwrap_or_else(|payload| Err(CheckError::Panicked(panic_message(payload.as_ref()))));
            let elapsed = start.elapsed();
            let over_budget = elapsed > self.budget;
            if over_budget {
                tracing::warn!(
                    duration_ms = elapsed.as_millis() as u64,
                    budget_ms = self.budget.as_millis() as u64,
                    "check exceeded its time budget"
                );
            }

            let (outcome, failed) = match result {
                Ok(outcome) => (outcome, false),
                Err(e) => {
                    tracing::error!(code = e.error_code(), error = %e, "check failed");
                    let finding = Finding::critical(check.category(), format!("Check `{id}` failed: {e}"));
                    (CheckOutcome::single(finding), true)
                }
            };

            tracing::debug!(
                duration_ms = elapsed.as_millis() as u64,
                findings = outcome.findings.len(),
                fixes = outcome.fixes.len(),
                "check finished"
            );
            output.timings.push(CheckTiming {
                check: id,
                elapsed_ms: elapsed.as_millis() as u64,
                worst: outcome.worst(),
                failed,
                over_budget,
            });
            output.findings.extend(outcome.findings);
            output.fixes.extend(outcome.fixes);
        }
        output
    }
}

impl Default for CheckRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
