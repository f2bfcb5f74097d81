//! Scheduled-job health from the scheduler's job-health document.

use vigil_core::constants::OVERDUE_GRACE_FACTOR;
use vigil_core::errors::CheckError;

use super::{plural, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, Category, CheckOutcome, Finding};
use crate::index::load_json;
use crate::jobs::{JobHealthDocument, Schedule};

pub struct JobHealthCheck;

impl Check for JobHealthCheck {
    fn id(&self) -> &'static str {
        "job-health"
    }

    fn category(&self) -> Category {
        Category::JobHealth
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let path = ctx.config.job_health_path(ctx.repo_root);
        let doc = match load_json::<JobHealthDocument>(&path) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                return Ok(CheckOutcome::single(Finding::info(
                    Category::JobHealth,
                    format!("No job-health document at {}", path.display()),
                )))
            }
            Err(CheckError::CorruptInput { message, .. }) => {
                return Ok(CheckOutcome::single(
                    Finding::critical(
                        Category::JobHealth,
                        format!("Job-health document is corrupt ({})", path.display()),
                    )
                    .with_details(message),
                ))
            }
            Err(e) => return Err(e),
        };

        let threshold = ctx.config.checks.effective_circuit_breaker_threshold();
        let mut tripped = Vec::new();
        let mut failed = Vec::new();
        let mut overdue = Vec::new();
        let mut unscheduled = Vec::new();

        for job in &doc.jobs {
            if job.is_tripped(threshold) {
                tripped.push(if job.circuit_open {
                    format!("{} (circuit open)", job.id)
                } else {
                    format!("{} ({} consecutive failures)", job.id, job.consecutive_failures)
                });
                // Lesser findings for a tripped job are noise.
                continue;
            }
            if job.last_run_failed() {
                failed.push(job.id.clone());
            }
            let (Some(raw), Some(last_run)) = (job.schedule.as_deref(), job.last_run_at) else {
                continue;
            };
            match raw.parse::<Schedule>() {
                Ok(schedule) if schedule.is_overdue(last_run, ctx.now, OVERDUE_GRACE_FACTOR) => {
                    overdue.push(format!("{} (last run {}, {raw})", job.id, last_run.format("%Y-%m-%d %H:%M")));
                }
                Ok(_) => {}
                Err(reason) => unscheduled.push(format!("{}: {reason}", job.id)),
            }
        }

        let mut outcome = CheckOutcome::new();
        if !tripped.is_empty() {
            outcome.push(
                Finding::critical(
                    Category::JobHealth,
                    format!("{} tripped the circuit breaker", plural(tripped.len(), "job has", "jobs have")),
                )
                .with_details(bounded_list(&tripped)),
            );
        }
        if !failed.is_empty() {
            outcome.push(
                Finding::warning(
                    Category::JobHealth,
                    format!("{} failed on the last run", plural(failed.len(), "job", "jobs")),
                )
                .with_details(bounded_list(&failed)),
            );
        }
        if !overdue.is_empty() {
            outcome.push(
                Finding::warning(
                    Category::JobHealth,
                    format!("{} overdue", plural(overdue.len(), "job is", "jobs are")),
                )
                .with_details(bounded_list(&overdue)),
            );
        }
        if !unscheduled.is_empty() {
            outcome.push(
                Finding::info(
                    Category::JobHealth,
                    format!("{} an unreadable schedule", plural(unscheduled.len(), "job has", "jobs have")),
                )
                .with_details(bounded_list(&unscheduled)),
            );
        }
        if outcome.findings.is_empty() {
            outcome.push(Finding::ok(
                Category::JobHealth,
                format!("{} healthy", plural(doc.jobs.len(), "job", "jobs")),
            ));
        }
        Ok(outcome)
    }
}
