//! JSON reporter: structured output for machines.

use serde_json::json;

use super::{ReportContext, Reporter};

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, String> {
        let run = ctx.run;
        let value = json!({
            "date": run.date,
            "generatedAt": run.generated_at,
            "repoRoot": run.repo_root,
            "grade": run.grade,
            "counts": run.counts,
            "stats": run.stats,
            "prior": run.prior,
            "findings": run.findings,
            "timings": run.timings,
            "analysis": ctx.analysis,
            "fixes": ctx.fixes,
            "notes": ctx.notes,
        });
        serde_json::to_string_pretty(&value).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}
