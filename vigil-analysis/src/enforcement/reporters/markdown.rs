//! Durable Markdown report, one file per day.

use vigil_storage::TrendEntry;

use super::{action_buckets, ordered_findings, ReportContext, Reporter};
use crate::enforcement::audit::{AuditRun, WeeklyRollup};
use crate::enforcement::findings::{bounded_list, format_bytes, signed, Category, Finding};
use crate::enforcement::fixes::{FixReport, FixStatus};
use crate::patterns::CATALOG_VERSION;

/// Rows shown in the trend table.
const TREND_TABLE_ROWS: usize = 7;

pub struct MarkdownReporter;

impl Reporter for MarkdownReporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, String> {
        let run = ctx.run;
        let mut out = String::new();

        out.push_str(&format!("# Repository Health Report {}\n\n", run.date));
        out.push_str(&format!(
            "**Grade: {}** | {} critical | {} warning | {} info\n\n",
            run.grade, run.counts.critical, run.counts.warning, run.counts.info
        ));
        out.push_str(&format!(
            "Generated {} for `{}` (pattern catalogue v{CATALOG_VERSION}).\n\n",
            run.generated_at.format("%Y-%m-%d %H:%M UTC"),
            run.repo_root.display()
        ));

        push_statistics(&mut out, run);
        push_findings(&mut out, run);
        push_actions(&mut out, &run.findings, ctx.fixes.is_some());

        if !ctx.analysis.regressions.is_empty() {
            out.push_str("## Regressions\n\n");
            for r in &ctx.analysis.regressions {
                out.push_str(&format!("- {}\n", r.message));
            }
            out.push('\n');
        }
        if !ctx.analysis.recurring.is_empty() {
            out.push_str("## Recurring Issues\n\n");
            for r in &ctx.analysis.recurring {
                out.push_str(&format!("- {}\n", r.message));
            }
            out.push('\n');
        }

        push_trend_table(&mut out, ctx.history);
        if let Some(rollup) = &ctx.analysis.rollup {
            push_rollup(&mut out, rollup);
        }
        if let Some(fixes) = ctx.fixes {
            push_fixes(&mut out, fixes);
        }
        if !ctx.notes.is_empty() {
            out.push_str("## Notes\n\n");
            for note in ctx.notes {
                out.push_str(&format!("- {note}\n"));
            }
            out.push('\n');
        }
        Ok(out)
    }
}

fn push_statistics(out: &mut String, run: &AuditRun) {
    out.push_str("## Statistics\n\n");
    let s = &run.stats;
    let rows: [(&str, u64, Option<u64>, bool); 5] = [
        ("Documents", s.kb_file_count, run.prior.as_ref().map(|p| p.kb_file_count), false),
        ("Content size", s.kb_size_bytes, run.prior.as_ref().map(|p| p.kb_size_bytes), true),
        ("Memory files", s.memory_file_count, run.prior.as_ref().map(|p| p.memory_file_count), false),
        ("Memory size", s.memory_size_bytes, run.prior.as_ref().map(|p| p.memory_size_bytes), true),
        ("Scripts", s.script_count, run.prior.as_ref().map(|p| p.script_count), false),
    ];
    match &run.prior {
        Some(prior) => {
            out.push_str(&format!("| Metric | Value | Change since {} |\n|---|---:|---:|\n", prior.date));
            for (label, value, before, bytes) in rows {
                let delta = value as i64 - before.unwrap_or(value) as i64;
                let shown = if bytes { format_bytes(value) } else { value.to_string() };
                out.push_str(&format!("| {label} | {shown} | {} |\n", signed(delta)));
            }
        }
        None => {
            out.push_str("| Metric | Value |\n|---|---:|\n");
            for (label, value, _, bytes) in rows {
                let shown = if bytes { format_bytes(value) } else { value.to_string() };
                out.push_str(&format!("| {label} | {shown} |\n"));
            }
        }
    }
    out.push('\n');
}

fn push_findings(out: &mut String, run: &AuditRun) {
    out.push_str("## Findings\n\n");
    if run.counts.is_clean() {
        out.push_str("All checks passed.\n\n");
    }
    let mut current: Option<Category> = None;
    for finding in ordered_findings(&run.findings) {
        if current != Some(finding.category) {
            out.push_str(&format!("### {}\n\n", finding.category.title()));
            current = Some(finding.category);
        }
        push_finding(out, finding);
    }
    if current.is_some() {
        out.push('\n');
    }
}

fn push_finding(out: &mut String, finding: &Finding) {
    out.push_str(&format!(
        "- {} **{}**: {}\n",
        finding.severity.icon(),
        finding.severity.label(),
        finding.message
    ));
    if let Some(details) = &finding.details {
        for line in details.lines() {
            out.push_str(&format!("  - {line}\n"));
        }
    }
}

fn push_actions(out: &mut String, findings: &[Finding], fixes_ran: bool) {
    let buckets = action_buckets(findings);
    if buckets.iter().all(|(_, list)| list.is_empty()) {
        return;
    }
    out.push_str("## Actions\n\n");
    for (route, list) in &buckets {
        out.push_str(&format!("### {}\n\n", route.heading(fixes_ran)));
        if list.is_empty() {
            out.push_str("- None\n");
        }
        for finding in list {
            match &finding.fix {
                Some(fix) => out.push_str(&format!("- {} (fix: {fix})\n", finding.message)),
                None => out.push_str(&format!("- {}\n", finding.message)),
            }
        }
        out.push('\n');
    }
}

fn push_trend_table(out: &mut String, history: &[TrendEntry]) {
    if history.is_empty() {
        return;
    }
    let rows = &history[history.len().saturating_sub(TREND_TABLE_ROWS)..];
    out.push_str("## Trend\n\n");
    out.push_str("| Date | Grade | Critical | Warning | Documents | Memory |\n");
    out.push_str("|---|:-:|---:|---:|---:|---:|\n");
    for e in rows {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            e.date,
            e.grade,
            e.critical_count,
            e.warning_count,
            e.kb_file_count,
            format_bytes(e.memory_size_bytes)
        ));
    }
    out.push('\n');
}

fn push_rollup(out: &mut String, rollup: &WeeklyRollup) {
    out.push_str(&format!("## Weekly Rollup ({} to {})\n\n", rollup.from, rollup.to));
    out.push_str(&format!("- Best day: {} (grade {})\n", rollup.best.0, rollup.best.1));
    out.push_str(&format!("- Worst day: {} (grade {})\n", rollup.worst.0, rollup.worst.1));
    for (label, delta) in &rollup.deltas {
        out.push_str(&format!("- {label}: {}\n", signed(*delta)));
    }
    if rollup.stale_documents.is_empty() {
        out.push_str("- No stale documents\n");
    } else {
        out.push_str(&format!("- Stale documents ({}):\n", rollup.stale_documents.len()));
        for line in bounded_list(&rollup.stale_documents).lines() {
            out.push_str(&format!("  - {line}\n"));
        }
    }
    out.push('\n');
}

fn push_fixes(out: &mut String, fixes: &FixReport) {
    out.push_str("## Auto-fix\n\n");
    if fixes.results.is_empty() {
        out.push_str("- Nothing to fix\n");
    }
    for result in &fixes.results {
        match &result.status {
            FixStatus::Applied(summary) => {
                out.push_str(&format!("- ✅ {}: {summary}\n", result.description))
            }
            FixStatus::Failed(error) => out.push_str(&format!("- ❌ {}: {error}\n", result.description)),
        }
    }
    if let Some(commit) = &fixes.commit {
        let short = &commit[..commit.len().min(10)];
        let pushed = if fixes.pushed { ", pushed" } else { "" };
        out.push_str(&format!(
            "- Committed {} in {short}{pushed}\n",
            changed_files(fixes.changed_paths.len())
        ));
    }
    for note in &fixes.notes {
        out.push_str(&format!("- {note}\n"));
    }
    out.push('\n');
}

fn changed_files(n: usize) -> String {
    if n == 1 {
        "1 file".to_string()
    } else {
        format!("{n} files")
    }
}

