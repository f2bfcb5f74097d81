//! Console reporter: terminal summary with optional color codes.

use super::{grade_line, ordered_findings, ReportContext, Reporter};
use crate::enforcement::findings::Severity;

pub struct ConsoleReporter {
    pub use_color: bool,
    /// Include Ok findings.
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            verbose: false,
        }
    }

    fn color_start(&self, severity: Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Critical => "\x1b[31m", // red
            Severity::Warning => "\x1b[33m",  // yellow
            Severity::Info => "\x1b[36m",     // cyan
            Severity::Ok => "\x1b[32m",       // green
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, String> {
        let run = ctx.run;
        let mut output = String::new();

        output.push_str(&format!("Vigil health audit {} ({})\n\n", run.date, run.repo_root.display()));

        for finding in ordered_findings(&run.findings) {
            if finding.severity == Severity::Ok && !self.verbose {
                continue;
            }
            output.push_str(&format!(
                "{}{:>8}{} [{}] {}\n",
                self.color_start(finding.severity),
                finding.severity.as_str(),
                self.color_end(),
                finding.category,
                finding.message
            ));
            if let Some(details) = &finding.details {
                for line in details.lines() {
                    output.push_str(&format!("           {line}\n"));
                }
            }
        }

        for r in &ctx.analysis.regressions {
            output.push_str(&format!("  regression: {}\n", r.message));
        }
        for r in &ctx.analysis.recurring {
            output.push_str(&format!("  recurring: {}\n", r.message));
        }
        if let Some(fixes) = ctx.fixes {
            for result in &fixes.results {
                let mark = if result.succeeded() { "✓" } else { "✗" };
                output.push_str(&format!("  fix {mark} {}\n", result.description));
            }
            for note in &fixes.notes {
                output.push_str(&format!("  fix: {note}\n"));
            }
        }
        for note in ctx.notes {
            output.push_str(&format!("  note: {note}\n"));
        }

        let failed = run.timings.iter().filter(|t| t.failed).count();
        output.push_str(&format!(
            "\n─── {} | {} checks, {failed} failed ───\n",
            grade_line(run.grade, run.counts.critical, run.counts.warning),
            run.timings.len()
        ));
        if run.counts.is_clean() {
            output.push_str("All checks passed.\n");
        }
        Ok(output)
    }
}
