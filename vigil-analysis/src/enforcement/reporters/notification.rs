//! Condensed operator alert mirroring the top of the Markdown report.

use super::{grade_line, ordered_findings, ReportContext, Reporter};

/// Sink message limit.
pub const MAX_NOTIFICATION_CHARS: usize = 4096;

/// Problems listed before the rest are summarized as a count.
const MAX_LISTED_PROBLEMS: usize = 10;

pub struct NotificationReporter {
    pub max_chars: usize,
}

impl Default for NotificationReporter {
    fn default() -> Self {
        Self {
            max_chars: MAX_NOTIFICATION_CHARS,
        }
    }
}

impl Reporter for NotificationReporter {
    fn name(&self) -> &'static str {
        "notification"
    }

    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, String> {
        let run = ctx.run;
        let mut out = format!(
            "Repository health {}\n{}\n",
            run.date,
            grade_line(run.grade, run.counts.critical, run.counts.warning)
        );

        let problems: Vec<_> = ordered_findings(&run.findings)
            .into_iter()
            .filter(|f| f.severity.is_problem())
            .collect();
        if problems.is_empty() {
            out.push_str("All checks passed.\n");
        } else {
            out.push('\n');
            for f in problems.iter().take(MAX_LISTED_PROBLEMS) {
                out.push_str(&format!("{} {}: {}\n", f.severity.icon(), f.category.title(), f.message));
            }
            if problems.len() > MAX_LISTED_PROBLEMS {
                out.push_str(&format!("+{} more\n", problems.len() - MAX_LISTED_PROBLEMS));
            }
        }

        for r in &ctx.analysis.regressions {
            out.push_str(&format!("Regression: {}\n", r.message));
        }
        for r in &ctx.analysis.recurring {
            out.push_str(&format!("{}\n", r.message));
        }
        if let Some(fixes) = ctx.fixes {
            let applied = fixes.results.iter().filter(|r| r.succeeded()).count();
            let failed = fixes.results.len() - applied;
            out.push_str(&format!("Auto-fix: {applied} applied, {failed} failed"));
            if fixes.pushed {
                out.push_str(", pushed");
            }
            out.push('\n');
        }

        Ok(truncate_chars(out.trim_end(), self.max_chars))
    }
}

/// Cut to at most `max` characters, marking the cut with `…`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
