//! Reporters: output formats for an audit run.
//!
//! `markdown` is the durable report archived per day, `notification` the
//! condensed operator alert, `console` and `json` the CLI outputs.

pub mod console;
pub mod json;
pub mod markdown;
pub mod notification;

use vigil_core::types::Grade;
use vigil_storage::TrendEntry;

use crate::enforcement::audit::{AuditRun, TrendAnalysis};
use crate::enforcement::findings::{bucket_for, route_for, ActionRoute, Finding};
use crate::enforcement::fixes::FixReport;

/// Everything a reporter may render.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub run: &'a AuditRun,
    pub analysis: &'a TrendAnalysis,
    /// Trend series, ascending, including this run's entry.
    pub history: &'a [TrendEntry],
    pub fixes: Option<&'a FixReport>,
    /// Non-fatal engine notes (a trend store that failed to save, ...).
    pub notes: &'a [String],
}

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, ctx: &ReportContext<'_>) -> Result<String, String>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "markdown" => Some(Box::new(markdown::MarkdownReporter)),
        "notification" => Some(Box::new(notification::NotificationReporter::default())),
        "console" => Some(Box::new(console::ConsoleReporter::default())),
        "json" => Some(Box::new(json::JsonReporter)),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["markdown", "notification", "console", "json"]
}

/// Findings by category priority, then severity (worst first). Stable
/// within a category.
pub fn ordered_findings(findings: &[Finding]) -> Vec<&Finding> {
    let mut ordered: Vec<&Finding> = findings.iter().collect();
    ordered.sort_by(|a, b| {
        route_for(a.category)
            .priority
            .cmp(&route_for(b.category).priority)
            .then_with(|| b.severity.cmp(&a.severity))
    });
    ordered
}

/// Critical and Warning findings split into the three action buckets,
/// each in report order.
pub fn action_buckets(findings: &[Finding]) -> [(ActionRoute, Vec<&Finding>); 3] {
    let mut buckets = [
        (ActionRoute::Auto, Vec::new()),
        (ActionRoute::ContentOwner, Vec::new()),
        (ActionRoute::HumanDecision, Vec::new()),
    ];
    for finding in ordered_findings(findings) {
        if !finding.severity.is_problem() {
            continue;
        }
        let route = bucket_for(finding);
        if let Some((_, list)) = buckets.iter_mut().find(|(r, _)| *r == route) {
            list.push(finding);
        }
    }
    buckets
}

/// `Grade B: 0 critical, 2 warning`.
pub(crate) fn grade_line(grade: Grade, critical: u32, warning: u32) -> String {
    format!("Grade {grade}: {critical} critical, {warning} warning")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcement::findings::Category;

    #[test]
    fn every_listed_format_resolves() {
        for format in available_formats() {
            let reporter = create_reporter(format).unwrap();
            assert_eq!(reporter.name(), *format);
        }
        assert!(create_reporter("sarif").is_none());
    }

    #[test]
    fn ordering_is_priority_then_severity() {
        let findings = vec![
            Finding::warning(Category::Naming, "n"),
            Finding::info(Category::Credentials, "ci"),
            Finding::critical(Category::Credentials, "cc"),
        ];
        let order: Vec<&str> = ordered_findings(&findings).iter().map(|f| f.message.as_str()).collect();
        assert_eq!(order, vec!["cc", "ci", "n"]);
    }

    #[test]
    fn buckets_hold_only_problems() {
        let findings = vec![
            Finding::warning(Category::Metadata, "fill").with_fix_key("x"),
            Finding::warning(Category::Orphans, "orphans"),
            Finding::critical(Category::Credentials, "secret"),
            Finding::ok(Category::Structure, "fine"),
        ];
        let buckets = action_buckets(&findings);
        let names = |i: usize| buckets[i].1.iter().map(|f| f.message.as_str()).collect::<Vec<_>>();
        assert_eq!(names(0), vec!["fill"]);
        assert_eq!(names(1), vec!["orphans"]);
        assert_eq!(names(2), vec!["secret"]);
    }
}
