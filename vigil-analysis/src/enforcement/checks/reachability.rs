//! Discoverability through the topic and keyword maps.

use vigil_core::errors::CheckError;

use super::{plural, Check, CheckContext};
use crate::enforcement::findings::{bounded_list, Category, CheckOutcome, Finding};
use crate::index::{load_json, IndexSet, KeywordMap, TopicMap};

pub struct ReachabilityCheck;

impl Check for ReachabilityCheck {
    fn id(&self) -> &'static str {
        "reachability"
    }

    fn category(&self) -> Category {
        Category::Reachability
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, CheckError> {
        let layout = &ctx.config.layout;
        let root = &ctx.snapshot.content_root;
        let topics = load_json::<TopicMap>(&root.join(layout.effective_topics_file()))?;
        let keywords = load_json::<KeywordMap>(&root.join(layout.effective_keywords_file()))?;

        let (Some(topics), Some(keywords)) = (topics, keywords) else {
            return Ok(CheckOutcome::single(Finding::info(
                Category::Reachability,
                "Discovery maps not generated; reachability check skipped",
            )));
        };

        let content_dir = ctx.content_dir();
        let by_topic = IndexSet::from_entries(topics.topics.values().flatten(), content_dir);
        let by_keyword = IndexSet::from_entries(keywords.keywords.values().flatten(), content_dir);

        let mut unreachable = Vec::new();
        let mut partial = Vec::new();
        for doc in ctx.snapshot.documents() {
            match (by_topic.contains(&doc.relative), by_keyword.contains(&doc.relative)) {
                (true, true) => {}
                (false, false) => unreachable.push(ctx.snapshot.repo_relative(doc)),
                (in_topics, _) => partial.push(format!(
                    "{} (no {})",
                    ctx.snapshot.repo_relative(doc),
                    if in_topics { "keyword" } else { "topic" }
                )),
            }
        }

        let mut outcome = CheckOutcome::new();
        if !unreachable.is_empty() {
            let mut finding = Finding::warning(
                Category::Reachability,
                format!(
                    "{} reachable by neither topic nor keyword",
                    plural(unreachable.len(), "document is", "documents are")
                ),
            )
            .with_details(bounded_list(&unreachable));
            if let Some(fix) = ctx.rebuild_fix() {
                finding = finding.with_fix(&fix);
                outcome.push_fix(fix);
            }
            outcome.push(finding);
        }
        if !partial.is_empty() {
            outcome.push(
                Finding::info(
                    Category::Reachability,
                    format!(
                        "{} reachable through only one discovery map",
                        plural(partial.len(), "document is", "documents are")
                    ),
                )
                .with_details(bounded_list(&partial)),
            );
        }
        if outcome.findings.is_empty() {
            outcome.push(Finding::ok(
                Category::Reachability,
                "Every document is reachable by topic and keyword",
            ));
        }
        Ok(outcome)
    }
}
