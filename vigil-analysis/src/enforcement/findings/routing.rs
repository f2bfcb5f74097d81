//! Category -> (priority, action route) table.

use serde::Serialize;

use super::types::{Category, Finding};

/// Who acts on a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionRoute {
    /// The engine can repair it itself with `--fix`.
    Auto,
    /// The content owner fixes it by editing documents.
    ContentOwner,
    /// A human has to decide what to do.
    HumanDecision,
}

impl ActionRoute {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Auto => "Auto-fixable",
            Self::ContentOwner => "Content owner",
            Self::HumanDecision => "Needs human decision",
        }
    }

    /// Report heading. The auto bucket only claims to be handled when
    /// fixes actually ran.
    pub fn heading(&self, fixes_ran: bool) -> &'static str {
        match self {
            Self::Auto if fixes_ran => "Auto-handled",
            other => other.title(),
        }
    }
}

/// Report ordering (lower first) and default action route of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRoute {
    pub priority: u8,
    pub route: ActionRoute,
}

/// The routing table.
pub fn route_for(category: Category) -> CategoryRoute {
    use ActionRoute::*;
    let (priority, route) = match category {
        Category::Credentials => (0, HumanDecision),
        Category::ContentRisk => (1, HumanDecision),
        Category::JobHealth => (2, HumanDecision),
        Category::Trends => (3, HumanDecision),
        Category::SourceControl => (4, HumanDecision),
        Category::IndexFreshness => (5, Auto),
        Category::Orphans => (6, Auto),
        Category::Reachability => (7, Auto),
        Category::Metadata => (8, ContentOwner),
        Category::Structure => (9, ContentOwner),
        Category::Naming => (10, ContentOwner),
        Category::ScriptSprawl => (11, ContentOwner),
        Category::StorageBloat => (12, HumanDecision),
    };
    CategoryRoute { priority, route }
}

/// Bucket a finding lands in.
///
/// Findings carrying a fix key are auto-fixable. Without one, an `Auto`
/// category has nothing to run, so it falls to the content owner.
pub fn bucket_for(finding: &Finding) -> ActionRoute {
    if finding.fix.is_some() {
        return ActionRoute::Auto;
    }
    match route_for(finding.category).route {
        ActionRoute::Auto => ActionRoute::ContentOwner,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_are_unique() {
        let mut seen: Vec<u8> = Category::all().iter().map(|c| route_for(*c).priority).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), Category::all().len());
    }

    #[test]
    fn fix_key_routes_to_auto() {
        let plain = Finding::warning(Category::IndexFreshness, "stale");
        assert_eq!(bucket_for(&plain), ActionRoute::ContentOwner);
        let fixable = plain.clone().with_fix_key("Rebuild content index");
        assert_eq!(bucket_for(&fixable), ActionRoute::Auto);
        let secret = Finding::critical(Category::Credentials, "leak");
        assert_eq!(bucket_for(&secret), ActionRoute::HumanDecision);
    }

    #[test]
    fn auto_heading_depends_on_whether_fixes_ran() {
        assert_eq!(ActionRoute::Auto.heading(false), "Auto-fixable");
        assert_eq!(ActionRoute::Auto.heading(true), "Auto-handled");
        assert_eq!(ActionRoute::ContentOwner.heading(true), "Content owner");
    }
}
