//! Pattern catalogue: credential and content-risk rules, plus naming rules.

pub mod catalog;
pub mod matcher;
pub mod naming;

pub use catalog::{PatternDef, PatternKind, CATALOG, CATALOG_VERSION};
pub use matcher::{content_risk_matcher, credential_matcher, PatternMatch, PatternMatcher};
