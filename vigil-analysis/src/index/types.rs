//! On-disk shapes of the index documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `_index.json`: `{ totalFiles, generatedAt, files: [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIndex {
    pub total_files: u64,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

/// `_topics.json`: `{ topics: { name: [paths] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicMap {
    #[serde(default)]
    pub topics: BTreeMap<String, Vec<String>>,
}

/// `_keywords.json`: `{ keywords: { keyword: [paths] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMap {
    #[serde(default)]
    pub keywords: BTreeMap<String, Vec<String>>,
}
