//! Fixture repositories for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use git2::{Repository, Signature};
use serde_json::json;
use tempfile::TempDir;

use vigil_analysis::AuditEngine;
use vigil_core::config::VigilConfig;
use vigil_core::traits::FixedClock;

/// A content repository plus a separate state directory.
pub struct Fixture {
    repo: TempDir,
    state: TempDir,
    pub config: VigilConfig,
}

impl Fixture {
    /// Empty `kb/`, `memory/` and `scripts/`, notifications off.
    pub fn new() -> Self {
        let repo = TempDir::new().expect("create repo dir");
        let state = TempDir::new().expect("create state dir");
        for dir in ["kb", "memory", "scripts"] {
            fs::create_dir_all(repo.path().join(dir)).expect("create layout");
        }
        let mut config = VigilConfig::default();
        config.state.dir = Some(state.path().display().to_string());
        config.notify.enabled = Some(false);
        Self { repo, state, config }
    }

    /// `count` well-formed documents, a matching index and discovery maps.
    pub fn healthy(count: usize) -> Self {
        let fixture = Self::new();
        for i in 0..count {
            fixture.write_doc(&format!("guides/topic-{i}.md"), &format!("Topic {i}"));
        }
        fixture.write_index();
        fixture
    }

    pub fn root(&self) -> &Path {
        self.repo.path()
    }

    pub fn state_dir(&self) -> &Path {
        self.state.path()
    }

    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.state
            .path()
            .join("reports")
            .join(format!("health-{}.md", date.format("%Y-%m-%d")))
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.repo.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write fixture file");
    }

    pub fn write_state(&self, name: &str, content: &str) {
        fs::write(self.state.path().join(name), content).expect("write state file");
    }

    /// A document carrying every required header key. `rel` is under `kb/`.
    pub fn write_doc(&self, rel: &str, title: &str) {
        self.write(
            &format!("kb/{rel}"),
            &format!(
                "---\ntitle: {title}\ncategory: guides\ntags: [ops, reference]\nsummary: Notes about {title}.\n---\n\n# {title}\n\nPlain reference material.\n"
            ),
        );
    }

    /// A document with no header at all.
    pub fn write_bare_doc(&self, rel: &str) {
        self.write(&format!("kb/{rel}"), "# Bare\n\nNo header here.\n");
    }

    /// Markdown documents currently under `kb/`, content-relative.
    pub fn documents(&self) -> Vec<String> {
        let mut docs = Vec::new();
        collect_markdown(&self.repo.path().join("kb"), "", &mut docs);
        docs.sort();
        docs
    }

    /// Index, topic map and keyword map listing every current document.
    pub fn write_index(&self) {
        let docs = self.documents();
        self.write(
            "kb/_index.json",
            &json!({ "totalFiles": docs.len(), "generatedAt": "2026-05-01T00:00:00Z", "files": docs }).to_string(),
        );
        self.write("kb/_topics.json", &json!({ "topics": { "guides": docs } }).to_string());
        self.write("kb/_keywords.json", &json!({ "keywords": { "reference": docs } }).to_string());
    }

    /// Initialize a git repository and commit everything.
    pub fn commit_all(&self, message: &str) -> Repository {
        let repo = match Repository::open(self.repo.path()) {
            Ok(r) => r,
            Err(_) => Repository::init(self.repo.path()).expect("git init"),
        };
        {
            let mut index = repo.index().expect("index");
            index
                .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
                .expect("add all");
            index.write().expect("write index");
            let tree_id = index.write_tree().expect("write tree");
            let tree = repo.find_tree(tree_id).expect("find tree");
            let sig = Signature::now("Fixture", "fixture@example.com").expect("signature");
            let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
            let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
            repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
                .expect("commit");
        }
        repo
    }

    pub fn engine(&self, date: NaiveDate) -> AuditEngine {
        AuditEngine::new(self.repo.path(), self.config.clone()).with_clock(FixedClock::on_date(date))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn collect_markdown(dir: &Path, prefix: &str, out: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let rel = if prefix.is_empty() { name.clone() } else { format!("{prefix}/{name}") };
        let path = entry.path();
        if path.is_dir() {
            collect_markdown(&path, &rel, out);
        } else if name.ends_with(".md") {
            out.push(rel);
        }
    }
}
