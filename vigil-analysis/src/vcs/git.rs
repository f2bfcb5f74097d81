//! git2-backed repository inspection and the maintenance commit.
//!
//! Network operations are not done through git2; publishing shells out to
//! `git push` with a timeout (see `enforcement::fixes`).

use std::collections::BTreeMap;
use std::hash::Hasher;
use std::path::{Path, PathBuf};

use git2::{Branch, Commit, ErrorCode, Oid, Repository, Signature, Status, StatusOptions};
use rustc_hash::FxHasher;

/// Upstream relationship of the checked-out branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamState {
    /// No commits yet, or the branch tracks nothing.
    NoUpstream,
    /// HEAD is not on a branch.
    Detached,
    Tracking {
        name: String,
        ahead: usize,
        behind: usize,
    },
}

/// What the source-control check needs to know.
#[derive(Debug, Clone)]
pub struct RepoStatus {
    pub branch: Option<String>,
    /// `XY path` lines for every non-ignored change, sorted by path.
    pub changes: Vec<String>,
    pub upstream: UpstreamState,
}

/// Working-state fingerprint: status bits plus a content hash per dirty path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: BTreeMap<String, (u32, u64)>,
}

impl StatusSnapshot {
    /// Paths whose status or content differs from `before`, sorted.
    pub fn changed_since(&self, before: &StatusSnapshot) -> Vec<String> {
        let mut changed: Vec<String> = self
            .entries
            .iter()
            .filter(|(path, state)| before.entries.get(*path) != Some(*state))
            .map(|(path, _)| path.clone())
            .collect();
        for path in before.entries.keys() {
            if !self.entries.contains_key(path) {
                changed.push(path.clone());
            }
        }
        changed.sort();
        changed.dedup();
        changed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An opened, non-bare repository.
pub struct GitRepo {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path`. Not a repository, or a bare one,
    /// is `Ok(None)`.
    pub fn open(path: &Path) -> Result<Option<Self>, git2::Error> {
        let repo = match Repository::open(path) {
            Ok(r) => r,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let Some(workdir) = repo.workdir().map(Path::to_path_buf) else {
            return Ok(None);
        };
        Ok(Some(Self { repo, workdir }))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn status(&self) -> Result<RepoStatus, git2::Error> {
        let mut changes = Vec::new();
        for entry in self.statuses()?.iter() {
            let Some(path) = entry.path() else { continue };
            changes.push(format!("{} {}", status_code(entry.status()), path));
        }
        changes.sort_by(|a, b| a[3..].cmp(&b[3..]));
        let (branch, upstream) = self.upstream_state()?;
        Ok(RepoStatus {
            branch,
            changes,
            upstream,
        })
    }

    /// Fingerprint of every non-ignored change in the working tree.
    pub fn snapshot(&self) -> Result<StatusSnapshot, git2::Error> {
        let mut entries = BTreeMap::new();
        for entry in self.statuses()?.iter() {
            let Some(path) = entry.path() else { continue };
            let hash = hash_file(&self.workdir.join(path));
            entries.insert(path.to_string(), (entry.status().bits(), hash));
        }
        Ok(StatusSnapshot { entries })
    }

    /// Stage exactly `paths` (added if present, removed if gone) and commit.
    pub fn commit_paths(
        &self,
        paths: &[String],
        message: &str,
        fallback_name: &str,
        fallback_email: &str,
    ) -> Result<Oid, git2::Error> {
        let mut index = self.repo.index()?;
        for path in paths {
            let rel = Path::new(path);
            if self.workdir.join(rel).exists() {
                index.add_path(rel)?;
            } else {
                index.remove_path(rel)?;
            }
        }
        index.write()?;
        let tree = self.repo.find_tree(index.write_tree()?)?;

        let signature = match self.repo.signature() {
            Ok(sig) => sig,
            Err(_) => Signature::now(fallback_name, fallback_email)?,
        };
        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e),
        };
        let parents: Vec<&Commit<'_>> = parent.iter().collect();
        self.repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
    }

    fn statuses(&self) -> Result<git2::Statuses<'_>, git2::Error> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(false);
        self.repo.statuses(Some(&mut opts))
    }

    fn upstream_state(&self) -> Result<(Option<String>, UpstreamState), git2::Error> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok((None, UpstreamState::NoUpstream))
            }
            Err(e) => return Err(e),
        };
        if !head.is_branch() {
            return Ok((None, UpstreamState::Detached));
        }
        let name = head.shorthand().map(str::to_string);
        let branch = Branch::wrap(head);
        let upstream = match branch.upstream() {
            Ok(u) => u,
            Err(_) => return Ok((name, UpstreamState::NoUpstream)),
        };
        let upstream_name = upstream.name()?.unwrap_or("upstream").to_string();
        match (branch.get().target(), upstream.get().target()) {
            (Some(local), Some(remote)) => {
                let (ahead, behind) = self.repo.graph_ahead_behind(local, remote)?;
                Ok((
                    name,
                    UpstreamState::Tracking {
                        name: upstream_name,
                        ahead,
                        behind,
                    },
                ))
            }
            _ => Ok((name, UpstreamState::NoUpstream)),
        }
    }
}

/// Two-letter porcelain-style code.
fn status_code(status: Status) -> &'static str {
    if status.contains(Status::WT_NEW) {
        "??"
    } else if status.intersects(Status::INDEX_NEW) {
        "A "
    } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
        " D"
    } else if status.intersects(Status::INDEX_RENAMED | Status::WT_RENAMED) {
        " R"
    } else if status.intersects(Status::CONFLICTED) {
        "UU"
    } else {
        " M"
    }
}

fn hash_file(path: &Path) -> u64 {
    match std::fs::read(path) {
        Ok(bytes) => {
            let mut hasher = FxHasher::default();
            hasher.write(&bytes);
            hasher.finish()
        }
        Err(_) => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_since_detects_new_modified_and_reverted() {
        let mut before = StatusSnapshot::default();
        before.entries.insert("a.md".into(), (1, 10));
        before.entries.insert("b.md".into(), (1, 20));
        let mut after = before.clone();
        after.entries.insert("a.md".into(), (1, 11));
        after.entries.remove("b.md");
        after.entries.insert("c.md".into(), (128, 30));
        assert_eq!(after.changed_since(&before), vec!["a.md", "b.md", "c.md"]);
        assert!(before.changed_since(&before).is_empty());
    }

    #[test]
    fn non_repository_opens_as_none() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GitRepo::open(dir.path()).unwrap().is_none());
    }
}
