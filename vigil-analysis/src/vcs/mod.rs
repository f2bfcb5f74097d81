//! Version control: status inspection and the maintenance commit.

pub mod git;

pub use git::{GitRepo, RepoStatus, StatusSnapshot, UpstreamState};
