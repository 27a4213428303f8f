//! Ahead/behind tracking status for local git branches.
//!
//! Branchtrack answers one question for a repository-browsing UI: how many
//! commits is each local branch ahead of and behind the remote it pushes to
//! and the remote it pulls from? A single `git for-each-ref` invocation
//! yields one densely packed line per branch; the [`track`] module decomposes
//! those lines and caches the resolved counts per query scope.
//!
//! The library API is not stable. If you're building tooling that integrates
//! with branchtrack, please open an issue to discuss your use case.

pub mod git;
pub mod track;

pub use track::{AheadBehindData, AheadBehindProvider, AheadBehindSet, GONE_REMOTE};
