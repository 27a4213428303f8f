//! Ahead/behind tracking status per local branch.
//!
//! One `for-each-ref` invocation yields a line per branch packing the
//! push-side and upstream-side tracking summaries, both remote refs, and the
//! branch short name. The grammar in `parse` decomposes each line; the
//! precedence rules in `resolve` turn it into displayable counts; results
//! are memoized per query scope with single-flight semantics so concurrent
//! callers share one git invocation.

mod cache;
mod parse;
mod resolve;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::git::{DETACHED_HEAD_LABEL, GitExecutor};
use cache::ScopeCache;
use parse::tracked_lines;

pub use resolve::{AheadBehindData, GONE_REMOTE};

/// Published mapping from branch name to its tracking summary.
///
/// Built once per cache generation and shared read-only by every caller
/// that observed that generation.
pub type AheadBehindSet = IndexMap<String, AheadBehindData>;

/// Field layout requested from `for-each-ref`, five fields joined by `::`.
/// Colons are invalid in ref names and absent from tracking summaries, so
/// the delimiter cannot collide with field content.
const REF_FORMAT: &str = "%(push:track,nobracket)::%(upstream:track,nobracket)::%(push:short)::%(upstream:short)::%(refname:short)";

/// The set of branches one cached computation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryScope {
    AllBranches,
    Branch(String),
}

impl QueryScope {
    fn from_filter(branch_name: &str) -> Self {
        if branch_name.is_empty() {
            Self::AllBranches
        } else {
            Self::Branch(branch_name.to_string())
        }
    }

    fn ref_pattern(&self) -> String {
        match self {
            Self::AllBranches => "refs/heads/".to_string(),
            Self::Branch(name) => format!("refs/heads/{name}"),
        }
    }
}

/// Computes ahead/behind tracking data for local branches, caching the
/// result per query scope.
///
/// # Examples
///
/// ```no_run
/// use branchtrack::AheadBehindProvider;
/// use branchtrack::git::Repository;
///
/// let provider = AheadBehindProvider::new(Repository::current());
/// if let Some(data) = provider.get_data("") {
///     for record in data.values() {
///         println!("{}: {}", record.branch, record.summary());
///     }
/// }
/// ```
pub struct AheadBehindProvider<E> {
    executor: E,
    enabled: bool,
    cache: ScopeCache,
}

impl<E: GitExecutor> AheadBehindProvider<E> {
    pub fn new(executor: E) -> Self {
        Self::with_enabled(executor, true)
    }

    /// `enabled = false` turns every request into a `None` answer; the
    /// embedding application decides whether this feature runs at all.
    pub fn with_enabled(executor: E, enabled: bool) -> Self {
        Self {
            executor,
            enabled,
            cache: ScopeCache::new(),
        }
    }

    /// Tracking data for one branch, or for all local branches when
    /// `branch_name` is empty.
    ///
    /// Returns `None` when the feature is disabled, `branch_name` is the
    /// detached-HEAD pseudo-branch, the git invocation fails, or it produces
    /// no output; none of these are errors. Repeated calls within one cache
    /// generation return the same shared set.
    pub fn get_data(&self, branch_name: &str) -> Option<Arc<AheadBehindSet>> {
        if !self.enabled || branch_name == DETACHED_HEAD_LABEL {
            return None;
        }

        self.cache
            .request(QueryScope::from_filter(branch_name), |scope| {
                self.fetch(scope)
            })
    }

    /// Drop all cached tracking data; the next request recomputes.
    pub fn reset_cache(&self) {
        self.cache.reset();
    }

    fn fetch(&self, scope: &QueryScope) -> Option<AheadBehindSet> {
        let format = format!("--format={REF_FORMAT}");
        let pattern = scope.ref_pattern();
        let result = self.executor.execute(&["for-each-ref", &format, &pattern]);
        if !result.exited_successfully || result.stdout.is_empty() {
            return None;
        }

        let mut data = AheadBehindSet::new();
        for line in tracked_lines(&result.stdout) {
            match resolve::resolve(&line) {
                Some(record) => {
                    data.insert(record.branch.clone(), record);
                }
                None => log::debug!("no usable remote ref for branch {:?}, skipped", line.branch),
            }
        }
        Some(data)
    }
}
