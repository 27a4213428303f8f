//! Typed errors for repository operations.

/// Domain errors that callers may pattern-match after downcasting from
/// [`anyhow::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitError {
    /// HEAD does not point at a branch.
    DetachedHead,
    /// The spawned git process exited non-zero.
    CommandFailed(String),
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::DetachedHead => write!(f, "Not on a branch (detached HEAD)"),
            GitError::CommandFailed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for GitError {}
