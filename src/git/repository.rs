//! Repository context that spawns the real git binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;

use super::{ExecutionResult, GitError, GitExecutor};

/// Repository context for git operations.
///
/// Encapsulates the working directory every git invocation runs in.
///
/// # Examples
///
/// ```no_run
/// use branchtrack::git::Repository;
///
/// let repo = Repository::current();
/// let branch = repo.current_branch()?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a repository context for the current directory.
    ///
    /// This is the most common usage pattern.
    pub fn current() -> Self {
        Self::at(".")
    }

    /// Get the path this repository context operates on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current branch name, or `None` in detached HEAD state.
    pub fn current_branch(&self) -> anyhow::Result<Option<String>> {
        let stdout = self.run_command(&["branch", "--show-current"])?;
        let branch = stdout.trim();
        Ok((!branch.is_empty()).then(|| branch.to_string()))
    }

    /// Get the current branch name, or a typed error in detached HEAD state.
    pub fn require_current_branch(&self) -> anyhow::Result<String> {
        self.current_branch()?
            .ok_or_else(|| GitError::DetachedHead.into())
    }

    /// Run a git command in this repository's context and return its stdout.
    pub fn run_command(&self, args: &[&str]) -> anyhow::Result<String> {
        log::debug!("$ git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .output()
            .with_context(|| format!("Failed to execute: git {}", args.join(" ")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            for line in stderr.trim().lines() {
                log::debug!("  ! {}", line);
            }
            return Err(GitError::CommandFailed(stderr.trim().to_string()).into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GitExecutor for Repository {
    /// Run git and report the outcome as data, never as an error.
    ///
    /// A process that cannot be spawned at all (git missing from PATH) is
    /// folded into the unsuccessful case; the tracking layer degrades to
    /// "no data" either way.
    fn execute(&self, args: &[&str]) -> ExecutionResult {
        log::debug!("$ git {}", args.join(" "));

        match Command::new("git").args(args).current_dir(&self.path).output() {
            Ok(output) => {
                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    for line in stderr.trim().lines() {
                        log::debug!("  ! {}", line);
                    }
                }
                ExecutionResult {
                    exited_successfully: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                }
            }
            Err(e) => {
                log::debug!("  ! {}", e);
                ExecutionResult::default()
            }
        }
    }
}
