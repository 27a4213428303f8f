//! End-to-end tracking queries against throwaway git repositories.
//!
//! Each test builds a bare origin plus one working clone in a tempdir, with
//! git config and identity isolated from the host machine.

use std::path::{Path, PathBuf};
use std::process::Command;

use branchtrack::git::Repository;
use branchtrack::{AheadBehindProvider, GONE_REMOTE};
use tempfile::TempDir;

struct TrackedRepo {
    tmp: TempDir,
    work: PathBuf,
}

impl TrackedRepo {
    /// Bare origin plus one working repository with `main` pushed upstream.
    fn setup() -> Self {
        let tmp = TempDir::new().expect("create tempdir");
        let origin = tmp.path().join("origin.git");
        let work = tmp.path().join("work");
        std::fs::create_dir_all(&origin).expect("create origin dir");
        std::fs::create_dir_all(&work).expect("create work dir");
        std::fs::write(tmp.path().join("gitconfig"), "").expect("create empty global config");

        let repo = Self { tmp, work };
        repo.git(&repo.origin(), &["init", "--bare", "--initial-branch=main"]);

        let origin = repo.origin();
        let origin = origin.to_str().expect("utf-8 origin path");
        repo.git(&repo.work, &["init", "--initial-branch=main"]);
        repo.git(&repo.work, &["remote", "add", "origin", origin]);
        // Pin the push destination so %(push:*) atoms resolve the same way
        // regardless of the git version's baked-in default.
        repo.git(&repo.work, &["config", "push.default", "simple"]);
        repo.commit("initial");
        repo.git(&repo.work, &["push", "-u", "origin", "main"]);
        repo
    }

    fn origin(&self) -> PathBuf {
        self.tmp.path().join("origin.git")
    }

    fn commit(&self, message: &str) {
        self.git(&self.work, &["commit", "--allow-empty", "-m", message]);
    }

    fn git(&self, dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .env("GIT_CONFIG_GLOBAL", self.tmp.path().join("gitconfig"))
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", "tester")
            .env("GIT_AUTHOR_EMAIL", "tester@example.com")
            .env("GIT_COMMITTER_NAME", "tester")
            .env("GIT_COMMITTER_EMAIL", "tester@example.com")
            .env("LC_ALL", "C")
            .output()
            .expect("git is installed");
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn provider(&self) -> AheadBehindProvider<Repository> {
        AheadBehindProvider::new(Repository::at(&self.work))
    }
}

#[test]
fn freshly_pushed_branch_is_in_sync() {
    let repo = TrackedRepo::setup();

    let data = repo.provider().get_data("").expect("tracking data");
    let record = &data["main"];

    assert_eq!(record.remote_ref, "origin/main");
    assert_eq!(record.ahead_count, "0");
    assert_eq!(record.behind_count, "");
}

#[test]
fn unpushed_commits_count_as_ahead() {
    let repo = TrackedRepo::setup();
    repo.commit("wip");

    let data = repo.provider().get_data("main").expect("tracking data");
    let record = &data["main"];

    assert_eq!(record.ahead_count, "1");
    assert_eq!(record.behind_count, "");
}

#[test]
fn reset_below_the_remote_counts_as_behind() {
    let repo = TrackedRepo::setup();
    repo.commit("one");
    repo.commit("two");
    repo.git(&repo.work, &["push", "origin", "main"]);
    repo.git(&repo.work, &["reset", "--hard", "HEAD~2"]);

    let data = repo.provider().get_data("").expect("tracking data");
    let record = &data["main"];

    // The push side reports only "behind", so ahead is not applicable.
    assert_eq!(record.ahead_count, "");
    assert_eq!(record.behind_count, "2");
}

#[test]
fn deleted_remote_branch_reports_gone() {
    let repo = TrackedRepo::setup();
    repo.git(&repo.work, &["switch", "--create", "feature"]);
    repo.git(&repo.work, &["push", "-u", "origin", "feature"]);
    repo.git(&repo.work, &["push", "origin", "--delete", "feature"]);

    let data = repo.provider().get_data("feature").expect("tracking data");
    let record = &data["feature"];

    assert_eq!(record.ahead_count, GONE_REMOTE);
    assert_eq!(record.behind_count, "");
    assert_eq!(record.remote_ref, "origin/feature");
}

#[test]
fn local_only_branches_are_dropped_from_the_set() {
    let repo = TrackedRepo::setup();
    repo.git(&repo.work, &["branch", "scratch"]);

    let data = repo.provider().get_data("").expect("tracking data");

    assert!(data.contains_key("main"));
    assert!(!data.contains_key("scratch"));
}

#[test]
fn cache_survives_repository_changes_until_reset() {
    let repo = TrackedRepo::setup();
    let provider = repo.provider();

    let before = provider.get_data("").expect("tracking data");
    assert_eq!(before["main"].ahead_count, "0");

    repo.commit("wip");

    // Still the published generation; the new commit is invisible.
    let cached = provider.get_data("").expect("tracking data");
    assert_eq!(cached["main"].ahead_count, "0");

    provider.reset_cache();
    let after = provider.get_data("").expect("tracking data");
    assert_eq!(after["main"].ahead_count, "1");
}

#[test]
fn current_branch_resolves_and_detaching_clears_it() {
    let repo = TrackedRepo::setup();
    let repository = Repository::at(&repo.work);

    assert_eq!(
        repository.current_branch().expect("branch query").as_deref(),
        Some("main")
    );

    repo.git(&repo.work, &["checkout", "--detach"]);
    assert_eq!(
        repository.current_branch().expect("branch query"),
        None
    );
}
