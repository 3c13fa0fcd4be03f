use crate::common::file::{FileSpec, write_file};
use crate::common::{GIT_AUTHOR, GIT_DATE, GIT_EMAIL};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const APP_FILE: &str = "pkg/app.py";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn app_source() -> String {
    r#"import os


class Handler:
    def run(self):
        a = 1
        return a

    def stop(self):
        pass
"#
    .to_string()
}

#[fixture]
pub fn changed_app_source() -> String {
    r#"import os


class Handler:
    def stop(self):
        pass

    def run(self):
        a = 2
        return a
"#
    .to_string()
}

#[fixture]
pub fn removed_app_source() -> String {
    r#"import os


class Handler:
    def stop(self):
        pass
"#
    .to_string()
}

/// A git repository whose `main` holds `pkg/app.py`, with branches where the
/// `Handler.run` block is unchanged, edited and deleted.
#[fixture]
pub fn branched_repository_dir(
    repository_dir: TempDir,
    app_source: String,
    changed_app_source: String,
    removed_app_source: String,
) -> TempDir {
    let dir = repository_dir.path();
    let app_file = dir.join(APP_FILE);

    git(dir, &["init", "-q"]);
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    write_file(FileSpec::new(app_file.clone(), app_source));
    git(dir, &["add", "."]);
    git_commit(dir, "Initial commit");

    git(dir, &["branch", "identical"]);

    git(dir, &["checkout", "-q", "-b", "changed"]);
    write_file(FileSpec::new(app_file.clone(), changed_app_source));
    git_commit(dir, "Change run");

    git(dir, &["checkout", "-q", "-b", "removed", "main"]);
    write_file(FileSpec::new(app_file, removed_app_source));
    git_commit(dir, "Remove run");

    git(dir, &["checkout", "-q", "main"]);

    repository_dir
}

pub fn run_branchdiff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("branchdiff").expect("Failed to find branchdiff binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("BRANCHDIFF_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", GIT_AUTHOR),
        ("GIT_AUTHOR_EMAIL", GIT_EMAIL),
        ("GIT_AUTHOR_DATE", GIT_DATE),
        ("GIT_COMMITTER_NAME", GIT_AUTHOR),
        ("GIT_COMMITTER_EMAIL", GIT_EMAIL),
        ("GIT_COMMITTER_DATE", GIT_DATE),
    ]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn git(dir: &Path, args: &[&str]) {
    run_git_command(dir, args).assert().success();
}

pub fn git_commit(dir: &Path, message: &str) {
    git(dir, &["commit", "-q", "-a", "-m", message]);
}
