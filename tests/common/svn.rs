//! A working copy served by a stand-in `svn` script.
//!
//! The script answers `info`, `ls`, `cat` and `ann` the way a repository at
//! [`SVN_ROOT`] with branches `changed`, `identical` and `removed` would.

use crate::common::command::{
    APP_FILE, app_source, changed_app_source, removed_app_source, repository_dir,
    run_branchdiff_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

pub const SVN_ROOT: &str = "https://svn.example.com/repo";

const STUB_DIR: &str = ".svn-stub";

const SVN_SCRIPT: &str = r#"#!/bin/sh
store='@STORE@'
command="$1"
target="$2"

resolve() {
    case "$1" in
        */branches/*/pkg/app.py)
            branch="${1%/pkg/app.py}"
            echo "$store/${branch##*/}.py"
            ;;
        */trunk/pkg/app.py)
            echo "$store/trunk.py"
            ;;
        /*)
            echo "$1"
            ;;
    esac
}

case "$command" in
    info)
        echo "Path: $target"
        echo "URL: @ROOT@/trunk/pkg/app.py"
        echo "Revision: 42"
        ;;
    ls)
        printf 'changed/\nidentical/\nremoved/\nREADME.txt\n'
        ;;
    cat|ann)
        file=$(resolve "$target")
        if [ -z "$file" ] || [ ! -f "$file" ]; then
            echo "svn: E160013: path not found: $target" >&2
            exit 1
        fi
        if [ "$command" = cat ]; then
            cat "$file"
        else
            sed -e 's/^        a = 2$/     2      alice &/' -e t -e 's/^/     1        dev /' "$file"
        fi
        ;;
    *)
        echo "svn: unknown subcommand: $command" >&2
        exit 1
        ;;
esac
"#;

pub fn branch_url(branch: &str) -> String {
    format!("{SVN_ROOT}/branches/{branch}/{APP_FILE}")
}

pub fn trunk_url() -> String {
    format!("{SVN_ROOT}/trunk/{APP_FILE}")
}

/// A working copy of trunk holding `pkg/app.py`, with the repository's
/// branch copies kept next to the stub script.
#[fixture]
pub fn svn_working_copy_dir(
    repository_dir: TempDir,
    app_source: String,
    changed_app_source: String,
    removed_app_source: String,
) -> TempDir {
    let dir = repository_dir.path();
    let store = dir.join(STUB_DIR).join("store");

    write_file(FileSpec::new(dir.join(APP_FILE), app_source.clone()));
    write_file(FileSpec::new(store.join("trunk.py"), app_source.clone()));
    write_file(FileSpec::new(store.join("identical.py"), app_source));
    write_file(FileSpec::new(store.join("changed.py"), changed_app_source));
    write_file(FileSpec::new(store.join("removed.py"), removed_app_source));

    let script = SVN_SCRIPT
        .replace("@STORE@", &store.display().to_string())
        .replace("@ROOT@", SVN_ROOT);
    let script_path = stub_bin_dir(dir).join("svn");
    write_file(FileSpec::new(script_path.clone(), script));
    make_executable(&script_path);

    repository_dir
}

fn stub_bin_dir(dir: &Path) -> PathBuf {
    dir.join(STUB_DIR).join("bin")
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)
        .unwrap_or_else(|e| panic!("Failed to stat {:?}: {}", path, e))
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(path, permissions)
        .unwrap_or_else(|e| panic!("Failed to make {:?} executable: {}", path, e));
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Runs branchdiff against the Subversion backend with the stub first on `PATH`
pub fn run_svn_branchdiff_command(dir: &Path, args: &[&str]) -> Command {
    let inherited = std::env::var_os("PATH").unwrap_or_default();
    let path = std::env::join_paths(
        std::iter::once(stub_bin_dir(dir)).chain(std::env::split_paths(&inherited)),
    )
    .expect("Failed to build PATH");

    let mut args_with_vcs = vec!["--vcs", "svn"];
    args_with_vcs.extend_from_slice(args);

    let mut cmd = run_branchdiff_command(dir, &args_with_vcs);
    cmd.env("PATH", path);
    cmd
}
