//! Collaborators that reach outside the process
//!
//! - `workspace`: the local working copy holding the base file
//! - `svn`: Subversion backend (`svn info`, `svn ls`, `svn cat`, `svn ann`)
//! - `git`: Git backend (`git show`, `git blame`, local branches)
//! - `repository`: ties the workspace, a backend and the output writer together

pub mod git;
pub mod repository;
pub mod svn;
pub mod workspace;

use crate::VcsKind;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::layout::BranchLayout;
use crate::artifacts::compare::ContentSource;
use crate::errors::BranchDiffError;
use std::path::Path;
use std::process::Command;

/// A version-control system that can serve branch copies of a file
pub trait VersionControl: ContentSource {
    fn kind(&self) -> VcsKind;

    /// Locates `file` inside the repository's branch structure
    fn layout(&self, file: &Path) -> anyhow::Result<BranchLayout>;

    fn list_branches(&self, layout: &BranchLayout) -> anyhow::Result<Vec<BranchName>>;

    /// Target identifier of the file on `branch`
    fn branch_target(&self, layout: &BranchLayout, branch: &BranchName) -> String;

    /// Target identifier of the file on the mainline
    fn trunk_target(&self, layout: &BranchLayout) -> anyhow::Result<String>;

    /// Attribution of the local, possibly modified, working file
    fn annotate_working(&self, file: &Path) -> Result<Vec<String>, BranchDiffError>;
}

/// Opens the backend for `file`, detecting the kind when not given.
pub fn open_vcs(kind: Option<VcsKind>, file: &Path) -> anyhow::Result<Box<dyn VersionControl>> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };

    let kind = kind.unwrap_or_else(|| {
        if git::Git::detect(&dir) {
            VcsKind::Git
        } else {
            VcsKind::Svn
        }
    });
    log::debug!("using {kind:?} backend for {}", file.display());

    let vcs: Box<dyn VersionControl> = match kind {
        VcsKind::Git => Box::new(git::Git::open(&dir)?),
        VcsKind::Svn => Box::new(svn::Subversion::new(dir)),
    };

    Ok(vcs)
}

/// Runs `program` with `args` in `dir`, returning its standard output.
///
/// Spawn failures and non-zero exits are reported as fetch errors for
/// `target`.
pub(crate) fn command_output(
    program: &str,
    args: &[&str],
    dir: &Path,
    target: &str,
) -> Result<String, BranchDiffError> {
    log::debug!("running {program} {} in {}", args.join(" "), dir.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| BranchDiffError::fetch(target, format!("cannot run {program}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BranchDiffError::fetch(target, stderr.trim()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
