use crate::VcsKind;
use crate::areas::{VersionControl, command_output};
use crate::artifacts::branch::DEFAULT_BRANCH_CANDIDATES;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::layout::BranchLayout;
use crate::artifacts::compare::ContentSource;
use crate::errors::BranchDiffError;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const GIT: &str = "git";
const SHORT_COMMIT_LENGTH: usize = 8;

/// Git work tree; branch copies are the same path on other local branches
#[derive(Debug)]
pub struct Git {
    work_tree: PathBuf,
}

impl Git {
    pub fn detect(dir: &Path) -> bool {
        Command::new(GIT)
            .args(["rev-parse", "--is-inside-work-tree"])
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        let top_level = command_output(
            GIT,
            &["rev-parse", "--show-toplevel"],
            dir,
            &dir.display().to_string(),
        )
        .with_context(|| format!("{} is not inside a git work tree", dir.display()))?;

        Ok(Git {
            work_tree: PathBuf::from(top_level.trim()),
        })
    }

    fn git(&self, args: &[&str], target: &str) -> Result<String, BranchDiffError> {
        command_output(GIT, args, &self.work_tree, target)
    }
}

impl ContentSource for Git {
    /// `target` is a `<revision>:<path>` spec
    fn fetch(&self, target: &str) -> Result<String, BranchDiffError> {
        self.git(&["show", target], target)
    }

    fn fetch_attribution(&self, target: &str) -> Result<Vec<String>, BranchDiffError> {
        let (revision, path) = target.split_once(':').ok_or_else(|| {
            BranchDiffError::fetch(target, "expected a <revision>:<path> target")
        })?;

        let output = self.git(&["blame", "--line-porcelain", revision, "--", path], target)?;
        Ok(parse_line_porcelain(&output))
    }
}

impl VersionControl for Git {
    fn kind(&self) -> VcsKind {
        VcsKind::Git
    }

    fn layout(&self, file: &Path) -> anyhow::Result<BranchLayout> {
        let file_name = file.display().to_string();
        let file_path = file.to_string_lossy();

        let relative_path = self
            .git(
                &["ls-files", "--full-name", "--error-unmatch", "--", &file_path],
                &file_name,
            )
            .map_err(|_| BranchDiffError::NotVersioned {
                file: file_name.clone(),
            })?;
        let relative_path = relative_path
            .lines()
            .next()
            .ok_or_else(|| BranchDiffError::NotVersioned { file: file_name })?;

        Ok(BranchLayout::new(
            self.work_tree.display().to_string(),
            relative_path.to_string(),
        ))
    }

    fn list_branches(&self, _layout: &BranchLayout) -> anyhow::Result<Vec<BranchName>> {
        let listing = self.git(
            &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
            "refs/heads",
        )?;

        Ok(listing
            .lines()
            .map(|name| BranchName::try_parse(name.trim().to_string()))
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn branch_target(&self, layout: &BranchLayout, branch: &BranchName) -> String {
        layout.revision_spec(branch.as_ref())
    }

    fn trunk_target(&self, layout: &BranchLayout) -> anyhow::Result<String> {
        let branches = self.list_branches(layout)?;

        DEFAULT_BRANCH_CANDIDATES
            .iter()
            .find(|candidate| branches.iter().any(|b| b.as_ref() == **candidate))
            .map(|trunk| layout.revision_spec(trunk))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "no default branch found, expected one of: {}",
                    DEFAULT_BRANCH_CANDIDATES.join(", ")
                )
            })
    }

    fn annotate_working(&self, file: &Path) -> Result<Vec<String>, BranchDiffError> {
        let file_path = file.to_string_lossy();
        let output = self.git(&["blame", "--line-porcelain", "--", &file_path], &file_path)?;

        Ok(parse_line_porcelain(&output))
    }
}

/// Turns `git blame --line-porcelain` output into `<commit> <author> <line>`
/// rows, one per source line.
fn parse_line_porcelain(output: &str) -> Vec<String> {
    let mut rows = Vec::new();
    let mut commit = "";
    let mut author = "";

    for line in output.lines() {
        if let Some(code) = line.strip_prefix('\t') {
            rows.push(format!("{commit} {author} {code}"));
        } else if let Some(name) = line.strip_prefix("author ") {
            author = name;
        } else if commit_header(line) {
            commit = &line[..SHORT_COMMIT_LENGTH];
        }
    }

    rows
}

fn commit_header(line: &str) -> bool {
    line.split(' ')
        .next()
        .is_some_and(|sha| sha.len() >= 40 && sha.chars().all(|c| c.is_ascii_hexdigit()))
}
