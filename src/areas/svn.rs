use crate::VcsKind;
use crate::areas::{VersionControl, command_output};
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::layout::BranchLayout;
use crate::artifacts::compare::ContentSource;
use crate::errors::BranchDiffError;
use std::path::{Path, PathBuf};

const SVN: &str = "svn";

/// Subversion working copy using the `branches/`, `trunk/`, `tags/` layout
#[derive(Debug)]
pub struct Subversion {
    dir: PathBuf,
}

impl Subversion {
    pub fn new(dir: PathBuf) -> Self {
        Subversion { dir }
    }

    fn svn(&self, args: &[&str], target: &str) -> Result<String, BranchDiffError> {
        command_output(SVN, args, &self.dir, target)
    }
}

impl ContentSource for Subversion {
    fn fetch(&self, target: &str) -> Result<String, BranchDiffError> {
        self.svn(&["cat", target], target)
    }

    fn fetch_attribution(&self, target: &str) -> Result<Vec<String>, BranchDiffError> {
        Ok(self
            .svn(&["ann", target], target)?
            .lines()
            .map(str::to_string)
            .collect())
    }
}

impl VersionControl for Subversion {
    fn kind(&self) -> VcsKind {
        VcsKind::Svn
    }

    fn layout(&self, file: &Path) -> anyhow::Result<BranchLayout> {
        let file_name = file.display().to_string();
        let file_path = file.to_string_lossy();

        let info = self
            .svn(&["info", &file_path], &file_name)
            .map_err(|_| BranchDiffError::NotVersioned {
                file: file_name.clone(),
            })?;
        let url = BranchLayout::svn_url_from_info(&file_name, &info)?;

        Ok(BranchLayout::try_parse_url(&file_name, &url)?)
    }

    fn list_branches(&self, layout: &BranchLayout) -> anyhow::Result<Vec<BranchName>> {
        let root = layout.branches_root();
        let listing = self.svn(&["ls", &root], &root)?;

        Ok(parse_listing(&listing))
    }

    fn branch_target(&self, layout: &BranchLayout, branch: &BranchName) -> String {
        layout.branch_url(branch)
    }

    fn trunk_target(&self, layout: &BranchLayout) -> anyhow::Result<String> {
        Ok(layout.trunk_url())
    }

    fn annotate_working(&self, file: &Path) -> Result<Vec<String>, BranchDiffError> {
        self.fetch_attribution(&file.to_string_lossy())
    }
}

/// Directory entries of `svn ls`, which end with a slash
fn parse_listing(listing: &str) -> Vec<BranchName> {
    listing
        .lines()
        .filter_map(|entry| entry.trim_end().strip_suffix('/'))
        .filter_map(|name| {
            BranchName::try_parse(name.to_string())
                .inspect_err(|e| log::warn!("skipping branch: {e}"))
                .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_keeps_directories_only() {
        let listing = "old/\nstable-1.0/\nREADME.txt\n\nbad name/\n";

        assert_eq!(
            parse_listing(listing)
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>(),
            vec!["old", "stable-1.0"]
        );
    }
}
