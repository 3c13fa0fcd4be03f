use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{BRANCH_LAYOUT_REGEX, BRANCHES_DIR, SVN_INFO_URL_REGEX, TRUNK_DIR};
use crate::errors::BranchDiffError;
use derive_new::new;

/// Where a working file sits in a repository with parallel branch copies.
///
/// For Subversion `root` is the repository URL above `branches/`/`trunk`;
/// for Git it is the work tree's top-level directory.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct BranchLayout {
    root: String,
    relative_path: String,
}

impl BranchLayout {
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Reads the `URL:` field out of `svn info` output
    pub fn svn_url_from_info(file: &str, info: &str) -> Result<String, BranchDiffError> {
        let re = regex::Regex::new(SVN_INFO_URL_REGEX).map_err(|_| {
            BranchDiffError::NotVersioned {
                file: file.to_string(),
            }
        })?;

        re.captures(info)
            .and_then(|caps| caps.get(1))
            .map(|url| url.as_str().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| BranchDiffError::NotVersioned {
                file: file.to_string(),
            })
    }

    /// Splits a URL like `<root>/branches/<name>/<path>`, `<root>/trunk/<path>`
    /// or `<root>/tags/<name>/<path>`.
    pub fn try_parse_url(file: &str, url: &str) -> Result<Self, BranchDiffError> {
        let not_in_layout = || BranchDiffError::NotInBranchLayout {
            file: file.to_string(),
        };

        let re = regex::Regex::new(BRANCH_LAYOUT_REGEX).map_err(|_| not_in_layout())?;
        let caps = re.captures(url).ok_or_else(not_in_layout)?;

        match (caps.get(1), caps.get(2)) {
            (Some(root), Some(relative_path)) => Ok(Self::new(
                root.as_str().to_string(),
                relative_path.as_str().to_string(),
            )),
            _ => Err(not_in_layout()),
        }
    }

    pub fn branches_root(&self) -> String {
        format!("{}/{BRANCHES_DIR}", self.root)
    }

    pub fn branch_url(&self, branch: &BranchName) -> String {
        format!("{}/{branch}/{}", self.branches_root(), self.relative_path)
    }

    pub fn trunk_url(&self) -> String {
        format!("{}/{TRUNK_DIR}/{}", self.root, self.relative_path)
    }

    /// `<revision>:<path>` spec understood by `git show`
    pub fn revision_spec(&self, revision: &str) -> String {
        format!("{revision}:{}", self.relative_path)
    }
}
