use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::BranchDiffError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> Result<Self, BranchDiffError> {
        if name.is_empty() {
            return Err(BranchDiffError::InvalidBranchName(
                "branch name cannot be empty".to_string(),
            ));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .map_err(|e| BranchDiffError::InvalidBranchName(e.to_string()))?;

        if re.is_match(&name) {
            Err(BranchDiffError::InvalidBranchName(name))
        } else {
            Ok(Self(name))
        }
    }

    /// Parses a comma-separated list, skipping empty entries
    pub fn try_parse_list(list: &str) -> Result<Vec<Self>, BranchDiffError> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Self::try_parse(name.to_string()))
            .collect()
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
