//! Error kinds surfaced by branchdiff
//!
//! A missing base block is fatal; fetch failures only affect their own target
//! and end up as MISSING records.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BranchDiffError {
    /// The dotted construct path was empty or had an empty segment
    #[error("invalid block name '{0}': expected Name or Class.method")]
    InvalidDottedPath(String),

    /// The construct could not be located in the given source
    #[error("code block {path} does not exist in {source_id}")]
    ConstructNotFound { path: String, source_id: String },

    /// A target's content could not be retrieved
    #[error("failed to fetch {target}: {message}")]
    Fetch { target: String, message: String },

    #[error("file {file} is not versioned")]
    NotVersioned { file: String },

    #[error("file {file} is not in a 'branches', 'trunk' or 'tags' directory")]
    NotInBranchLayout { file: String },

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),
}

impl BranchDiffError {
    pub fn fetch(target: impl Into<String>, message: impl Into<String>) -> Self {
        BranchDiffError::Fetch {
            target: target.into(),
            message: message.into(),
        }
    }
}
