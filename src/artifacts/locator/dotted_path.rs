use crate::errors::BranchDiffError;
use std::fmt::Display;
use std::str::FromStr;

/// Names of nested `class`/`def` constructs, outermost first.
///
/// Never empty, and every segment is an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DottedPath(Vec<String>);

impl DottedPath {
    pub fn try_parse(name: &str) -> Result<Self, BranchDiffError> {
        Self::from_segments(name.split('.').map(str::to_string))
    }

    pub fn from_segments<I, S>(segments: I) -> Result<Self, BranchDiffError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments.into_iter().map(Into::into).collect::<Vec<_>>();

        if segments.is_empty() || !segments.iter().all(|s| is_identifier(s)) {
            return Err(BranchDiffError::InvalidDottedPath(segments.join(".")));
        }

        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();

    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
}

impl FromStr for DottedPath {
    type Err = BranchDiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl Display for DottedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}
