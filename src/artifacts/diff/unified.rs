use crate::artifacts::diff::hunk::group_hunks;
use crate::artifacts::diff::myers::{DiffAlgorithm, MyersDiff};

pub const DEFAULT_CONTEXT: usize = 3;

/// Renders a unified diff of `a` against `b`, one output line per element.
///
/// Returns no lines at all when the sequences are equal.
pub fn unified_diff<T>(a: &[T], b: &[T], from: &str, to: &str, context: usize) -> Vec<String>
where
    T: AsRef<str> + Eq + Clone,
{
    let edits = MyersDiff::new(a, b).diff();
    let hunks = group_hunks(&edits, context);

    if hunks.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!("--- {from}"), format!("+++ {to}")];
    for hunk in hunks {
        lines.push(hunk.header());
        lines.extend(hunk.edits().iter().map(|edit| edit.as_line()));
    }

    lines
}
