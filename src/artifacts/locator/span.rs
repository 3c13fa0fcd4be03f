use derive_new::new;
use std::fmt::Display;

/// Line range of a located construct, header line included.
///
/// Both lines are 1-indexed and `end` is exclusive. A missing `start` means
/// the construct was not found; a missing `end` means it runs to the end of
/// the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, new)]
pub struct BlockSpan {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl BlockSpan {
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Lines covered by the span, treating an open end as "through the last
    /// line". Returns `None` for an unresolved span or one that starts past
    /// the end of `lines`.
    pub fn slice<'l, T>(&self, lines: &'l [T]) -> Option<&'l [T]> {
        let start = self.start?.checked_sub(1)?;
        let end = self
            .end
            .map(|end| end.saturating_sub(1))
            .unwrap_or(lines.len())
            .clamp(start, lines.len().max(start));

        lines.get(start..end)
    }
}

impl Display for BlockSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.start, self.end) {
            (None, _) => write!(f, "unresolved"),
            (Some(start), Some(end)) => write!(f, "lines {start}..{end}"),
            (Some(start), None) => write!(f, "lines {start}..EOF"),
        }
    }
}
