use crate::artifacts::diff::myers::Edit;

/// A run of edits with surrounding context, as printed under one `@@` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    a_start: usize,
    b_start: usize,
    edits: Vec<Edit<T>>,
}

impl<T> Hunk<T> {
    pub fn edits(&self) -> &[Edit<T>] {
        &self.edits
    }

    pub fn a_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| !matches!(edit, Edit::Insert { .. }))
            .count()
    }

    pub fn b_size(&self) -> usize {
        self.edits
            .iter()
            .filter(|edit| !matches!(edit, Edit::Delete { .. }))
            .count()
    }

    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.a_start, self.a_size()),
            format_range(self.b_start, self.b_size())
        )
    }
}

/// `diff -u` range notation: a single line drops the length, an empty range
/// points at the line before it.
fn format_range(start: usize, length: usize) -> String {
    match length {
        0 => format!("{start},0"),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, length),
    }
}

/// Groups an edit script into hunks carrying `context` unchanged lines on
/// each side. Changes separated by more than twice that many unchanged lines
/// land in separate hunks.
pub fn group_hunks<T: Clone>(edits: &[Edit<T>], context: usize) -> Vec<Hunk<T>> {
    let mut offsets = Vec::with_capacity(edits.len());
    let (mut a, mut b) = (0, 0);
    for edit in edits {
        offsets.push((a, b));
        match edit {
            Edit::Delete { .. } => a += 1,
            Edit::Insert { .. } => b += 1,
            Edit::Equal { .. } => {
                a += 1;
                b += 1;
            }
        }
    }

    let changes = edits
        .iter()
        .enumerate()
        .filter(|(_, edit)| !edit.is_equal())
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in changes {
        let start = idx.saturating_sub(context);
        let end = idx.saturating_add(context).saturating_add(1).min(edits.len());

        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = end,
            _ => ranges.push((start, end)),
        }
    }

    ranges
        .into_iter()
        .map(|(start, end)| {
            let (a_start, b_start) = offsets[start];
            Hunk {
                a_start,
                b_start,
                edits: edits[start..end].to_vec(),
            }
        })
        .collect()
}
