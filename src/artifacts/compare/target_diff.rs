use derive_new::new;

pub const MISSING_TAG: &str = "(MISSING)";
pub const IDENTICAL_MARKER: &str = " IDENTICAL ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    /// The block differs; lines hold a unified diff
    Changed,
    /// The block is textually the same in both files
    Identical,
    /// The block could not be found or fetched in the target
    Missing,
}

/// Outcome of comparing the base block with one target
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TargetDiff {
    pub target: String,
    pub kind: DiffKind,
    pub lines: Vec<String>,
}

impl TargetDiff {
    pub fn missing<S: AsRef<str>>(base_id: &str, target: &str, base_block: &[S]) -> Self {
        let mut lines = vec![
            format!("--- {base_id}"),
            format!("+++ {target} {MISSING_TAG}"),
        ];
        lines.extend(base_block.iter().map(|line| format!("-{}", line.as_ref())));

        Self::new(target.to_string(), DiffKind::Missing, lines)
    }

    pub fn identical(base_id: &str, target: &str) -> Self {
        Self::new(
            target.to_string(),
            DiffKind::Identical,
            vec![
                format!("--- {base_id}"),
                format!("+++ {target}"),
                IDENTICAL_MARKER.to_string(),
            ],
        )
    }
}

/// Per-target diffs, in the order the targets were given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    diffs: Vec<TargetDiff>,
}

impl DiffReport {
    pub fn get(&self, target: &str) -> Option<&TargetDiff> {
        self.diffs.iter().find(|diff| diff.target == target)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TargetDiff> {
        self.diffs.iter()
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.diffs.iter().map(|diff| diff.target.as_str())
    }
}

impl IntoIterator for DiffReport {
    type Item = TargetDiff;
    type IntoIter = std::vec::IntoIter<TargetDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.diffs.into_iter()
    }
}

impl<'r> IntoIterator for &'r DiffReport {
    type Item = &'r TargetDiff;
    type IntoIter = std::slice::Iter<'r, TargetDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.diffs.iter()
    }
}

impl FromIterator<TargetDiff> for DiffReport {
    fn from_iter<I: IntoIterator<Item = TargetDiff>>(iter: I) -> Self {
        DiffReport {
            diffs: iter.into_iter().collect(),
        }
    }
}
