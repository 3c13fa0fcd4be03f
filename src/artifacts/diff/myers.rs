use derive_new::new;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Edit<T> {
    pub fn value(&self) -> &T {
        match self {
            Edit::Delete { value } | Edit::Insert { value } | Edit::Equal { value } => value,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Edit::Equal { .. })
    }

    pub fn prefix(&self) -> char {
        match self {
            Edit::Delete { .. } => '-',
            Edit::Insert { .. } => '+',
            Edit::Equal { .. } => ' ',
        }
    }
}

impl<T: AsRef<str>> Edit<T> {
    pub fn as_line(&self) -> String {
        format!("{}{}", self.prefix(), self.value().as_ref())
    }
}

impl<T: AsRef<str>> Display for Edit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_line())
    }
}

pub trait DiffAlgorithm<T> {
    type Trace;
    type EditPath;

    fn compute_shortest_edit(&self) -> Self::Trace;
    fn backtrack(&self) -> Self::EditPath;
    fn diff(&self) -> Vec<Edit<T>>;
}

/// Myers' greedy shortest edit script over two sequences
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<'d, T: Eq + Clone> DiffAlgorithm<T> for MyersDiff<'d, T> {
    type Trace = Vec<Vec<isize>>;
    type EditPath = Vec<(isize, isize, isize, isize)>;

    /// Records one copy of `v` per edit distance for backtracking, so memory
    /// grows as `d * (n + m)`. Blocks of a few thousand lines that share
    /// nothing need hundreds of megabytes.
    fn compute_shortest_edit(&self) -> Self::Trace {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (n + m) as usize;

        let mut v = vec![0; 2 * offset + 2];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset as isize + k) as usize;

                let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                    // moving down from k+1, an insertion
                    v[idx + 1]
                } else {
                    // moving right from k-1, a deletion
                    v[idx - 1] + 1
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    fn backtrack(&self) -> Self::EditPath {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let offset = (x + y) as usize;
        let mut edit_path = Vec::new();

        let trace = self.compute_shortest_edit();

        for (d, v) in trace.iter().enumerate().rev() {
            let d = d as isize;
            let k = x - y;
            let at = |k: isize| v[(offset as isize + k) as usize];

            let prev_k = if k == -d || (k != d && at(k - 1) < at(k + 1)) {
                k + 1
            } else {
                k - 1
            };

            let prev_x = at(prev_k);
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edit_path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                edit_path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        edit_path
    }

    fn diff(&self) -> Vec<Edit<T>> {
        let mut diff = self
            .backtrack()
            .into_iter()
            .map(|(prev_x, prev_y, x, y)| {
                if x == prev_x {
                    Edit::Insert {
                        value: self.b[prev_y as usize].clone(),
                    }
                } else if y == prev_y {
                    Edit::Delete {
                        value: self.a[prev_x as usize].clone(),
                    }
                } else {
                    Edit::Equal {
                        value: self.a[prev_x as usize].clone(),
                    }
                }
            })
            .collect::<Vec<_>>();

        diff.reverse();
        diff
    }
}
