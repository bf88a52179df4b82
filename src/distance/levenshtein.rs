//! Levenshtein distance with edit-path reconstruction.

use std::cmp::min;

use crate::distance::{EditDistance, EditOp, EditPath};
use crate::error::{OrthoError, Result};

/// Unit-cost Levenshtein backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl EditDistance for Levenshtein {
    fn distance(&self, a: &str, b: &str) -> usize {
        levenshtein_distance(a, b)
    }

    /// The path runs from the shorter string to the longer one (from `b` to
    /// `a` on equal lengths).
    fn align(&self, a: &str, b: &str) -> Result<EditPath> {
        if a.chars().count() >= b.chars().count() {
            levenshtein_path(a, b)
        } else {
            levenshtein_path(b, a)
        }
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Costs of the row after `prev` once `row_char` is consumed.
fn next_row(prev: &[usize], row_char: char, cols: &[char]) -> Vec<usize> {
    let mut row = Vec::with_capacity(prev.len());
    row.push(prev[0] + 1);
    for (j, &col_char) in cols.iter().enumerate() {
        let cost = usize::from(row_char != col_char);
        let cell = min(
            min(
                prev[j + 1] + 1, // insertion of row_char
                row[j] + 1,      // deletion of col_char
            ),
            prev[j] + cost, // substitution
        );
        row.push(cell);
    }
    row
}

/// Full cost matrix; cell (i, j) is the distance between the first `i`
/// characters of `rows` and the first `j` characters of `cols`.
fn cost_matrix(rows: &[char], cols: &[char]) -> Vec<Vec<usize>> {
    let mut matrix = Vec::with_capacity(rows.len() + 1);
    matrix.push((0..=cols.len()).collect::<Vec<usize>>());
    for &row_char in rows {
        let row = next_row(&matrix[matrix.len() - 1], row_char, cols);
        matrix.push(row);
    }
    matrix
}

fn oriented(s1: &str, s2: &str) -> (Vec<char>, Vec<char>) {
    let (longer, shorter) = if s1.chars().count() >= s2.chars().count() {
        (s1, s2)
    } else {
        (s2, s1)
    };
    (longer.chars().collect(), shorter.chars().collect())
}

/// Calculate the Levenshtein distance between two strings.
/// This is the minimum number of single-character edits (insertions, deletions, or substitutions)
/// required to change one word into another.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let (rows, cols) = oriented(s1, s2);
    if cols.is_empty() {
        return rows.len();
    }
    cost_matrix(&rows, &cols)[rows.len()][cols.len()]
}

/// Levenshtein distance, or `None` as soon as it is known to exceed `threshold`.
///
/// Walks the same rows as the full matrix but keeps only the last one. Row
/// minima never decrease, so a row entirely above the threshold ends the walk.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let (rows, cols) = oriented(s1, s2);
    if rows.len() - cols.len() > threshold {
        return None;
    }

    let mut row: Vec<usize> = (0..=cols.len()).collect();
    for &row_char in &rows {
        row = next_row(&row, row_char, &cols);
        if row.iter().min().is_some_and(|&lowest| lowest > threshold) {
            return None;
        }
    }

    row.last().copied().filter(|&distance| distance <= threshold)
}

/// Backtrace a minimal edit path turning `cols` into `rows`.
///
/// Operations are discovered from the tail of the strings towards the head.
/// At every cell the diagonal move wins over the up move (insertion of the
/// row character), which wins over the left move (deletion of the column
/// character). Each operation is applied to the running intermediate string,
/// which always equals `cols[..j] + rows[i..]`.
pub fn levenshtein_path(rows: &str, cols: &str) -> Result<EditPath> {
    let r: Vec<char> = rows.chars().collect();
    let c: Vec<char> = cols.chars().collect();
    let matrix = cost_matrix(&r, &c);

    let (mut i, mut j) = (r.len(), c.len());
    let mut path = EditPath::new(cols);

    while i > 0 && j > 0 {
        let here = matrix[i][j];
        let diag = matrix[i - 1][j - 1];
        let up = matrix[i - 1][j];
        let left = matrix[i][j - 1];
        let same = r[i - 1] == c[j - 1];

        if (same && diag == here) || (!same && diag + 1 == here) {
            if !same {
                path.push(EditOp::Substitute {
                    at: j - 1,
                    from: c[j - 1],
                    to: r[i - 1],
                });
            }
            i -= 1;
            j -= 1;
        } else if up + 1 == here {
            path.push(EditOp::Insert {
                at: j,
                text: r[i - 1].to_string(),
            });
            i -= 1;
        } else if left + 1 == here {
            path.push(EditOp::Delete {
                at: j - 1,
                text: c[j - 1].to_string(),
            });
            j -= 1;
        } else {
            return Err(OrthoError::alignment(format!(
                "no consistent move at ({i}, {j}) aligning '{rows}' with '{cols}'"
            )));
        }
    }

    while i > 0 {
        path.push(EditOp::Insert {
            at: 0,
            text: r[i - 1].to_string(),
        });
        i -= 1;
    }
    while j > 0 {
        path.push(EditOp::Delete {
            at: j - 1,
            text: c[j - 1].to_string(),
        });
        j -= 1;
    }

    Ok(path)
}
