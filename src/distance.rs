//! Edit distance and alignment between word-forms.
//!
//! Two interchangeable backends implement [`EditDistance`]:
//!
//! - [`Levenshtein`]: classic dynamic-programming edit distance with a
//!   character-level backtrace.
//! - [`MatchBlockDiff`]: contiguous insert/delete/replace operations found
//!   between maximal matching blocks.
//!
//! Both report an [`EditPath`]: the operations plus every intermediate
//! string, so callers can replay or histogram the edits.

pub mod diff;
pub mod levenshtein;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use diff::MatchBlockDiff;
pub use levenshtein::{Levenshtein, levenshtein_distance};

/// A single edit applied to an intermediate string.
///
/// `at` is a character index into the string the operation is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum EditOp {
    /// Replace one character.
    Substitute { at: usize, from: char, to: char },
    /// Insert a run of characters.
    Insert { at: usize, text: String },
    /// Delete a run of characters.
    Delete { at: usize, text: String },
    /// Replace a run of characters by another run.
    Replace { at: usize, from: String, to: String },
}

impl EditOp {
    /// Apply the operation to `input`, returning the edited string.
    pub fn apply(&self, input: &str) -> String {
        let chars: Vec<char> = input.chars().collect();
        let (at, removed, inserted): (usize, usize, String) = match self {
            EditOp::Substitute { at, to, .. } => (*at, 1, to.to_string()),
            EditOp::Insert { at, text } => (*at, 0, text.clone()),
            EditOp::Delete { at, text } => (*at, text.chars().count(), String::new()),
            EditOp::Replace { at, from, to } => (*at, from.chars().count(), to.clone()),
        };
        let at = at.min(chars.len());
        let end = (at + removed).min(chars.len());

        let mut out: String = chars[..at].iter().collect();
        out.push_str(&inserted);
        out.extend(&chars[end..]);
        out
    }

    /// Position-free label used for histograms (`a/b`, `+x`, `-x`, `ab>c`).
    ///
    /// Substitution pairs are reported in sorted order so that `a/e` and
    /// `e/a` count as the same edit.
    pub fn label(&self) -> String {
        match self {
            EditOp::Substitute { from, to, .. } => {
                let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
                format!("{lo}/{hi}")
            }
            EditOp::Insert { text, .. } => format!("+{text}"),
            EditOp::Delete { text, .. } => format!("-{text}"),
            EditOp::Replace { from, to, .. } => format!("{from}>{to}"),
        }
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Operations realizing an alignment plus the chain of intermediate strings.
///
/// `sequence[0]` is the starting string, `sequence[k + 1]` is
/// `operations[k]` applied to `sequence[k]`, and the last entry is the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPath {
    pub operations: Vec<EditOp>,
    pub sequence: Vec<String>,
}

impl EditPath {
    /// An empty path sitting on `start`.
    pub fn new(start: &str) -> Self {
        EditPath {
            operations: Vec::new(),
            sequence: vec![start.to_string()],
        }
    }

    /// Apply `op` to the current end and record both.
    pub fn push(&mut self, op: EditOp) {
        let next = op.apply(self.end());
        self.operations.push(op);
        self.sequence.push(next);
    }

    pub fn start(&self) -> &str {
        self.sequence.first().map(String::as_str).unwrap_or("")
    }

    pub fn end(&self) -> &str {
        self.sequence.last().map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Histogram labels of the operations, in path order.
    pub fn labels(&self) -> Vec<String> {
        self.operations.iter().map(EditOp::label).collect()
    }

    /// Replay the operations on the start string.
    pub fn replay(&self) -> String {
        self.operations
            .iter()
            .fold(self.start().to_string(), |current, op| op.apply(&current))
    }
}

/// A strategy for measuring and explaining the difference between strings.
pub trait EditDistance: Send + Sync {
    /// Number of edit operations between `a` and `b`. Symmetric.
    fn distance(&self, a: &str, b: &str) -> usize;

    /// The operations realizing `distance(a, b)`.
    fn align(&self, a: &str, b: &str) -> Result<EditPath>;

    /// Name of the backend for logging and reports.
    fn name(&self) -> &'static str;
}

/// Runtime selection between the two backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceBackend {
    /// Character-level Levenshtein distance.
    #[default]
    Levenshtein,
    /// Match-block diff operations.
    Diff,
}

impl EditDistance for DistanceBackend {
    fn distance(&self, a: &str, b: &str) -> usize {
        match self {
            DistanceBackend::Levenshtein => Levenshtein.distance(a, b),
            DistanceBackend::Diff => MatchBlockDiff.distance(a, b),
        }
    }

    fn align(&self, a: &str, b: &str) -> Result<EditPath> {
        match self {
            DistanceBackend::Levenshtein => Levenshtein.align(a, b),
            DistanceBackend::Diff => MatchBlockDiff.align(a, b),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DistanceBackend::Levenshtein => Levenshtein.name(),
            DistanceBackend::Diff => MatchBlockDiff.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_operations() {
        let op = EditOp::Substitute {
            at: 0,
            from: 'k',
            to: 's',
        };
        assert_eq!(op.apply("kitten"), "sitten");

        let op = EditOp::Insert {
            at: 6,
            text: "g".to_string(),
        };
        assert_eq!(op.apply("sittin"), "sitting");

        let op = EditOp::Delete {
            at: 1,
            text: "ou".to_string(),
        };
        assert_eq!(op.apply("xouy"), "xy");

        let op = EditOp::Replace {
            at: 3,
            from: "ou".to_string(),
            to: "o".to_string(),
        };
        assert_eq!(op.apply("colour"), "color");
    }

    #[test]
    fn test_labels() {
        let op = EditOp::Substitute {
            at: 0,
            from: 's',
            to: 'k',
        };
        assert_eq!(op.label(), "k/s");
        assert_eq!(op.to_string(), "k/s");

        let op = EditOp::Replace {
            at: 0,
            from: "ph".to_string(),
            to: "f".to_string(),
        };
        assert_eq!(op.label(), "ph>f");
    }

    #[test]
    fn test_edit_path_push() {
        let mut path = EditPath::new("color");
        assert!(path.is_empty());
        path.push(EditOp::Insert {
            at: 4,
            text: "u".to_string(),
        });
        assert_eq!(path.start(), "color");
        assert_eq!(path.end(), "colour");
        assert_eq!(path.replay(), "colour");
        assert_eq!(path.labels(), vec!["+u".to_string()]);
    }

    #[test]
    fn test_backend_dispatch() {
        assert_eq!(DistanceBackend::Levenshtein.distance("kitten", "sitting"), 3);
        assert_eq!(DistanceBackend::Diff.distance("colour", "color"), 1);
        assert_eq!(DistanceBackend::default().name(), "levenshtein");
        assert_eq!(DistanceBackend::Diff.name(), "diff");
    }
}
