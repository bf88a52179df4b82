//! Match-block diff between two strings.
//!
//! Maximal matching blocks are found greedily: the longest common substring
//! is matched first, then the same search recurses on the pieces to its left
//! and right. Whatever lies between two consecutive blocks becomes one diff
//! operation, so a diff counts contiguous changes rather than characters.

use ahash::AHashMap;

use crate::distance::{EditDistance, EditOp, EditPath};
use crate::error::Result;

/// Sequences at least this long have their most frequent elements ignored
/// when seeding matches.
const POPULAR_THRESHOLD: usize = 200;

/// A matching block: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Kind of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// Turns `a[a_start..a_end]` into `b[b_start..b_end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: Tag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

/// Longest-common-substring sequence matcher over characters.
#[derive(Debug, Clone)]
pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// Positions of every character of `b`, ascending.
    b2j: AHashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: AHashMap<char, Vec<usize>> = AHashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= POPULAR_THRESHOLD {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }

        SequenceMatcher { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks the one starting earliest in `a` wins, then
    /// the one starting earliest in `b`.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut besti, mut bestj, mut bestsize) = (alo, blo, 0);
        let mut j2len: AHashMap<usize, usize> = AHashMap::new();

        for i in alo..ahi {
            let mut new_j2len = AHashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    new_j2len.insert(j, k);
                    if k > bestsize {
                        besti = i + 1 - k;
                        bestj = j + 1 - k;
                        bestsize = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Grow over elements skipped by the popularity filter.
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestsize += 1;
        }
        while besti + bestsize < ahi
            && bestj + bestsize < bhi
            && self.a[besti + bestsize] == self.b[bestj + bestsize]
        {
            bestsize += 1;
        }

        Match {
            a: besti,
            b: bestj,
            size: bestsize,
        }
    }

    /// All matching blocks in ascending order, adjacent blocks merged, ending
    /// with the sentinel `(len(a), len(b), 0)`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());
        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size > 0 {
                blocks.push(m);
                if alo < m.a && blo < m.b {
                    queue.push((alo, m.a, blo, m.b));
                }
                if m.a + m.size < ahi && m.b + m.size < bhi {
                    queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
                }
            }
        }
        blocks.sort();

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(Match {
            a: la,
            b: lb,
            size: 0,
        });
        merged
    }
}

/// Opcodes describing how to turn `a` into `b`, given their matching blocks.
pub fn opcodes_from_blocks(blocks: &[Match]) -> Vec<Opcode> {
    let mut opcodes = Vec::new();
    let (mut i, mut j) = (0, 0);

    for block in blocks {
        let tag = if i < block.a && j < block.b {
            Some(Tag::Replace)
        } else if i < block.a {
            Some(Tag::Delete)
        } else if j < block.b {
            Some(Tag::Insert)
        } else {
            None
        };
        if let Some(tag) = tag {
            opcodes.push(Opcode {
                tag,
                a_start: i,
                a_end: block.a,
                b_start: j,
                b_end: block.b,
            });
        }
        i = block.a + block.size;
        j = block.b + block.size;
        if block.size > 0 {
            opcodes.push(Opcode {
                tag: Tag::Equal,
                a_start: block.a,
                a_end: i,
                b_start: block.b,
                b_end: j,
            });
        }
    }

    opcodes
}

/// Match-block diff backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchBlockDiff;

impl MatchBlockDiff {
    /// Opcodes turning `a` into `b`.
    ///
    /// The matcher always runs with the lexicographically smaller string
    /// first and its blocks are mirrored when needed, so `a -> b` and
    /// `b -> a` have the same shape.
    pub fn opcodes(&self, a: &str, b: &str) -> Vec<Opcode> {
        let blocks = if a <= b {
            SequenceMatcher::new(a, b).matching_blocks()
        } else {
            SequenceMatcher::new(b, a)
                .matching_blocks()
                .into_iter()
                .map(|m| Match {
                    a: m.b,
                    b: m.a,
                    size: m.size,
                })
                .collect()
        };
        opcodes_from_blocks(&blocks)
    }
}

impl EditDistance for MatchBlockDiff {
    fn distance(&self, a: &str, b: &str) -> usize {
        self.opcodes(a, b)
            .iter()
            .filter(|op| op.tag != Tag::Equal)
            .count()
    }

    /// The path runs from `a` to `b`, left to right. The running string
    /// always equals `b[..b_start] + a[a_start..]`.
    fn align(&self, a: &str, b: &str) -> Result<EditPath> {
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        let slice = |chars: &[char], start: usize, end: usize| -> String {
            chars[start..end].iter().collect()
        };

        let mut path = EditPath::new(a);
        for op in self.opcodes(a, b) {
            let edit = match op.tag {
                Tag::Equal => continue,
                Tag::Replace => EditOp::Replace {
                    at: op.b_start,
                    from: slice(&a_chars, op.a_start, op.a_end),
                    to: slice(&b_chars, op.b_start, op.b_end),
                },
                Tag::Delete => EditOp::Delete {
                    at: op.b_start,
                    text: slice(&a_chars, op.a_start, op.a_end),
                },
                Tag::Insert => EditOp::Insert {
                    at: op.b_start,
                    text: slice(&b_chars, op.b_start, op.b_end),
                },
            };
            path.push(edit);
        }

        Ok(path)
    }

    fn name(&self) -> &'static str {
        "diff"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_longest_match() {
        let matcher = SequenceMatcher::new("kitten", "sitting");
        let m = matcher.find_longest_match(0, 6, 0, 7);
        assert_eq!(m, Match { a: 1, b: 1, size: 3 });
    }

    #[test]
    fn test_matching_blocks() {
        let matcher = SequenceMatcher::new("kitten", "sitting");
        assert_eq!(
            matcher.matching_blocks(),
            vec![
                Match { a: 1, b: 1, size: 3 },
                Match { a: 5, b: 5, size: 1 },
                Match { a: 6, b: 7, size: 0 },
            ]
        );
    }

    #[test]
    fn test_kitten_sitting_diff() {
        let path = MatchBlockDiff.align("kitten", "sitting").unwrap();
        assert_eq!(path.labels(), vec!["k>s", "e>i", "+g"]);
        assert_eq!(
            path.sequence,
            vec!["kitten", "sitten", "sittin", "sitting"]
        );
        assert_eq!(MatchBlockDiff.distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_direction_follows_arguments() {
        let path = MatchBlockDiff.align("colour", "color").unwrap();
        assert_eq!(path.labels(), vec!["-u"]);
        assert_eq!(path.end(), "color");

        let path = MatchBlockDiff.align("color", "colour").unwrap();
        assert_eq!(path.labels(), vec!["+u"]);
        assert_eq!(path.end(), "colour");
    }

    #[test]
    fn test_contiguous_change_counts_once() {
        assert_eq!(MatchBlockDiff.distance("photo", "foto"), 1);
        let path = MatchBlockDiff.align("photo", "foto").unwrap();
        assert_eq!(path.labels(), vec!["ph>f"]);
    }

    #[test]
    fn test_empty_and_identical() {
        assert_eq!(MatchBlockDiff.distance("", ""), 0);
        assert_eq!(MatchBlockDiff.distance("lakay", "lakay"), 0);
        assert!(MatchBlockDiff.align("lakay", "lakay").unwrap().is_empty());

        let path = MatchBlockDiff.align("", "abc").unwrap();
        assert_eq!(path.labels(), vec!["+abc"]);
        let path = MatchBlockDiff.align("abc", "").unwrap();
        assert_eq!(path.labels(), vec!["-abc"]);
        assert_eq!(path.end(), "");
    }

    #[test]
    fn test_popular_elements_still_match() {
        let a = "a".repeat(250);
        let b = format!("{}b", "a".repeat(250));
        assert_eq!(MatchBlockDiff.distance(&a, &b), 1);
        assert_eq!(MatchBlockDiff.align(&a, &b).unwrap().replay(), b);
    }
}
