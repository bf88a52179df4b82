//! Order-sensitive single-pass linkage.
//!
//! Items are visited from heaviest to lightest. Each item joins the first
//! existing cluster (in creation order) that holds a member within the
//! distance threshold, otherwise it founds a new cluster. Clusters are never
//! merged, and an item never looks past the first compatible cluster, even if
//! a later one is closer. The result therefore depends on the visiting order,
//! which is fully determined by the weights and the items' natural order.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::debug;
use serde::{Serialize, Serializer};

use crate::error::{OrthoError, Result};

/// Sequential cluster identifier, displayed as `1`, `2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(pub usize);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for ClusterId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Cluster `items` by single-pass linkage.
///
/// * `weight_of` - ordering weight of an item; `None` is a `MissingWeight` error
/// * `distance` - called as `distance(item, member)`
/// * `threshold` - an item joins a cluster when some member is at most this far
///
/// Items are processed by descending weight, ties by ascending natural order.
pub fn ordered_linkage<I, W, F, D>(
    items: impl IntoIterator<Item = I>,
    weight_of: F,
    distance: D,
    threshold: usize,
) -> Result<BTreeMap<ClusterId, BTreeSet<I>>>
where
    I: Ord + fmt::Debug,
    W: Ord,
    F: Fn(&I) -> Option<W>,
    D: Fn(&I, &I) -> usize,
{
    let mut ranked: Vec<(W, I)> = items
        .into_iter()
        .map(|item| match weight_of(&item) {
            Some(weight) => Ok((weight, item)),
            None => Err(OrthoError::missing_weight(format!("{item:?}"))),
        })
        .collect::<Result<_>>()?;
    ranked.sort_by(|(wa, a), (wb, b)| wb.cmp(wa).then_with(|| a.cmp(b)));

    let mut clusters: Vec<BTreeSet<I>> = Vec::new();
    for (_, item) in ranked {
        let target = clusters
            .iter()
            .position(|cluster| cluster.iter().any(|member| distance(&item, member) <= threshold));

        match target {
            Some(index) => {
                debug!("{item:?} joins cluster {}", index + 1);
                clusters[index].insert(item);
            }
            None => {
                debug!("{item:?} founds cluster {}", clusters.len() + 1);
                clusters.push(BTreeSet::from([item]));
            }
        }
    }

    Ok(clusters
        .into_iter()
        .enumerate()
        .map(|(index, cluster)| (ClusterId(index + 1), cluster))
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::distance::levenshtein_distance;

    fn lev(a: &&str, b: &&str) -> usize {
        levenshtein_distance(a, b)
    }

    #[test]
    fn test_colour_color_flavour() {
        let weights = HashMap::from([("colour", 5u64), ("color", 9), ("flavour", 3)]);
        let clusters =
            ordered_linkage(["colour", "color", "flavour"], |w| weights.get(w).copied(), lev, 2)
                .unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[&ClusterId(1)], BTreeSet::from(["color", "colour"]));
        assert_eq!(clusters[&ClusterId(2)], BTreeSet::from(["flavour"]));
    }

    #[test]
    fn test_first_compatible_cluster_wins() {
        // "ab" founds 1, "xy" founds 2, then "xb" is 1 away from both and
        // joins cluster 1 because it is scanned first.
        let weights = HashMap::from([("ab", 3u64), ("xy", 2), ("xb", 1)]);
        let clusters =
            ordered_linkage(["xb", "xy", "ab"], |w| weights.get(w).copied(), lev, 1).unwrap();

        assert_eq!(clusters[&ClusterId(1)], BTreeSet::from(["ab", "xb"]));
        assert_eq!(clusters[&ClusterId(2)], BTreeSet::from(["xy"]));
    }

    #[test]
    fn test_chaining_through_later_member() {
        // "abcd" is 2 away from "abxy" only via "abcy".
        let weights = HashMap::from([("abcd", 3u64), ("abcy", 2), ("abxy", 1)]);
        let clusters =
            ordered_linkage(["abxy", "abcy", "abcd"], |w| weights.get(w).copied(), lev, 1)
                .unwrap();

        assert_eq!(clusters.len(), 1);
        assert_eq!(
            clusters[&ClusterId(1)],
            BTreeSet::from(["abcd", "abcy", "abxy"])
        );
    }

    #[test]
    fn test_weight_ties_use_natural_order() {
        let weights = HashMap::from([("bb", 1u64), ("aa", 1)]);
        let clusters =
            ordered_linkage(["bb", "aa"], |w| weights.get(w).copied(), lev, 0).unwrap();

        assert_eq!(clusters[&ClusterId(1)], BTreeSet::from(["aa"]));
        assert_eq!(clusters[&ClusterId(2)], BTreeSet::from(["bb"]));
    }

    #[test]
    fn test_missing_weight() {
        let weights: HashMap<&str, u64> = HashMap::from([("a", 1)]);
        let result = ordered_linkage(["a", "b"], |w| weights.get(w).copied(), lev, 2);
        assert!(matches!(result, Err(OrthoError::MissingWeight(_))));
    }

    #[test]
    fn test_cluster_ids_serialize_as_strings() {
        assert_eq!(ClusterId(12).to_string(), "12");
        assert_eq!(serde_json::to_string(&ClusterId(3)).unwrap(), "\"3\"");
    }
}
