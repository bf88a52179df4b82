//! Partition grouping: bucket items by a key.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;

/// Group items by `key_fn` in a single pass.
///
/// Every item lands in exactly one group, the one whose key equals
/// `key_fn(item)`.
pub fn partition_by_key<I, K, F>(items: impl IntoIterator<Item = I>, mut key_fn: F) -> BTreeMap<K, BTreeSet<I>>
where
    I: Ord,
    K: Ord,
    F: FnMut(&I) -> K,
{
    let mut groups: BTreeMap<K, BTreeSet<I>> = BTreeMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().insert(item);
    }
    groups
}

/// Like [`partition_by_key`], stopping at the first key error.
pub fn try_partition_by_key<I, K, F>(
    items: impl IntoIterator<Item = I>,
    mut key_fn: F,
) -> Result<BTreeMap<K, BTreeSet<I>>>
where
    I: Ord,
    K: Ord,
    F: FnMut(&I) -> Result<K>,
{
    let mut groups: BTreeMap<K, BTreeSet<I>> = BTreeMap::new();
    for item in items {
        let key = key_fn(&item)?;
        groups.entry(key).or_default().insert(item);
    }
    Ok(groups)
}
