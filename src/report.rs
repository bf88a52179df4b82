//! Reports over a clustering result.
//!
//! - [`cluster_listing`]: the clusters worth reviewing, members ranked by frequency.
//! - [`edit_histogram`]: how often each edit separates the two most frequent
//!   members of a cluster, under any [`EditDistance`] backend.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::corpus::FrequencyTable;
use crate::distance::EditDistance;
use crate::error::Result;
use crate::phonetic::PADDING;
use crate::pipeline::{Cluster, ClusteringResult};

/// Label -> occurrence count, ordered by label.
pub type Histogram = BTreeMap<String, u64>;

/// Filters applied to the cluster listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Smallest cluster listed.
    pub min_cluster_size: usize,
    /// Members occurring fewer times than this are hidden.
    pub min_frequency: u64,
    /// Skip codes that encode a single sound (second character is padding).
    pub require_multi_sound: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            min_cluster_size: 2,
            min_frequency: 3,
            require_multi_sound: true,
        }
    }
}

/// One cluster member in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWord {
    pub word: String,
    pub count: u64,
    /// Present in the accepted-words list.
    pub accepted: bool,
}

/// One line of the cluster listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRow {
    /// Occurrences of all members together.
    pub total: u64,
    pub code: String,
    pub members: Vec<RankedWord>,
}

/// Members of `cluster` by descending frequency, ties by ascending word.
pub fn rank_members<'a>(cluster: &'a Cluster, frequencies: &FrequencyTable) -> Vec<(&'a str, u64)> {
    let mut ranked: Vec<(&str, u64)> = cluster
        .iter()
        .map(|word| (word.as_str(), frequencies.count(word).unwrap_or(0)))
        .collect();
    ranked.sort_by(|(wa, ca), (wb, cb)| cb.cmp(ca).then_with(|| wa.cmp(wb)));
    ranked
}

fn encodes_several_sounds(code: &str) -> bool {
    code.chars().nth(1).is_some_and(|c| c != PADDING)
}

/// Clusters worth reviewing, in code order.
pub fn cluster_listing(
    result: &ClusteringResult,
    frequencies: &FrequencyTable,
    accepted: &BTreeSet<String>,
    config: &ReportConfig,
) -> Vec<ClusterRow> {
    result
        .clusters()
        .filter(|(_, cluster)| cluster.len() >= config.min_cluster_size)
        .filter(|(code, _)| !config.require_multi_sound || encodes_several_sounds(code))
        .map(|(code, cluster)| {
            let ranked = rank_members(cluster, frequencies);
            ClusterRow {
                total: ranked.iter().map(|(_, count)| count).sum(),
                code: code.to_string(),
                members: ranked
                    .into_iter()
                    .filter(|(_, count)| *count >= config.min_frequency)
                    .map(|(word, count)| RankedWord {
                        word: word.to_string(),
                        count,
                        accepted: accepted.contains(word),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Count the edit labels between the two most frequent members of every
/// multi-member cluster.
pub fn edit_histogram<E: EditDistance + ?Sized>(
    result: &ClusteringResult,
    frequencies: &FrequencyTable,
    backend: &E,
) -> Result<Histogram> {
    let mut histogram = Histogram::new();
    for (_, cluster) in result.clusters() {
        if let [(first, _), (second, _), ..] = rank_members(cluster, frequencies).as_slice() {
            for label in backend.align(first, second)?.labels() {
                *histogram.entry(label).or_insert(0) += 1;
            }
        }
    }
    Ok(histogram)
}
