//! The clustering pipeline.
//!
//! Words of a frequency table are first bucketed by phonetic code, then each
//! bucket is clustered on its own by ordered linkage with frequency as the
//! ordering weight and Levenshtein distance as the metric. Buckets share no
//! state, so they can be clustered in parallel without changing the result.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::clustering::{ordered_linkage, partition_by_key};
use crate::corpus::FrequencyTable;
use crate::distance::levenshtein::levenshtein_distance_threshold;
use crate::error::Result;
use crate::phonetic::{EncoderConfig, PhoneticEncoder};

/// Default maximum Levenshtein distance between linked words.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// Words judged to be spelling variants of one another.
pub type Cluster = BTreeSet<String>;

/// Configuration of a clustering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Phonetic encoder settings.
    pub encoder: EncoderConfig,
    /// Linkage threshold.
    pub max_distance: usize,
    /// Cluster phonetic groups on the rayon thread pool.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            encoder: EncoderConfig::default(),
            max_distance: DEFAULT_MAX_DISTANCE,
            parallel: false,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Clusters of every phonetic group, keyed by phonetic code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusteringResult {
    groups: BTreeMap<String, Vec<Cluster>>,
}

impl ClusteringResult {
    pub fn groups(&self) -> &BTreeMap<String, Vec<Cluster>> {
        &self.groups
    }

    /// Clusters of one phonetic code, in creation order.
    pub fn get(&self, code: &str) -> Option<&[Cluster]> {
        self.groups.get(code).map(Vec::as_slice)
    }

    /// Every (code, cluster) pair.
    pub fn clusters(&self) -> impl Iterator<Item = (&str, &Cluster)> {
        self.groups
            .iter()
            .flat_map(|(code, clusters)| clusters.iter().map(move |c| (code.as_str(), c)))
    }

    pub fn cluster_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// The cluster holding `word`, if any.
    pub fn cluster_of(&self, word: &str) -> Option<&Cluster> {
        self.clusters()
            .map(|(_, cluster)| cluster)
            .find(|cluster| cluster.contains(word))
    }
}

/// Run the whole pipeline over a frequency table.
pub fn cluster_vocabulary(
    frequencies: &FrequencyTable,
    config: &PipelineConfig,
) -> Result<ClusteringResult> {
    let encoder = PhoneticEncoder::from_config(&config.encoder)?;
    cluster_with_encoder(frequencies, &encoder, config.max_distance, config.parallel)
}

/// Run the pipeline with an already built encoder (for custom rule sets).
pub fn cluster_with_encoder(
    frequencies: &FrequencyTable,
    encoder: &PhoneticEncoder,
    max_distance: usize,
    parallel: bool,
) -> Result<ClusteringResult> {
    info!(
        "Grouping {} words by phonetic code ({})",
        frequencies.len(),
        encoder.language()
    );
    let by_code = partition_by_key(frequencies.words(), |word| encoder.encode(word));

    info!(
        "Clustering {} phonetic groups by edit distance (max {})",
        by_code.len(),
        max_distance
    );
    let cluster_group = |(code, members): (String, BTreeSet<&str>)| -> Result<(String, Vec<Cluster>)> {
        let linked = ordered_linkage(
            members,
            |word: &&str| frequencies.count(word),
            |a: &&str, b: &&str| levenshtein_distance_threshold(a, b, max_distance).unwrap_or(usize::MAX),
            max_distance,
        )?;
        debug!("{code}: {} clusters", linked.len());

        let clusters = linked
            .into_values()
            .map(|cluster| cluster.into_iter().map(str::to_string).collect())
            .collect();
        Ok((code, clusters))
    };

    let groups: BTreeMap<String, Vec<Cluster>> = if parallel {
        by_code
            .into_par_iter()
            .map(cluster_group)
            .collect::<Result<_>>()?
    } else {
        by_code
            .into_iter()
            .map(cluster_group)
            .collect::<Result<_>>()?
    };

    let result = ClusteringResult { groups };
    info!("Found {} clusters", result.cluster_count());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrequencyTable {
        FrequencyTable::from_counts([("colour", 5), ("color", 9), ("flavour", 3)])
    }

    #[test]
    fn test_colour_scenario() {
        let result = cluster_vocabulary(&sample(), &PipelineConfig::default()).unwrap();

        let colors = result.get("c460").unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(
            colors[0],
            BTreeSet::from(["color".to_string(), "colour".to_string()])
        );
        assert_eq!(
            result.cluster_of("flavour"),
            Some(&BTreeSet::from(["flavour".to_string()]))
        );
        assert_eq!(result.cluster_count(), 2);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let frequencies = FrequencyTable::from_counts([
            ("lakay", 10),
            ("lakai", 4),
            ("lakaye", 1),
            ("mwen", 20),
            ("mwn", 2),
            ("bonjou", 7),
            ("bonjour", 3),
            ("bonju", 1),
        ]);
        let sequential = PipelineConfig {
            encoder: EncoderConfig {
                language: "kre".to_string(),
                ..EncoderConfig::default()
            },
            ..PipelineConfig::default()
        };
        let parallel = PipelineConfig {
            parallel: true,
            ..sequential.clone()
        };

        assert_eq!(
            cluster_vocabulary(&frequencies, &sequential).unwrap(),
            cluster_vocabulary(&frequencies, &parallel).unwrap()
        );
    }

    #[test]
    fn test_unknown_language_fails() {
        let config = PipelineConfig {
            encoder: EncoderConfig {
                language: "zzz".to_string(),
                ..EncoderConfig::default()
            },
            ..PipelineConfig::default()
        };
        assert!(cluster_vocabulary(&sample(), &config).is_err());
    }

    #[test]
    fn test_config_json_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"max_distance": 1}"#).unwrap();
        assert_eq!(config.max_distance, 1);
        assert_eq!(config.encoder, EncoderConfig::default());
        assert!(!config.parallel);
    }
}
