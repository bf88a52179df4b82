//! # orthocluster
//!
//! Groups the word-forms of a corpus into clusters of likely spelling
//! variants, for orthography normalization in languages whose spelling is
//! inconsistent or still emerging.
//!
//! Words are bucketed by a language-specific Soundex-style code
//! ([`phonetic`]), then each bucket is clustered by an order-sensitive
//! single-pass linkage ([`clustering`]) over edit distance ([`distance`]),
//! most frequent words first.
//!
//! ```
//! use orthocluster::corpus::FrequencyTable;
//! use orthocluster::pipeline::{PipelineConfig, cluster_vocabulary};
//!
//! let frequencies = FrequencyTable::from_counts([("colour", 5), ("color", 9), ("flavour", 3)]);
//! let result = cluster_vocabulary(&frequencies, &PipelineConfig::default()).unwrap();
//! assert_eq!(result.cluster_count(), 2);
//! assert!(result.cluster_of("color").unwrap().contains("colour"));
//! ```

pub mod cli;
pub mod clustering;
pub mod corpus;
pub mod distance;
pub mod error;
pub mod phonetic;
pub mod pipeline;
pub mod report;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
