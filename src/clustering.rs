//! Grouping of word-forms.
//!
//! Two independent, composable stages:
//!
//! - [`partition_by_key`]: exact bucketing by a key such as a phonetic code.
//! - [`ordered_linkage`]: order-sensitive single-pass linkage inside a bucket.

pub mod linkage;
pub mod partition;

pub use linkage::{ClusterId, ordered_linkage};
pub use partition::{partition_by_key, try_partition_by_key};
