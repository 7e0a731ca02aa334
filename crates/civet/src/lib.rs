#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

mod core;
pub mod measures;
pub mod utils;

pub use core::{dataset, linalg, metric, partition};

pub use core::dataset::{Centroids, Dataset, Dissimilarity, DissimilarityMatrix, MetricDissimilarity};
pub use core::metric::Metric;
pub use core::partition::{
    BitPartition, CountedLinkedPartition, LabelPartition, LinkedPartition, Membership, Partition,
};
pub use measures::EvalContext;

/// The current version of the crate.
pub const VERSION: &str = "0.3.0";
