//! The battery of unsupervised cluster-validity measures.
//!
//! Every measure scores a candidate clustering solution (a centroid matrix
//! plus a partition of the data) under a caller-supplied [`Metric`]. The
//! intended caller is an iterative driver, e.g. the generation loop of an
//! evolutionary clustering algorithm, that evaluates many candidate
//! solutions per generation, so the failure semantics are designed for a
//! hot loop:
//!
//! * **Degenerate numeric inputs** (fewer than two populated clusters,
//!   empty clusters, zero denominators) never produce an `Err`. Each
//!   measure instead returns its documented sentinel: `T::MAX` for the
//!   minimization-oriented indices (SSE and distortion, Davies-Bouldin, the
//!   WB-index, Xie-Beni, the CS-measure) and `T::ZERO` for the
//!   maximization-oriented ones (Dunn, Silhouette, the Variance Ratio
//!   Criterion, the Score Function, Index I). A driver that minimizes sees
//!   `T::MAX` as the worst possible fitness, and one that maximizes sees
//!   `T::ZERO` as never-best, so degenerate candidates rank last without
//!   any exception handling.
//! * **Assignment inconsistency**, where a partition disagrees with the
//!   centroid matrix it is scored against, is reported through the `bool`
//!   in the `(value, bool)` pair returned by [`sse`] and [`distortion`]; a
//!   `false` tells the driver to discard the candidate outright.
//! * **Contract violations**: dimensionality mismatches between the data,
//!   the centroid matrix, and the partition, or (for measures without a
//!   validity flag) a partition that references a centroid row that does
//!   not exist, are caller bugs and come back as `Err`.
//!
//! Dataset-wide aggregates (the grand mean and the total dispersion around
//! it) live in an explicit [`EvalContext`] that the caller constructs once
//! per generation or dataset version and passes into the measures that need
//! them. There is no hidden caching anywhere in this module: calling any
//! measure twice with the same inputs returns bit-identical results.

use distances::number::Float;

use crate::core::dataset::{stats, Centroids, Dataset, Dissimilarity};
use crate::core::metric::Metric;
use crate::core::partition::Partition;
use crate::utils::FloatExt;

mod context;
mod cs_measure;
mod davies_bouldin;
mod dunn;
mod fuzzy;
mod index_i;
mod ratios;
mod silhouette;
mod sse;
mod xie_beni;

pub use context::EvalContext;
pub use cs_measure::cs_measure;
pub use davies_bouldin::davies_bouldin;
pub use dunn::{dunn, simplified_dunn};
pub use fuzzy::{partition_coefficient, partition_entropy};
pub use index_i::index_i;
pub use ratios::{score_function, ssb, variance_ratio_criterion, wb_index};
pub use silhouette::{silhouette, simplified_silhouette};
pub use sse::{distortion, sse, sse_nearest, ssw, weighted_distortion};
pub use xie_beni::{fuzzy_xie_beni, xie_beni};

/// Checks that the data, the centroid matrix, and the partition agree on
/// dimensionality and cardinality.
///
/// This intentionally does not compare the partition's declared cluster
/// count against the centroid matrix: that mismatch is either a soft
/// validity failure (SSE, distortion) or checked per populated cluster by
/// [`populated_clusters`].
pub(crate) fn check_shapes<T: Float, D: Dataset<Vec<T>>, P: Partition>(
    data: &D,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<(), String> {
    let dimensionality = stats::uniform_dimensionality(data)?;
    if dimensionality != centroids.dimensionality() {
        return Err(format!(
            "The data have dimensionality {dimensionality} but the centroids have {}.",
            centroids.dimensionality()
        ));
    }
    if partition.cardinality() != data.cardinality() {
        return Err(format!(
            "The partition covers {} instances but the dataset has {}.",
            partition.cardinality(),
            data.cardinality()
        ));
    }
    Ok(())
}

/// Collects the populated clusters of a partition as `(cluster, members)`
/// pairs.
///
/// # Errors
///
/// * If a populated cluster has no row in a centroid matrix with `num_rows`
///   rows. Callers with a soft validity channel check this themselves
///   before calling.
pub(crate) fn populated_clusters<P: Partition>(
    partition: &P,
    num_rows: usize,
) -> Result<Vec<(usize, Vec<usize>)>, String> {
    let populated = partition
        .member_lists()
        .into_iter()
        .enumerate()
        .filter(|(_, members)| !members.is_empty())
        .collect::<Vec<_>>();
    match populated.iter().find(|&&(j, _)| j >= num_rows) {
        Some(&(j, _)) => Err(format!(
            "The partition populates cluster {j} but the centroid matrix has {num_rows} rows."
        )),
        None => Ok(populated),
    }
}

/// The mean distance from a cluster's members to its centroid, or `None`
/// for an empty cluster.
///
/// Keeping the empty case in the type instead of a NaN payload means no
/// arithmetic downstream can absorb an accidental NaN; consumers must
/// decide explicitly how to treat empty clusters.
pub(crate) fn cluster_scatter<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>>(
    data: &D,
    metric: &M,
    centroid: &Vec<T>,
    members: &[usize],
) -> Option<T> {
    if members.is_empty() {
        None
    } else {
        let total = members
            .iter()
            .map(|&i| metric.distance(data.get(i), centroid))
            .sum::<T>();
        Some(total / T::from(members.len()))
    }
}

/// The smallest distance between any two of the given centroid rows, or
/// `None` when fewer than two rows are given.
pub(crate) fn min_centroid_separation<T: Float, M: Metric<Vec<T>, T>>(
    centroids: &Centroids<T>,
    metric: &M,
    rows: &[usize],
) -> Option<T> {
    separations(centroids, metric, rows).reduce(T::min)
}

/// The largest distance between any two of the given centroid rows, or
/// `None` when fewer than two rows are given.
pub(crate) fn max_centroid_separation<T: Float, M: Metric<Vec<T>, T>>(
    centroids: &Centroids<T>,
    metric: &M,
    rows: &[usize],
) -> Option<T> {
    separations(centroids, metric, rows).reduce(T::max)
}

/// All pairwise distances between the given centroid rows.
fn separations<'a, T: Float, M: Metric<Vec<T>, T>>(
    centroids: &'a Centroids<T>,
    metric: &'a M,
    rows: &'a [usize],
) -> impl Iterator<Item = T> + 'a {
    rows.iter().enumerate().flat_map(move |(a, &i)| {
        rows[(a + 1)..]
            .iter()
            .map(move |&j| metric.distance(centroids.row(i), centroids.row(j)))
    })
}

/// The largest pairwise dissimilarity among a cluster's members.
///
/// A singleton or empty cluster has diameter zero.
pub(crate) fn cluster_diameter<T: Float, S: Dissimilarity<T>>(dissimilarity: &S, members: &[usize]) -> T {
    let mut diameter = T::ZERO;
    for (a, &i) in members.iter().enumerate() {
        for &j in &members[(a + 1)..] {
            diameter = diameter.max(dissimilarity.get(i, j));
        }
    }
    diameter
}
