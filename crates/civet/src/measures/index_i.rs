//! Index I.

use distances::number::Float;

use crate::core::dataset::{Centroids, Dataset};
use crate::core::metric::Metric;
use crate::core::partition::Partition;

use super::{check_shapes, max_centroid_separation, populated_clusters, EvalContext};

/// Index I: `((E1 / Ek) * Dk) ^ p`, where `E1` is the total dispersion of
/// the data around the grand mean (taken from the [`EvalContext`]), `Ek`
/// is the sum of distances from every assigned instance to its cluster's
/// centroid, `Dk` is the largest distance between two populated centroids,
/// and `p` is a caller-chosen exponent, conventionally 2.
///
/// Higher is better. Sentinel `T::ZERO` when fewer than two clusters are
/// populated or `Ek` is zero.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
/// * If the context was built for a different cardinality.
pub fn index_i<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    ctx: &EvalContext<T>,
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
    p: i32,
) -> Result<T, String> {
    if ctx.cardinality() != data.cardinality() {
        return Err(format!(
            "The context was built over {} instances but the dataset has {}.",
            ctx.cardinality(),
            data.cardinality()
        ));
    }
    check_shapes(data, centroids, partition)?;
    let populated = populated_clusters(partition, centroids.num_rows())?;
    if populated.len() < 2 {
        return Ok(T::ZERO);
    }

    let dispersion_k = populated
        .iter()
        .flat_map(|(j, members)| {
            members
                .iter()
                .map(move |&i| metric.distance(data.get(i), centroids.row(*j)))
        })
        .sum::<T>();
    if dispersion_k == T::ZERO {
        return Ok(T::ZERO);
    }

    let rows = populated.iter().map(|&(j, _)| j).collect::<Vec<_>>();
    let spread = max_centroid_separation(centroids, metric, &rows).unwrap_or(T::ZERO);

    Ok(((ctx.dispersion() / dispersion_k) * spread).powi(p))
}
