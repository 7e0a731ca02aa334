//! The Davies-Bouldin index.

use distances::number::Float;

use crate::core::dataset::{Centroids, Dataset};
use crate::core::metric::Metric;
use crate::core::partition::Partition;
use crate::utils::FloatExt;

use super::{check_shapes, cluster_scatter, populated_clusters};

/// The Davies-Bouldin index: the mean, over populated clusters, of the
/// worst ratio `(s_i + s_j) / d(c_i, c_j)` against any other populated
/// cluster, where `s` is the mean distance from a cluster's members to its
/// centroid.
///
/// Lower is better. Sentinel `T::MAX` when fewer than two clusters are
/// populated, when two populated centroids coincide (zero denominator), or
/// when a scatter is not finite. Empty clusters are skipped entirely; they
/// never enter the ratios as zero scatters.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
pub fn davies_bouldin<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<T, String> {
    check_shapes(data, centroids, partition)?;
    let populated = populated_clusters(partition, centroids.num_rows())?;
    if populated.len() < 2 {
        return Ok(T::MAX);
    }

    let scatters = populated
        .iter()
        .map(|(j, members)| cluster_scatter(data, metric, centroids.row(*j), members))
        .collect::<Vec<_>>();
    // Populated clusters always have a scatter; a NaN one (from a NaN
    // feature) makes the index undefined.
    if scatters.iter().any(|s| s.map_or(true, |s| s.as_f64().is_nan())) {
        return Ok(T::MAX);
    }

    let mut total = T::ZERO;
    for (a, &(i, _)) in populated.iter().enumerate() {
        let mut worst = T::ZERO;
        for (b, &(j, _)) in populated.iter().enumerate() {
            if a == b {
                continue;
            }
            let separation = metric.distance(centroids.row(i), centroids.row(j));
            if separation == T::ZERO {
                return Ok(T::MAX);
            }
            let (Some(s_a), Some(s_b)) = (scatters[a], scatters[b]) else {
                continue;
            };
            worst = worst.max((s_a + s_b) / separation);
        }
        total += worst;
    }

    Ok(total / T::from(populated.len()))
}
