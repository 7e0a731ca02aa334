//! The CS-measure.

use distances::number::Float;

use crate::core::dataset::{Centroids, Dissimilarity};
use crate::core::metric::Metric;
use crate::core::partition::Partition;
use crate::utils::FloatExt;

use super::{cluster_diameter, populated_clusters};

/// The CS-measure: the sum over populated clusters of `diameter / size`,
/// divided by the sum over populated clusters of the distance to the
/// nearest other populated centroid.
///
/// Member diameters come from the given [`Dissimilarity`] source while
/// centroid separations use the metric, so a precomputed instance matrix
/// can be combined with direct centroid distances.
///
/// Lower is better. Sentinel `T::MAX` when fewer than two clusters are
/// populated or the separation sum is zero.
///
/// # Errors
///
/// * If the dissimilarity source and the partition disagree on cardinality.
/// * If a populated cluster has no centroid row.
pub fn cs_measure<T: Float, S: Dissimilarity<T>, M: Metric<Vec<T>, T>, P: Partition>(
    dissimilarity: &S,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<T, String> {
    if dissimilarity.cardinality() != partition.cardinality() {
        return Err(format!(
            "The dissimilarity source covers {} instances but the partition has {}.",
            dissimilarity.cardinality(),
            partition.cardinality()
        ));
    }

    let populated = populated_clusters(partition, centroids.num_rows())?;
    if populated.len() < 2 {
        return Ok(T::MAX);
    }

    let compactness = populated
        .iter()
        .map(|(_, members)| cluster_diameter(dissimilarity, members) / T::from(members.len()))
        .sum::<T>();

    let mut separation = T::ZERO;
    for (a, &(i, _)) in populated.iter().enumerate() {
        let mut nearest: Option<T> = None;
        for (b, &(j, _)) in populated.iter().enumerate() {
            if a == b {
                continue;
            }
            let d = metric.distance(centroids.row(i), centroids.row(j));
            nearest = Some(nearest.map_or(d, |n| n.min(d)));
        }
        separation += nearest.unwrap_or(T::ZERO);
    }

    if separation == T::ZERO {
        Ok(T::MAX)
    } else {
        Ok(compactness / separation)
    }
}
