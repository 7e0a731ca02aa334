//! The Dunn index and its simplified centroid-based variant.

use distances::number::Float;

use crate::core::dataset::{Centroids, Dataset, Dissimilarity};
use crate::core::metric::Metric;
use crate::core::partition::Partition;
use crate::utils::FloatExt;

use super::{check_shapes, cluster_diameter, min_centroid_separation, populated_clusters};

/// The Dunn index: the smallest inter-cluster instance separation divided
/// by the largest cluster diameter.
///
/// Pairwise distances come from the given [`Dissimilarity`] source, so the
/// caller chooses between a precomputed matrix and on-the-fly computation
/// without changing the formula. The cost is quadratic in the cardinality
/// either way.
///
/// Higher is better. Sentinel `T::ZERO` when fewer than two clusters are
/// populated or every populated cluster has diameter zero.
///
/// # Errors
///
/// * If the dissimilarity source and the partition disagree on cardinality.
pub fn dunn<T: Float, S: Dissimilarity<T>, P: Partition>(dissimilarity: &S, partition: &P) -> Result<T, String> {
    if dissimilarity.cardinality() != partition.cardinality() {
        return Err(format!(
            "The dissimilarity source covers {} instances but the partition has {}.",
            dissimilarity.cardinality(),
            partition.cardinality()
        ));
    }

    let populated = populated_clusters(partition, partition.num_clusters())?;
    if populated.len() < 2 {
        return Ok(T::ZERO);
    }

    let diameter = populated
        .iter()
        .map(|(_, members)| cluster_diameter(dissimilarity, members))
        .fold(T::ZERO, T::max);
    if diameter == T::ZERO {
        return Ok(T::ZERO);
    }

    let mut separation: Option<T> = None;
    for (a, (_, members_a)) in populated.iter().enumerate() {
        for (_, members_b) in &populated[(a + 1)..] {
            for &i in members_a {
                for &j in members_b {
                    let d = dissimilarity.get(i, j);
                    separation = Some(separation.map_or(d, |s| s.min(d)));
                }
            }
        }
    }

    separation.map_or(Ok(T::ZERO), |s| Ok(s / diameter))
}

/// The simplified Dunn index: the smallest inter-centroid distance divided
/// by the largest cluster radius, where a cluster's radius is the largest
/// distance from a member to its centroid.
///
/// This trades the quadratic pairwise scans of [`dunn`] for a cost linear
/// in the cardinality plus quadratic in the cluster count.
///
/// Higher is better. Sentinel `T::ZERO` when fewer than two clusters are
/// populated or every radius is zero.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
pub fn simplified_dunn<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<T, String> {
    check_shapes(data, centroids, partition)?;
    let populated = populated_clusters(partition, centroids.num_rows())?;
    if populated.len() < 2 {
        return Ok(T::ZERO);
    }

    let radius = populated
        .iter()
        .flat_map(|(j, members)| {
            members
                .iter()
                .map(move |&i| metric.distance(data.get(i), centroids.row(*j)))
        })
        .fold(T::ZERO, T::max);
    if radius == T::ZERO {
        return Ok(T::ZERO);
    }

    let rows = populated.iter().map(|&(j, _)| j).collect::<Vec<_>>();
    let separation = min_centroid_separation(centroids, metric, &rows).unwrap_or(T::ZERO);
    Ok(separation / radius)
}

#[cfg(test)]
mod tests {
    use crate::core::dataset::{DissimilarityMatrix, MetricDissimilarity};
    use crate::core::metric::Euclidean;
    use crate::core::partition::LabelPartition;

    use super::*;

    fn clustered() -> (Vec<Vec<f64>>, LabelPartition) {
        let data = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 0.0],
            vec![10.0, 1.0],
        ];
        let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1), Some(1)], 2).unwrap();
        (data, partition)
    }

    #[test]
    fn dunn_of_separated_clusters_is_positive() {
        let (data, partition) = clustered();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        let value = dunn(&matrix, &partition).unwrap();
        // Separation 10, diameter 1.
        assert!(float_cmp::approx_eq!(f64, value, 10.0, ulps = 2));
    }

    #[test]
    fn matrix_and_metric_backed_agree() {
        let (data, partition) = clustered();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        let lazy = MetricDissimilarity::new(&data, &Euclidean);
        let a = dunn(&matrix, &partition).unwrap();
        let b = dunn(&lazy, &partition).unwrap();
        assert!(float_cmp::approx_eq!(f64, a, b, ulps = 2));
    }

    #[test]
    fn simplified_dunn_uses_centroids() {
        let (data, partition) = clustered();
        let centroids = Centroids::from_partition(&data, &partition).unwrap();
        let value = simplified_dunn(&data, &Euclidean, &centroids, &partition).unwrap();
        // Centroid separation 10, radius 0.5.
        assert!(float_cmp::approx_eq!(f64, value, 20.0, ulps = 2));
    }

    #[test]
    fn single_populated_cluster_is_undefined() {
        let data = vec![vec![0.0_f64], vec![1.0]];
        let partition = LabelPartition::new(vec![Some(0), Some(0)], 2).unwrap();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        assert_eq!(dunn(&matrix, &partition).unwrap(), 0.0);

        let centroids = Centroids::from_partition(&data, &partition).unwrap();
        assert_eq!(simplified_dunn(&data, &Euclidean, &centroids, &partition).unwrap(), 0.0);
    }

    #[test]
    fn zero_diameter_is_undefined() {
        // All members coincide, so every diameter is zero.
        let data = vec![vec![0.0_f64], vec![0.0], vec![5.0], vec![5.0]];
        let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1), Some(1)], 2).unwrap();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        assert_eq!(dunn(&matrix, &partition).unwrap(), 0.0);
    }
}
