//! The silhouette coefficient and its simplified centroid-based variant.

use distances::number::Float;

use crate::core::dataset::{Centroids, Dataset, Dissimilarity};
use crate::core::metric::Metric;
use crate::core::partition::Partition;
use crate::utils::FloatExt;

use super::{check_shapes, populated_clusters};

/// The mean silhouette coefficient of the partition.
///
/// For each instance in a cluster with at least two members, `a` is the
/// mean dissimilarity to the other members of its own cluster and `b` is
/// the smallest mean dissimilarity to the members of any other populated
/// cluster; the instance scores `(b - a) / max(a, b)`, or zero when both
/// terms are zero. Instances in singleton clusters have no `a` and are
/// skipped. The index is the mean score over the eligible instances.
///
/// Pairwise distances come from the given [`Dissimilarity`] source, so the
/// caller chooses between a precomputed matrix and on-the-fly computation
/// without changing the formula.
///
/// Higher is better, in `[-1, 1]`. Sentinel `T::ZERO` when fewer than two
/// clusters are populated or no instance is eligible.
///
/// # Errors
///
/// * If the dissimilarity source and the partition disagree on cardinality.
pub fn silhouette<T: Float, S: Dissimilarity<T>, P: Partition>(dissimilarity: &S, partition: &P) -> Result<T, String> {
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

    let mut total = T::ZERO;
    let mut eligible = 0_usize;
    for (a_idx, (_, members)) in populated.iter().enumerate() {
        if members.len() < 2 {
            continue;
        }
        for &i in members {
            let own = members
                .iter()
                .filter(|&&o| o != i)
                .map(|&o| dissimilarity.get(i, o))
                .sum::<T>()
                / T::from(members.len() - 1);

            let mut nearest_other: Option<T> = None;
            for (b_idx, (_, others)) in populated.iter().enumerate() {
                if a_idx == b_idx {
                    continue;
                }
                let mean = others.iter().map(|&o| dissimilarity.get(i, o)).sum::<T>() / T::from(others.len());
                nearest_other = Some(nearest_other.map_or(mean, |b| b.min(mean)));
            }
            // At least two clusters are populated, so `b` exists.
            let Some(between) = nearest_other else {
                continue;
            };

            total += coefficient(own, between);
            eligible += 1;
        }
    }

    if eligible == 0 {
        Ok(T::ZERO)
    } else {
        Ok(total / T::from(eligible))
    }
}

/// The simplified silhouette: centroid distances stand in for the mean
/// member dissimilarities, reducing the cost from quadratic in the
/// cardinality to the cluster count times the cardinality.
///
/// Here `a` is the distance to the instance's own centroid and `b` the
/// smallest distance to any other populated centroid, so all assigned
/// instances are eligible, including those in singleton clusters.
///
/// Higher is better. Sentinel `T::ZERO` when fewer than two clusters are
/// populated or no instance is assigned.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
pub fn simplified_silhouette<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
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

    let mut total = T::ZERO;
    let mut eligible = 0_usize;
    for (a_idx, (j, members)) in populated.iter().enumerate() {
        for &i in members {
            let own = metric.distance(data.get(i), centroids.row(*j));
            let mut nearest_other: Option<T> = None;
            for (b_idx, (o, _)) in populated.iter().enumerate() {
                if a_idx == b_idx {
                    continue;
                }
                let d = metric.distance(data.get(i), centroids.row(*o));
                nearest_other = Some(nearest_other.map_or(d, |b| b.min(d)));
            }
            let Some(between) = nearest_other else {
                continue;
            };

            total += coefficient(own, between);
            eligible += 1;
        }
    }

    if eligible == 0 {
        Ok(T::ZERO)
    } else {
        Ok(total / T::from(eligible))
    }
}

/// The per-instance silhouette coefficient `(b - a) / max(a, b)`, zero when
/// both terms are zero.
fn coefficient<T: Float>(own: T, between: T) -> T {
    let largest = own.max(between);
    if largest == T::ZERO {
        T::ZERO
    } else {
        (between - own) / largest
    }
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
            vec![0.1, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.1],
        ];
        let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1), Some(1)], 2).unwrap();
        (data, partition)
    }

    #[test]
    fn well_separated_clusters_score_high() {
        let (data, partition) = clustered();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        let value = silhouette(&matrix, &partition).unwrap();
        assert!(value > 0.9);
    }

    #[test]
    fn matrix_and_metric_backed_agree() {
        let (data, partition) = clustered();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        let lazy = MetricDissimilarity::new(&data, &Euclidean);
        let a = silhouette(&matrix, &partition).unwrap();
        let b = silhouette(&lazy, &partition).unwrap();
        assert!(float_cmp::approx_eq!(f64, a, b, ulps = 2));
    }

    #[test]
    fn zero_variance_clusters_score_perfectly() {
        // All members coincide with their centroid, so a = 0 and the
        // coefficient reduces to b / b = 1.
        let data = vec![vec![0.0_f64], vec![0.0], vec![9.0], vec![9.0]];
        let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1), Some(1)], 2).unwrap();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        let value = silhouette(&matrix, &partition).unwrap();
        assert!(float_cmp::approx_eq!(f64, value, 1.0, ulps = 2));
    }

    #[test]
    fn singleton_clusters_are_skipped() {
        let data = vec![vec![0.0_f64], vec![0.2], vec![9.0]];
        let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1)], 2).unwrap();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        // Only the two members of cluster 0 are eligible.
        let value = silhouette(&matrix, &partition).unwrap();
        assert!(value > 0.9);

        // With nothing but singletons, the index is undefined.
        let singletons = LabelPartition::new(vec![Some(0), Some(1), Some(2)], 3).unwrap();
        assert_eq!(silhouette(&matrix, &singletons).unwrap(), 0.0);
    }

    #[test]
    fn single_populated_cluster_is_undefined() {
        let (data, _) = clustered();
        let partition = LabelPartition::new(vec![Some(0); 4], 2).unwrap();
        let matrix = DissimilarityMatrix::new(&data, &Euclidean);
        assert_eq!(silhouette(&matrix, &partition).unwrap(), 0.0);
    }

    #[test]
    fn simplified_silhouette_tracks_the_full_index() {
        let (data, partition) = clustered();
        let centroids = Centroids::from_partition(&data, &partition).unwrap();
        let simplified = simplified_silhouette(&data, &Euclidean, &centroids, &partition).unwrap();
        assert!(simplified > 0.9);
    }
}
