//! The sum of squared errors and its normalized form, distortion.

use distances::number::Float;

use crate::core::dataset::{Centroids, Dataset};
use crate::core::metric::Metric;
use crate::core::partition::Partition;

use super::check_shapes;

/// The sum of squared distances from every assigned instance to the
/// centroid of its recorded cluster.
///
/// Returns the value together with a validity flag. If the partition
/// assigns an instance to a cluster with no row in the centroid matrix, the
/// candidate solution and its labels are inconsistent: the result is
/// `(T::MAX, false)` and the driver should discard the candidate.
/// Unassigned instances contribute nothing.
///
/// # Errors
///
/// * If the shapes of the data, centroids, and partition disagree.
pub fn sse<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<(T, bool), String> {
    check_shapes(data, centroids, partition)?;

    let mut total = T::ZERO;
    for i in 0..data.cardinality() {
        if let Some(j) = partition.cluster_of(i) {
            if j >= centroids.num_rows() {
                return Ok((T::MAX, false));
            }
            total += metric.distance(data.get(i), centroids.row(j)).powi(2);
        }
    }
    Ok((total, true))
}

/// The sum of squared distances from every instance to its nearest
/// centroid.
///
/// This ignores any recorded membership and recomputes the assignment by
/// nearest-centroid search; use it when consistency with a partition need
/// not be checked.
///
/// # Errors
///
/// * If the data are empty or their dimensionality disagrees with the
///   centroids.
pub fn sse_nearest<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>>(
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
) -> Result<T, String> {
    let dimensionality = crate::core::dataset::stats::uniform_dimensionality(data)?;
    if dimensionality != centroids.dimensionality() {
        return Err(format!(
            "The data have dimensionality {dimensionality} but the centroids have {}.",
            centroids.dimensionality()
        ));
    }

    let total = (0..data.cardinality())
        .map(|i| centroids.nearest(data.get(i), metric).1.powi(2))
        .sum();
    Ok(total)
}

/// The within-cluster sum of squares: the sum over populated clusters of
/// the cluster's SSE.
///
/// This is the `SSw` building block of the Variance Ratio Criterion, the
/// WB-index, and the Score Function.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
pub fn ssw<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<T, String> {
    check_shapes(data, centroids, partition)?;
    let total = super::populated_clusters(partition, centroids.num_rows())?
        .into_iter()
        .map(|(j, members)| {
            members
                .into_iter()
                .map(|i| metric.distance(data.get(i), centroids.row(j)).powi(2))
                .sum::<T>()
        })
        .sum();
    Ok(total)
}

/// The distortion of a candidate solution: its SSE normalized by the total
/// instance frequency times the dimensionality.
///
/// Beyond the cluster-row check of [`sse`], this verifies that every
/// instance's nearest centroid agrees with its recorded membership (ties
/// count as agreement). Disagreement means the labels no longer describe
/// the centroid matrix (a soft, expected condition for offspring in an
/// evolutionary search) and yields `(T::MAX, false)` so the caller can
/// reject the candidate. Unassigned instances also invalidate the
/// candidate.
///
/// # Errors
///
/// * If the shapes of the data, centroids, and partition disagree.
pub fn distortion<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
) -> Result<(T, bool), String> {
    weighted_distortion(data, metric, centroids, partition, &[])
}

/// [`distortion`] for frequency-bearing instances.
///
/// Each instance's squared distance counts `frequencies[i]` times and the
/// normalizing denominator is the total frequency times the dimensionality.
/// Instances beyond the end of `frequencies` count once.
///
/// # Errors
///
/// * If the shapes of the data, centroids, and partition disagree.
pub fn weighted_distortion<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    partition: &P,
    frequencies: &[usize],
) -> Result<(T, bool), String> {
    check_shapes(data, centroids, partition)?;

    let mut total = T::ZERO;
    let mut total_frequency = 0_usize;
    for i in 0..data.cardinality() {
        let frequency = frequencies.get(i).copied().unwrap_or(1);
        total_frequency += frequency;

        let Some(j) = partition.cluster_of(i) else {
            return Ok((T::MAX, false));
        };
        if j >= centroids.num_rows() {
            return Ok((T::MAX, false));
        }

        let recorded = metric.distance(data.get(i), centroids.row(j));
        let (_, nearest) = centroids.nearest(data.get(i), metric);
        if recorded > nearest {
            return Ok((T::MAX, false));
        }
        total += T::from(frequency) * recorded.powi(2);
    }

    let denominator = T::from(total_frequency) * T::from(centroids.dimensionality());
    Ok((total / denominator, true))
}

#[cfg(test)]
mod tests {
    use crate::core::metric::Euclidean;
    use crate::core::partition::LabelPartition;

    use super::*;

    fn square() -> (Vec<Vec<f64>>, Centroids<f64>, LabelPartition) {
        let data = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let centroids = Centroids::new(vec![vec![0.0, 0.5], vec![1.0, 0.5]]).unwrap();
        let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1), Some(1)], 2).unwrap();
        (data, centroids, partition)
    }

    #[test]
    fn sse_of_the_unit_square() {
        let (data, centroids, partition) = square();
        let (value, valid) = sse(&data, &Euclidean, &centroids, &partition).unwrap();
        assert!(valid);
        assert!(float_cmp::approx_eq!(f64, value, 1.0, ulps = 2));

        let nearest = sse_nearest(&data, &Euclidean, &centroids).unwrap();
        assert!(float_cmp::approx_eq!(f64, nearest, 1.0, ulps = 2));

        let within = ssw(&data, &Euclidean, &centroids, &partition).unwrap();
        assert!(float_cmp::approx_eq!(f64, within, 1.0, ulps = 2));
    }

    #[test]
    fn missing_centroid_row_is_a_soft_failure() {
        let (data, _, _) = square();
        let centroids = Centroids::new(vec![vec![0.5, 0.5]]).unwrap();
        let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1), Some(1)], 2).unwrap();

        let (value, valid) = sse(&data, &Euclidean, &centroids, &partition).unwrap();
        assert!(!valid);
        assert_eq!(value, f64::MAX);
    }

    #[test]
    fn distortion_normalizes_by_frequency_and_dimensionality() {
        let (data, centroids, partition) = square();
        let (value, valid) = distortion(&data, &Euclidean, &centroids, &partition).unwrap();
        assert!(valid);
        // SSE = 1.0, n = 4, d = 2.
        assert!(float_cmp::approx_eq!(f64, value, 0.125, ulps = 2));

        let (weighted, valid) = weighted_distortion(&data, &Euclidean, &centroids, &partition, &[1, 1, 1, 5]).unwrap();
        assert!(valid);
        // SSE = 0.75 + 5 * 0.25, total frequency 8, d = 2.
        assert!(float_cmp::approx_eq!(f64, weighted, 2.0 / 16.0, ulps = 2));
    }

    #[test]
    fn misassigned_instances_invalidate_distortion() {
        let (data, centroids, _) = square();
        // Instance 0 is recorded in cluster 1 but is nearer to centroid 0.
        let partition = LabelPartition::new(vec![Some(1), Some(0), Some(1), Some(1)], 2).unwrap();
        let (value, valid) = distortion(&data, &Euclidean, &centroids, &partition).unwrap();
        assert!(!valid);
        assert_eq!(value, f64::MAX);

        // SSE itself does not check nearest-centroid consistency.
        let (_, sse_valid) = sse(&data, &Euclidean, &centroids, &partition).unwrap();
        assert!(sse_valid);
    }

    #[test]
    fn unassigned_instances_invalidate_distortion() {
        let (data, centroids, _) = square();
        let partition = LabelPartition::new(vec![Some(0), Some(0), Some(1), None], 2).unwrap();
        let (_, valid) = distortion(&data, &Euclidean, &centroids, &partition).unwrap();
        assert!(!valid);
    }

    #[test]
    fn shape_mismatch_is_a_hard_error() {
        let (data, _, partition) = square();
        let centroids = Centroids::new(vec![vec![0.0, 0.5, 0.0]]).unwrap();
        assert!(sse(&data, &Euclidean, &centroids, &partition).is_err());
    }
}
