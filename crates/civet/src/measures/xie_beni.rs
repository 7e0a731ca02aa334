//! The Xie-Beni index for crisp and fuzzy partitions.

use distances::number::Float;

use crate::core::dataset::{Centroids, Dataset};
use crate::core::metric::Metric;
use crate::core::partition::{Membership, Partition};

use super::{check_shapes, min_centroid_separation, populated_clusters, sse};

/// The Xie-Beni index for a crisp partition: the SSE divided by the
/// cardinality times the squared minimum separation between populated
/// centroids.
///
/// Lower is better. Sentinel `T::MAX` when fewer than two clusters are
/// populated, when two populated centroids coincide, or when the partition
/// is inconsistent with the centroid matrix.
///
/// # Errors
///
/// * If the shapes disagree, or a populated cluster has no centroid row.
pub fn xie_beni<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>, P: Partition>(
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

    let rows = populated.iter().map(|&(j, _)| j).collect::<Vec<_>>();
    let separation = min_centroid_separation(centroids, metric, &rows).unwrap_or(T::ZERO);
    if separation == T::ZERO {
        return Ok(T::MAX);
    }

    let (value, valid) = sse(data, metric, centroids, partition)?;
    if !valid {
        return Ok(T::MAX);
    }
    Ok(value / (T::from(data.cardinality()) * separation.powi(2)))
}

/// The Xie-Beni index for a fuzzy partition:
/// `sum_j sum_i u_ji^2 * dist(x_i, c_j)^2` divided by the cardinality times
/// the squared minimum inter-centroid separation.
///
/// Every centroid row participates here; a fuzzy partition has no null
/// clusters, only degrees.
///
/// Lower is better. Sentinel `T::MAX` when the matrix has fewer than two
/// rows or two centroids coincide.
///
/// # Errors
///
/// * If the data and centroids disagree on dimensionality or the membership
///   matrix has the wrong shape.
pub fn fuzzy_xie_beni<T: Float, D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>>(
    data: &D,
    metric: &M,
    centroids: &Centroids<T>,
    membership: &Membership<T>,
) -> Result<T, String> {
    let dimensionality = crate::core::dataset::stats::uniform_dimensionality(data)?;
    if dimensionality != centroids.dimensionality() {
        return Err(format!(
            "The data have dimensionality {dimensionality} but the centroids have {}.",
            centroids.dimensionality()
        ));
    }
    if membership.cardinality() != data.cardinality() {
        return Err(format!(
            "The membership matrix covers {} instances but the dataset has {}.",
            membership.cardinality(),
            data.cardinality()
        ));
    }
    if membership.num_clusters() != centroids.num_rows() {
        return Err(format!(
            "The membership matrix has {} rows but the centroid matrix has {}.",
            membership.num_clusters(),
            centroids.num_rows()
        ));
    }

    if centroids.num_rows() < 2 {
        return Ok(T::MAX);
    }
    let rows = (0..centroids.num_rows()).collect::<Vec<_>>();
    let separation = min_centroid_separation(centroids, metric, &rows).unwrap_or(T::ZERO);
    if separation == T::ZERO {
        return Ok(T::MAX);
    }

    let mut total = T::ZERO;
    for j in 0..centroids.num_rows() {
        for i in 0..data.cardinality() {
            let degree = membership.degree(j, i);
            total += degree.powi(2) * metric.distance(data.get(i), centroids.row(j)).powi(2);
        }
    }

    Ok(total / (T::from(data.cardinality()) * separation.powi(2)))
}
