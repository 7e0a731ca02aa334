//! A dense row-major matrix of cluster centroids.

use distances::number::Float;
use serde::{Deserialize, Serialize};

use crate::core::metric::Metric;
use crate::core::partition::Partition;
use crate::utils;

use super::{stats, Dataset};

/// A dense row-major matrix with one row per cluster and one column per
/// feature dimension.
///
/// A centroid matrix may carry more rows than there are populated clusters in
/// a partition; whether a cluster is "null" (has no members) is always
/// decided from the partition, never from the contents of a row. Rows for
/// empty clusters produced by [`Centroids::from_partition`] are zero vectors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Centroids<T: Float> {
    /// The centroid rows.
    rows: Vec<Vec<T>>,
    /// The number of columns in every row.
    dimensionality: usize,
}

impl<T: Float> Centroids<T> {
    /// Creates a new `Centroids` matrix from its rows.
    ///
    /// # Errors
    ///
    /// * If `rows` is empty.
    /// * If the rows do not all have the same dimensionality.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self, String> {
        let dimensionality = stats::uniform_dimensionality(&rows)?;
        Ok(Self { rows, dimensionality })
    }

    /// Computes the centroid matrix of a partition as the componentwise mean
    /// of each cluster's members.
    ///
    /// Clusters with no members get a zero row; the caller decides nullness
    /// from the partition, so these rows are never read as real centroids.
    ///
    /// # Errors
    ///
    /// * If the dataset is empty or has ragged dimensionality.
    /// * If the partition does not cover exactly the dataset's instances.
    /// * If the partition declares zero clusters.
    pub fn from_partition<D: Dataset<Vec<T>>, P: Partition>(data: &D, partition: &P) -> Result<Self, String> {
        let dimensionality = stats::uniform_dimensionality(data)?;
        if partition.cardinality() != data.cardinality() {
            return Err(format!(
                "The partition covers {} instances but the dataset has {}.",
                partition.cardinality(),
                data.cardinality()
            ));
        }
        let k = partition.num_clusters();
        if k == 0 {
            return Err("The partition declares zero clusters.".to_string());
        }

        let mut sums = vec![vec![T::ZERO; dimensionality]; k];
        let mut counts = vec![0_usize; k];
        for i in 0..data.cardinality() {
            if let Some(j) = partition.cluster_of(i) {
                if j >= k {
                    return Err(format!("Instance {i} is assigned to cluster {j} but k = {k}."));
                }
                counts[j] += 1;
                for (s, &x) in sums[j].iter_mut().zip(data.get(i)) {
                    *s += x;
                }
            }
        }

        let rows = sums
            .into_iter()
            .zip(counts)
            .map(|(sums, count)| {
                if count == 0 {
                    vec![T::ZERO; dimensionality]
                } else {
                    stats::feature_mean(count, &sums)
                }
            })
            .collect();

        Ok(Self { rows, dimensionality })
    }

    /// The number of rows, i.e. the number of clusters `k` this matrix was
    /// built for.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The number of columns, i.e. the feature dimensionality.
    #[must_use]
    pub const fn dimensionality(&self) -> usize {
        self.dimensionality
    }

    /// Returns the centroid of the given cluster.
    ///
    /// Panics if `j` is out of bounds.
    #[must_use]
    pub fn row(&self, j: usize) -> &Vec<T> {
        &self.rows[j]
    }

    /// Iterates over the centroid rows in cluster order.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<T>> {
        self.rows.iter()
    }

    /// Returns the index of the centroid nearest to the query under the
    /// given metric, along with the distance to it.
    pub fn nearest<M: Metric<Vec<T>, T>>(&self, query: &Vec<T>, metric: &M) -> (usize, T) {
        let distances = self.rows.iter().map(|row| metric.distance(query, row)).collect::<Vec<_>>();
        // Rows are non-empty by construction.
        utils::arg_min(&distances).unwrap_or((0, T::ZERO))
    }
}
