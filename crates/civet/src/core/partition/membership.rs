//! The fuzzy membership-matrix partition.

use distances::number::Float;
use serde::{Deserialize, Serialize};

use super::Partition;

/// A fuzzy membership matrix `U` with one row per cluster and one column per
/// instance; `U[j][i]` is the degree to which instance `i` belongs to
/// cluster `j`.
///
/// The crisp reading of a fuzzy partition assigns each instance to the
/// cluster with the largest membership degree. Columns that are entirely
/// zero crisp to unassigned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Membership<T: Float> {
    /// The membership degrees, one row per cluster.
    weights: Vec<Vec<T>>,
    /// The number of instances, i.e. the number of columns in every row.
    cardinality: usize,
}

impl<T: Float> Membership<T> {
    /// Creates a new `Membership` matrix.
    ///
    /// Column sums are not checked; arg-max crisping and the fuzzy
    /// reductions are well defined without normalization.
    ///
    /// # Errors
    ///
    /// * If there are no rows.
    /// * If the rows do not all have the same length.
    /// * If any degree is negative.
    pub fn new(weights: Vec<Vec<T>>) -> Result<Self, String> {
        let Some(first) = weights.first() else {
            return Err("The membership matrix has no rows.".to_string());
        };
        let cardinality = first.len();
        if weights.iter().any(|row| row.len() != cardinality) {
            return Err("The membership matrix has ragged rows.".to_string());
        }
        if weights.iter().flatten().any(|&u| u < T::ZERO) {
            return Err("Membership degrees must be non-negative.".to_string());
        }
        Ok(Self { weights, cardinality })
    }

    /// The membership degree of instance `i` in cluster `j`.
    ///
    /// Panics if either index is out of bounds.
    #[must_use]
    pub fn degree(&self, j: usize, i: usize) -> T {
        self.weights[j][i]
    }

    /// Iterates over the rows of the matrix, one per cluster.
    pub fn rows(&self) -> impl Iterator<Item = &Vec<T>> {
        self.weights.iter()
    }

    /// Crisp the matrix into a dense label partition by arg-max.
    #[must_use]
    pub fn crisp(&self) -> super::LabelPartition {
        super::LabelPartition::from_partition(self)
    }
}

impl<T: Float> Partition for Membership<T> {
    fn cardinality(&self) -> usize {
        self.cardinality
    }

    fn num_clusters(&self) -> usize {
        self.weights.len()
    }

    fn cluster_of(&self, index: usize) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for (j, row) in self.weights.iter().enumerate() {
            let u = row[index];
            if u > T::ZERO && best.map_or(true, |(_, max)| u > max) {
                best = Some((j, u));
            }
        }
        best.map(|(j, _)| j)
    }
}
