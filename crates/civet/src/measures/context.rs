//! Dataset-wide aggregates shared across measures.

use distances::number::Float;
use mt_logger::{mt_log, Level};
use serde::{Deserialize, Serialize};

use crate::core::dataset::{stats, Dataset};
use crate::core::metric::Metric;

/// The dataset-wide aggregates that several measures share: the grand mean
/// of all instances and the total dispersion around it.
///
/// A context is built once per generation (or per dataset version) and
/// passed explicitly into every measure that needs it. Recomputation is the
/// caller constructing a new context; nothing in this crate caches these
/// aggregates behind the caller's back, so a stale context can only exist
/// if the caller keeps one across a dataset change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvalContext<T: Float> {
    /// The componentwise mean of all instances.
    grand_mean: Vec<T>,
    /// The number of instances the aggregates were computed from.
    cardinality: usize,
    /// The sum of distances from every instance to the grand mean.
    dispersion: T,
}

impl<T: Float> EvalContext<T> {
    /// Computes the aggregates of a dataset under the given metric.
    ///
    /// # Errors
    ///
    /// * If the dataset is empty or has ragged dimensionality.
    pub fn new<D: Dataset<Vec<T>>, M: Metric<Vec<T>, T>>(data: &D, metric: &M) -> Result<Self, String> {
        let dimensionality = stats::uniform_dimensionality(data)?;
        let cardinality = data.cardinality();
        mt_log!(
            Level::Debug,
            "Computing dataset aggregates over {cardinality} instances with the {} metric...",
            metric.name()
        );

        let sums = stats::feature_sum(data, vec![T::ZERO; dimensionality]);
        let grand_mean = stats::feature_mean(cardinality, &sums);
        let dispersion = (0..cardinality)
            .map(|i| metric.distance(data.get(i), &grand_mean))
            .sum();

        Ok(Self {
            grand_mean,
            cardinality,
            dispersion,
        })
    }

    /// The componentwise mean of all instances.
    #[must_use]
    pub fn grand_mean(&self) -> &Vec<T> {
        &self.grand_mean
    }

    /// The number of instances the aggregates were computed from.
    #[must_use]
    pub const fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// The sum of distances from every instance to the grand mean, i.e. the
    /// `E1` term of Index I.
    #[must_use]
    pub const fn dispersion(&self) -> T {
        self.dispersion
    }

    /// The dimensionality the aggregates were computed for.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.grand_mean.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::metric::Euclidean;

    use super::*;

    #[test]
    fn aggregates_of_a_symmetric_square() {
        let data = vec![vec![0.0_f64, 0.0], vec![0.0, 2.0], vec![2.0, 0.0], vec![2.0, 2.0]];
        let ctx = EvalContext::new(&data, &Euclidean).unwrap();
        assert_eq!(ctx.grand_mean(), &vec![1.0, 1.0]);
        assert_eq!(ctx.cardinality(), 4);
        // Every corner is sqrt(2) from the center.
        let expected = 4.0 * 2.0_f64.sqrt();
        assert!(float_cmp::approx_eq!(f64, ctx.dispersion(), expected, ulps = 2));
    }

    #[test]
    fn empty_data_is_an_error() {
        let empty: Vec<Vec<f64>> = vec![];
        assert!(EvalContext::new(&empty, &Euclidean).is_err());
    }
}
