//! The squared `Euclidean` distance metric.

use distances::number::Float;

use super::{Metric, ParMetric};

/// The squared `Euclidean` distance metric.
///
/// This is not a metric in the strict sense because it does not satisfy the
/// triangle inequality, but it preserves the ordering of `Euclidean`
/// distances while skipping the square root.
pub struct SquaredEuclidean;

impl<I: AsRef<[T]>, T: Float> Metric<I, T> for SquaredEuclidean {
    fn distance(&self, a: &I, b: &I) -> T {
        distances::vectors::euclidean_sq(a.as_ref(), b.as_ref())
    }

    fn name(&self) -> &str {
        "squared-euclidean"
    }

    fn has_identity(&self) -> bool {
        true
    }

    fn has_non_negativity(&self) -> bool {
        true
    }

    fn has_symmetry(&self) -> bool {
        true
    }

    fn obeys_triangle_inequality(&self) -> bool {
        false
    }

    fn is_expensive(&self) -> bool {
        false
    }
}

impl<I: AsRef<[T]> + Send + Sync, T: Float> ParMetric<I, T> for SquaredEuclidean {}
