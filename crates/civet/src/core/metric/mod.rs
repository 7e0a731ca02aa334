//! The `Metric` trait is used for all distance computations in CIVET.

use distances::Number;

mod chebyshev;
mod euclidean;
mod induced;
mod manhattan;
mod squared_euclidean;

pub use chebyshev::Chebyshev;
pub use euclidean::Euclidean;
pub use induced::Induced;
pub use manhattan::Manhattan;
pub use squared_euclidean::SquaredEuclidean;

/// The `Metric` trait is used for all distance computations in CIVET.
///
/// Every validity measure takes the distance function as a parameter of this
/// type; none of them hard-codes a metric. Implementations are expected to be
/// cheap to call many times per evaluation.
///
/// # Type Parameters
///
/// - `I`: The type of the items.
/// - `T`: The type of the distance values.
pub trait Metric<I, T: Number> {
    /// Call the metric on two items.
    fn distance(&self, a: &I, b: &I) -> T;

    /// The name of the metric.
    fn name(&self) -> &str;

    /// Whether the metric provides an identity among the items.
    ///
    /// Identity is defined as `d(a, b) = 0` if and only if `a = b`.
    ///
    /// This is used when computing the diagonal of a pairwise distance matrix.
    fn has_identity(&self) -> bool;

    /// Whether the metric only produces non-negative values.
    ///
    /// Non-negativity is defined as `d(a, b) >= 0` for all items `a` and `b`.
    fn has_non_negativity(&self) -> bool;

    /// Whether the metric is symmetric.
    ///
    /// Symmetry is defined as `d(a, b) = d(b, a)` for all items `a` and `b`.
    ///
    /// This is used when computing the lower triangle of a pairwise distance
    /// matrix.
    fn has_symmetry(&self) -> bool;

    /// Whether the metric satisfies the triangle inequality.
    ///
    /// The triangle inequality is defined as `d(a, b) + d(b, c) >= d(a, c)`
    /// for all items `a`, `b`, and `c`.
    fn obeys_triangle_inequality(&self) -> bool;

    /// Whether the metric is expensive to compute.
    ///
    /// We say that a metric is expensive if it costs more than linear time in
    /// the size of the items to compute the distance between two items. For
    /// expensive metrics, precomputing a pairwise dissimilarity matrix
    /// amortizes the cost across the measures that need many pairwise
    /// distances.
    fn is_expensive(&self) -> bool;

    /// Whether an item is equal to another item. Items can only be equal if
    /// the metric provides an identity.
    ///
    /// This is a convenience function that checks if the distance between two
    /// items is zero.
    fn is_equal(&self, a: &I, b: &I) -> bool {
        self.has_identity() && self.distance(a, b) == T::ZERO
    }
}

/// Parallel version of [`Metric`](crate::core::metric::Metric).
#[allow(clippy::module_name_repetitions)]
pub trait ParMetric<I: Send + Sync, T: Number>: Metric<I, T> + Send + Sync {
    /// Parallel version of [`Metric::distance`](crate::core::metric::Metric::distance).
    ///
    /// The default implementation calls the non-parallel version of the
    /// distance function.
    fn par_distance(&self, a: &I, b: &I) -> T {
        self.distance(a, b)
    }
}

impl<I, T: Number> Metric<I, T> for Box<dyn Metric<I, T>> {
    fn distance(&self, a: &I, b: &I) -> T {
        (**self).distance(a, b)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn has_identity(&self) -> bool {
        (**self).has_identity()
    }

    fn has_non_negativity(&self) -> bool {
        (**self).has_non_negativity()
    }

    fn has_symmetry(&self) -> bool {
        (**self).has_symmetry()
    }

    fn obeys_triangle_inequality(&self) -> bool {
        (**self).obeys_triangle_inequality()
    }

    fn is_expensive(&self) -> bool {
        (**self).is_expensive()
    }
}
