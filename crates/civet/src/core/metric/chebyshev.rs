//! The `Chebyshev` distance metric.

use distances::Number;

use super::{Metric, ParMetric};

/// The `Chebyshev` distance metric, also known as the L-infinity distance.
///
/// The distance between two points is the maximum absolute difference over
/// their coordinates.
pub struct Chebyshev;

impl<I: AsRef<[T]>, T: Number> Metric<I, T> for Chebyshev {
    fn distance(&self, a: &I, b: &I) -> T {
        distances::vectors::chebyshev(a.as_ref(), b.as_ref())
    }

    fn name(&self) -> &str {
        "chebyshev"
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
        true
    }

    fn is_expensive(&self) -> bool {
        false
    }
}

impl<I: AsRef<[T]> + Send + Sync, T: Number> ParMetric<I, T> for Chebyshev {}
