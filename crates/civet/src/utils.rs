//! Utility functions for the crate.

use core::cmp::Ordering;

use distances::{number::Float, Number};

/// Scalar `min`/`max`/`total_cmp` helpers for [`Float`] values.
///
/// [`distances::number::Float`] only guarantees [`PartialOrd`], so these
/// element-wise comparisons are provided here for every floating-point type
/// the crate operates over. They mirror the standard library's `f64::min`,
/// `f64::max`, and `f64::total_cmp` for the finite values used throughout the
/// measures.
pub(crate) trait FloatExt: Float {
    /// Return the smaller of `self` and `other`.
    fn min(self, other: Self) -> Self;
    /// Return the larger of `self` and `other`.
    fn max(self, other: Self) -> Self;
    /// Compare two values, ordering incomparable values as equal.
    fn total_cmp(&self, other: &Self) -> Ordering;
}

impl<T: Float> FloatExt for T {
    fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    fn total_cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

/// Return the index and value of the minimum value in the given slice of values.
///
/// NAN values are ordered as greater than all other values.
///
/// This will return `None` if the given slice is empty.
pub fn arg_min<T: PartialOrd + Copy>(values: &[T]) -> Option<(usize, T)> {
    values
        .iter()
        .enumerate()
        .min_by(|&(_, l), &(_, r)| l.partial_cmp(r).unwrap_or(Ordering::Greater))
        .map(|(i, v)| (i, *v))
}

/// Return the index and value of the maximum value in the given slice of values.
///
/// NAN values are ordered as smaller than all other values.
///
/// This will return `None` if the given slice is empty.
pub fn arg_max<T: PartialOrd + Copy>(values: &[T]) -> Option<(usize, T)> {
    values
        .iter()
        .enumerate()
        .max_by(|&(_, l), &(_, r)| l.partial_cmp(r).unwrap_or(Ordering::Less))
        .map(|(i, v)| (i, *v))
}

/// Calculate the mean and variance of the given values.
///
/// Calculates the mean and variance using a single pass algorithm.
///
/// # Arguments:
///
/// * `values` - The values to calculate the mean and variance of.
///
/// # Returns:
///
/// A tuple containing the mean and variance of the given values.
pub fn mean_variance<T: Number, F: Float>(values: &[T]) -> (F, F) {
    let n = F::from(values.len());
    let (sum, sum_squares) = values
        .iter()
        .map(|&x| F::from(x))
        .map(|x| (x, x.powi(2)))
        .fold((F::ZERO, F::ZERO), |(sum, sum_squares), (x, xx)| {
            (sum + x, sum_squares + xx)
        });

    let mean = sum / n;
    let variance = (sum_squares / n) - mean.powi(2);

    (mean, variance)
}

/// Return the mean value of the given slice of values.
pub fn mean<T: Number, F: Float>(values: &[T]) -> F {
    F::from(values.iter().copied().sum::<T>()) / F::from(values.len())
}

/// Return the variance of the given slice of values.
pub fn variance<T: Number, F: Float>(values: &[T], mean: F) -> F {
    values
        .iter()
        .map(|v| F::from(*v))
        .map(|v| v - mean)
        .map(|v| v.powi(2))
        .sum::<F>()
        / F::from(values.len())
}

/// Finds the standard deviation
///
/// A helper function to find the standard deviation from a list of values
///
/// Source: <https://en.wikipedia.org/wiki/Standard_deviation>
///
/// # Arguments
///
/// * `values` - The data to find the STD of.
pub fn standard_deviation<T: Number, F: Float>(values: &[T]) -> F {
    variance(values, mean::<_, F>(values)).sqrt()
}

/// Assign ascending mid-ranks to the given values.
///
/// Values are ranked from 1 in ascending order. Runs of tied values all
/// receive the mean of the ranks the run spans, e.g. two values tied for
/// ranks 1 and 2 both receive 1.5. The returned vector is in the same order
/// as the input, i.e. `result[i]` is the rank of `values[i]`.
///
/// NAN values are ordered as greater than all other values.
///
/// This is the rank transform used for rank-based standardization of
/// features.
pub fn mid_ranks<T: Number, F: Float>(values: &[T]) -> Vec<F> {
    let mut order = values.iter().copied().enumerate().collect::<Vec<_>>();
    order.sort_by(|&(_, l), &(_, r)| l.partial_cmp(&r).unwrap_or(Ordering::Greater));

    let mut ranks = vec![F::ZERO; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && order[end].1 == order[start].1 {
            end += 1;
        }
        // Mean of the 1-based ranks `start+1..=end` spanned by the tied run.
        let rank = F::from(start + 1 + end) / F::from(2);
        for &(i, _) in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }

    ranks
}
