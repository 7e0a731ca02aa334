//! Per-dimension statistics over instance collections.
//!
//! These are the building blocks for centroid computation: componentwise
//! sums, means, squared deviations, and extrema over the feature vectors of
//! a dataset. All functions read the dataset through the [`Dataset`] trait
//! and never mutate it.

use distances::number::Float;

use crate::core::linalg;

use super::Dataset;

/// Returns the dimensionality shared by every instance in the dataset.
///
/// # Errors
///
/// * If the dataset is empty.
/// * If the instances do not all have the same dimensionality.
pub fn uniform_dimensionality<T: Float, D: Dataset<Vec<T>>>(data: &D) -> Result<usize, String> {
    if data.cardinality() == 0 {
        return Err("The dataset is empty.".to_string());
    }
    let dimensionality = data.get(0).len();
    for i in 1..data.cardinality() {
        if data.get(i).len() != dimensionality {
            return Err(format!(
                "Instance {i} has dimensionality {} but instance 0 has {dimensionality}.",
                data.get(i).len()
            ));
        }
    }
    Ok(dimensionality)
}

/// Componentwise sum of the instances, folded onto a caller-supplied seed.
///
/// An empty dataset returns the seed unchanged. Instances shorter than the
/// seed leave the trailing components unchanged.
pub fn feature_sum<T: Float, D: Dataset<Vec<T>>>(data: &D, seed: Vec<T>) -> Vec<T> {
    let mut sums = seed;
    for i in 0..data.cardinality() {
        linalg::axpy(T::ONE, data.get(i), &mut sums);
    }
    sums
}

/// Componentwise sum where each instance contributes `frequencies[i]` copies.
///
/// Also returns the total frequency, which is the denominator to use for a
/// frequency-weighted mean. Instances beyond the end of `frequencies`
/// contribute once.
pub fn weighted_feature_sum<T: Float, D: Dataset<Vec<T>>>(
    data: &D,
    frequencies: &[usize],
    seed: Vec<T>,
) -> (Vec<T>, usize) {
    let mut sums = seed;
    let mut total = 0;
    for i in 0..data.cardinality() {
        let frequency = frequencies.get(i).copied().unwrap_or(1);
        total += frequency;
        linalg::axpy(T::from(frequency), data.get(i), &mut sums);
    }
    (sums, total)
}

/// Componentwise mean from a count and a sum vector.
///
/// The caller must guarantee `count > 0`.
#[must_use]
pub fn feature_mean<T: Float>(count: usize, sums: &[T]) -> Vec<T> {
    let n = T::from(count);
    sums.iter().map(|&s| s / n).collect()
}

/// Componentwise sum of squared deviations from the given mean vector.
///
/// Dividing the result by the cardinality gives the per-dimension population
/// variance.
pub fn sum_squared_deviation<T: Float, D: Dataset<Vec<T>>>(mean: &[T], data: &D) -> Vec<T> {
    let mut deviations = vec![T::ZERO; mean.len()];
    for i in 0..data.cardinality() {
        for ((dev, &m), &x) in deviations.iter_mut().zip(mean).zip(data.get(i)) {
            let diff = x - m;
            *dev += diff.powi(2);
        }
    }
    deviations
}

/// Elementwise square root, turning a variance vector into standard
/// deviations.
#[must_use]
pub fn to_standard_deviations<T: Float>(variances: &[T]) -> Vec<T> {
    variances.iter().map(|&v| v.sqrt()).collect()
}

/// Componentwise minimum over the instances.
///
/// Returns `None` if the dataset is empty.
pub fn feature_min<T: Float, D: Dataset<Vec<T>>>(data: &D) -> Option<Vec<T>> {
    feature_extremum(data, |x, acc| x < acc)
}

/// Componentwise maximum over the instances.
///
/// Returns `None` if the dataset is empty.
pub fn feature_max<T: Float, D: Dataset<Vec<T>>>(data: &D) -> Option<Vec<T>> {
    feature_extremum(data, |x, acc| x > acc)
}

/// Componentwise extremum under the given `replaces` predicate.
fn feature_extremum<T: Float, D: Dataset<Vec<T>>, P: Fn(T, T) -> bool>(data: &D, replaces: P) -> Option<Vec<T>> {
    if data.cardinality() == 0 {
        return None;
    }
    let mut extrema = data.get(0).clone();
    for i in 1..data.cardinality() {
        for (e, &x) in extrema.iter_mut().zip(data.get(i)) {
            if replaces(x, *e) {
                *e = x;
            }
        }
    }
    Some(extrema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Vec<Vec<f64>> {
        vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]]
    }

    #[test]
    fn sums_and_means() {
        let data = data();
        let sums = feature_sum(&data, vec![0.0, 0.0]);
        assert_eq!(sums, vec![6.0, 60.0]);

        let mean = feature_mean(data.len(), &sums);
        assert_eq!(mean, vec![2.0, 20.0]);

        // The seed is the initial value, not overwritten.
        let seeded = feature_sum(&data, vec![1.0, -60.0]);
        assert_eq!(seeded, vec![7.0, 0.0]);

        let empty: Vec<Vec<f64>> = vec![];
        assert_eq!(feature_sum(&empty, vec![4.0]), vec![4.0]);
    }

    #[test]
    fn weighted_sums() {
        let data = data();
        let (sums, total) = weighted_feature_sum(&data, &[2, 1, 1], vec![0.0, 0.0]);
        assert_eq!(total, 4);
        assert_eq!(sums, vec![7.0, 70.0]);

        let (unweighted, n) = weighted_feature_sum(&data, &[1, 1, 1], vec![0.0, 0.0]);
        assert_eq!(n, data.len());
        assert_eq!(unweighted, feature_sum(&data, vec![0.0, 0.0]));
    }

    #[test]
    fn deviations_are_non_negative() {
        let data = data();
        let sums = feature_sum(&data, vec![0.0, 0.0]);
        let mean = feature_mean(data.len(), &sums);
        let ssd = sum_squared_deviation(&mean, &data);
        assert!(ssd.iter().all(|&v| v >= 0.0));

        let n = data.len() as f64;
        let sds = to_standard_deviations(&ssd.iter().map(|&v| v / n).collect::<Vec<_>>());
        assert!(sds.iter().all(|&v| v >= 0.0));
        let expected = statistical::population_variance(&[1.0, 2.0, 3.0], None).sqrt();
        assert!(float_cmp::approx_eq!(f64, sds[0], expected, epsilon = 1e-12));
    }

    #[test]
    fn extrema() {
        let data = data();
        assert_eq!(feature_min(&data), Some(vec![1.0, 10.0]));
        assert_eq!(feature_max(&data), Some(vec![3.0, 30.0]));

        let empty: Vec<Vec<f64>> = vec![];
        assert_eq!(feature_min(&empty), None);
        assert_eq!(feature_max(&empty), None);
    }

    #[test]
    fn ragged_dimensionality_is_an_error() {
        let ragged = vec![vec![1.0_f64, 2.0], vec![3.0]];
        assert!(uniform_dimensionality(&ragged).is_err());
        assert_eq!(uniform_dimensionality(&data()), Ok(2));
    }
}
