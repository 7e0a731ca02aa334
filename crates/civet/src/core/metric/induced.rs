//! A distance metric induced by a positive-definite weight matrix.

use distances::number::Float;

use crate::utils::FloatExt;

use super::{Metric, ParMetric};

/// A distance induced by a square weight matrix `W`:
/// `d(a, b) = sqrt((a - b)^T W (a - b))`.
///
/// With `W` the inverse of a covariance matrix this is the Mahalanobis
/// distance; with a diagonal `W` it is a per-dimension weighted Euclidean
/// distance; with the identity it degenerates to `Euclidean`.
///
/// The metric laws reported by this type assume `W` is positive-definite.
/// That assumption is the caller's responsibility; it is not checked beyond
/// the shape of the matrix.
pub struct Induced<T: Float> {
    /// The weight matrix, row-major, square.
    weights: Vec<Vec<T>>,
}

impl<T: Float> Induced<T> {
    /// Creates a new `Induced` metric from a square weight matrix.
    ///
    /// # Errors
    ///
    /// * If the weight matrix is empty.
    /// * If the weight matrix is not square.
    pub fn new(weights: Vec<Vec<T>>) -> Result<Self, String> {
        if weights.is_empty() {
            Err("The weight matrix is empty.".to_string())
        } else if weights.iter().any(|row| row.len() != weights.len()) {
            Err(format!(
                "The weight matrix is not square: {} rows.",
                weights.len()
            ))
        } else {
            Ok(Self { weights })
        }
    }

    /// Creates a per-dimension weighted Euclidean metric from diagonal
    /// weights.
    ///
    /// # Errors
    ///
    /// * If `diagonal` is empty.
    pub fn diagonal(diagonal: &[T]) -> Result<Self, String> {
        if diagonal.is_empty() {
            return Err("The diagonal weights are empty.".to_string());
        }
        let d = diagonal.len();
        let mut weights = vec![vec![T::ZERO; d]; d];
        for (i, &w) in diagonal.iter().enumerate() {
            weights[i][i] = w;
        }
        Ok(Self { weights })
    }

    /// Creates the Mahalanobis metric from a covariance matrix by inverting
    /// it with Gauss-Jordan elimination.
    ///
    /// # Errors
    ///
    /// * If the covariance matrix is empty or not square.
    /// * If the covariance matrix is singular, e.g. when some dimension has
    ///   zero variance. This is an unrecoverable numerical failure, not a
    ///   degenerate score.
    pub fn mahalanobis(covariance: Vec<Vec<T>>) -> Result<Self, String> {
        let inverse = invert(covariance)?;
        Self::new(inverse)
    }

    /// The dimensionality of items this metric accepts.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.weights.len()
    }
}

/// Invert a square matrix with Gauss-Jordan elimination and partial pivoting.
fn invert<T: Float>(matrix: Vec<Vec<T>>) -> Result<Vec<Vec<T>>, String> {
    let d = matrix.len();
    if d == 0 {
        return Err("The covariance matrix is empty.".to_string());
    }
    if matrix.iter().any(|row| row.len() != d) {
        return Err(format!("The covariance matrix is not square: {d} rows."));
    }

    let mut a = matrix;
    let mut inv = vec![vec![T::ZERO; d]; d];
    for (i, row) in inv.iter_mut().enumerate() {
        row[i] = T::ONE;
    }

    for col in 0..d {
        let pivot_row = (col..d)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() <= T::EPSILON {
            return Err(format!("The covariance matrix is singular at column {col}."));
        }
        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = a[col][col];
        for j in 0..d {
            a[col][j] /= pivot;
            inv[col][j] /= pivot;
        }

        for i in 0..d {
            if i == col {
                continue;
            }
            let factor = a[i][col];
            for j in 0..d {
                let a_cj = a[col][j];
                a[i][j] -= factor * a_cj;
                let inv_cj = inv[col][j];
                inv[i][j] -= factor * inv_cj;
            }
        }
    }

    Ok(inv)
}

impl<I: AsRef<[T]>, T: Float> Metric<I, T> for Induced<T> {
    fn distance(&self, a: &I, b: &I) -> T {
        let (a, b) = (a.as_ref(), b.as_ref());
        let diff = a.iter().zip(b).map(|(&x, &y)| x - y).collect::<Vec<_>>();
        let form = self
            .weights
            .iter()
            .zip(&diff)
            .map(|(row, &di)| di * crate::core::linalg::dot(row, &diff))
            .sum::<T>();
        // Round-off can push a tiny positive form below zero.
        if form < T::ZERO {
            T::ZERO
        } else {
            form.sqrt()
        }
    }

    fn name(&self) -> &str {
        "induced"
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
        // Quadratic in the dimensionality of the items.
        true
    }
}

impl<I: AsRef<[T]> + Send + Sync, T: Float> ParMetric<I, T> for Induced<T> {}
