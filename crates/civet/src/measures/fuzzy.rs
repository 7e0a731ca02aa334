//! Reductions over fuzzy membership matrices.

use distances::{number::Float, Number};

use crate::core::partition::{Membership, Partition};

/// The partition entropy of a fuzzy membership matrix:
/// `-(1/n) * sum u * ln(u)`, with `0 * ln(0)` taken as zero.
///
/// Lower means crisper memberships. Sentinel `T::ZERO` when the matrix has
/// no columns.
pub fn partition_entropy<T: Float>(membership: &Membership<T>) -> T {
    let n = membership.cardinality();
    if n == 0 {
        return T::ZERO;
    }

    let total = membership
        .rows()
        .flat_map(|row| row.iter())
        .filter(|&&u| u > T::ZERO)
        .map(|&u| {
            let u = u.as_f64();
            u * u.ln()
        })
        .sum::<f64>();
    T::from(-total / n.as_f64())
}

/// The partition coefficient of a fuzzy membership matrix:
/// `(1/n) * sum u^2`.
///
/// Higher means crisper memberships, reaching 1 for a crisp partition.
/// Sentinel `T::ZERO` when the matrix has no columns.
pub fn partition_coefficient<T: Float>(membership: &Membership<T>) -> T {
    let n = membership.cardinality();
    if n == 0 {
        return T::ZERO;
    }

    let total = membership
        .rows()
        .flat_map(|row| row.iter())
        .map(|&u| u.powi(2))
        .sum::<T>();
    total / T::from(n)
}
