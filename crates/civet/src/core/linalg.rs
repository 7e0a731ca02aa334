//! Dense vector kernels used throughout the crate.

use distances::Number;

/// The dot product of two vectors.
///
/// Trailing elements of the longer vector are ignored, as in the
/// `distances` kernels.
pub fn dot<T: Number>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b).fold(T::ZERO, |acc, (&x, &y)| acc.mul_add(x, y))
}

/// `y <- alpha * x + y`, elementwise over the common prefix.
pub fn axpy<T: Number>(alpha: T, x: &[T], y: &mut [T]) {
    for (yi, &xi) in y.iter_mut().zip(x) {
        yi.mul_add_assign(alpha, xi);
    }
}

/// The componentwise sum `alpha * x + beta * y` as a new vector.
pub fn scaled_sum<T: Number>(alpha: T, x: &[T], beta: T, y: &[T]) -> Vec<T> {
    x.iter().zip(y).map(|(&xi, &yi)| alpha * xi + beta * yi).collect()
}

/// Copies `x` into `y` over the common prefix.
pub fn copy<T: Number>(x: &[T], y: &mut [T]) {
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi = xi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernels() {
        let a = [1.0_f64, 2.0, 3.0];
        let b = [4.0_f64, 5.0, 6.0];
        assert_eq!(dot(&a, &b), 32.0);

        let mut y = b;
        axpy(2.0, &a, &mut y);
        assert_eq!(y, [6.0, 9.0, 12.0]);

        assert_eq!(scaled_sum(2.0, &a, -1.0, &b), vec![-2.0, -1.0, 0.0]);

        let mut target = [0.0_f64; 3];
        copy(&a, &mut target);
        assert_eq!(target, a);
    }
}
