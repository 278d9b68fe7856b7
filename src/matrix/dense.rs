//! Dense-matrix helpers on top of Faer.
//!
//! Dimension checks shared by every solver entry point, plus the banded test
//! family used throughout the course material.

use crate::error::IterError;
use faer::Mat;
use num_traits::Float;

/// Checks that `a` is square and returns its order.
pub fn check_square<T>(a: &Mat<T>) -> Result<usize, IterError> {
    if a.nrows() != a.ncols() {
        return Err(IterError::DimensionMismatch {
            what: "matrix is not square",
            expected: a.nrows(),
            found: a.ncols(),
        });
    }
    Ok(a.nrows())
}

/// Checks that a vector has the length `n` of the system.
pub fn check_len<T>(what: &'static str, v: &[T], n: usize) -> Result<(), IterError> {
    if v.len() != n {
        return Err(IterError::DimensionMismatch { what, expected: n, found: v.len() });
    }
    Ok(())
}

/// Validates a full system `(A, b, x)` and returns `n`.
pub fn check_system<T>(a: &Mat<T>, b: &[T], x: &[T]) -> Result<usize, IterError> {
    let n = check_square(a)?;
    check_len("right-hand side length", b, n)?;
    check_len("initial guess length", x, n)?;
    Ok(n)
}

/// Construct from raw column-major storage.
pub fn from_raw<T: Copy>(nrows: usize, ncols: usize, data: &[T]) -> Mat<T> {
    assert_eq!(data.len(), nrows * ncols, "storage length must be nrows * ncols");
    Mat::from_fn(nrows, ncols, |i, j| data[j * nrows + i])
}

/// Construct from a slice of rows; convenient for small literal systems.
pub fn from_rows<T: Copy>(rows: &[&[T]]) -> Mat<T> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, |r| r.len());
    assert!(rows.iter().all(|r| r.len() == ncols), "rows must have equal length");
    Mat::from_fn(nrows, ncols, |i, j| rows[i][j])
}

/// Banded test system of order `n`:
///
/// `A = I + ε (sub + super diagonal) + ε² (second sub + super diagonal)`, `b = A · 1`,
///
/// so the exact solution is the all-ones vector. Symmetric, and strictly diagonally
/// dominant while `2|ε| + 2ε² < 1`, i.e. `|ε| < 0.366`.
pub fn banded_test_system<T: Float>(n: usize, eps: T) -> (Mat<T>, Vec<T>) {
    let a = Mat::from_fn(n, n, |i, j| match i.abs_diff(j) {
        0 => T::one(),
        1 => eps,
        2 => eps * eps,
        _ => T::zero(),
    });
    let b = (0..n)
        .map(|i| (0..n).fold(T::zero(), |acc, j| acc + a[(i, j)]))
        .collect();
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_rectangular() {
        let a = Mat::from_fn(2, 3, |i, j| (i + j) as f64);
        let err = check_square(&a).unwrap_err();
        assert_eq!(
            err,
            IterError::DimensionMismatch { what: "matrix is not square", expected: 2, found: 3 }
        );
    }

    #[test]
    fn rejects_short_rhs() {
        let a = from_rows(&[&[1.0, 0.0], &[0.0, 1.0]]);
        assert!(matches!(
            check_system(&a, &[1.0], &[0.0, 0.0]),
            Err(IterError::DimensionMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn banded_system_has_unit_solution() {
        let (a, b) = banded_test_system(6, 0.1);
        assert_eq!(a[(0, 2)], 0.1 * 0.1);
        assert_eq!(a[(0, 3)], 0.0);
        assert_eq!(a[(3, 2)], 0.1);
        // row 0: 1 + eps + eps^2
        assert!((b[0] - 1.11).abs() < 1e-12);
        // interior row: 1 + 2 eps + 2 eps^2
        assert!((b[3] - 1.22).abs() < 1e-12);
    }

    #[test]
    fn from_raw_is_column_major() {
        let a = from_raw(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a[(1, 0)], 2.0);
        assert_eq!(a[(0, 1)], 3.0);
    }
}
