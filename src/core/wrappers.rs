//! Wrappers for faer dense matrix types and vector operations.
//!
//! This module implements the core traits for `faer::Mat`, `faer::MatRef` and `Vec<T>`
//! so that the solvers can stay generic over the dense storage they receive.
//!
//! All reductions are sequential and accumulate left to right, so two calls with identical
//! inputs produce bit-identical results.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)
//! - [num-traits crate documentation](https://docs.rs/num-traits)

use crate::core::traits::{InnerProduct, MatVec};
use faer::{Mat, MatRef};
use num_traits::Float;

/// Implements matrix-vector multiplication for `faer::Mat`.
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are vectors.
impl<T: Float> MatVec<Vec<T>> for Mat<T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        self.as_ref().matvec(x, y);
    }
}

/// Implements matrix-vector multiplication for a matrix reference (`faer::MatRef`).
impl<'a, T: Float> MatVec<Vec<T>> for MatRef<'a, T> {
    fn matvec(&self, x: &Vec<T>, y: &mut Vec<T>) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            let mut acc = T::zero();
            for j in 0..self.ncols() {
                acc = acc + self[(i, j)] * x[j];
            }
            y[i] = acc;
        }
    }
}

/// Inner product and Euclidean norm for plain vectors.
impl<T: Float> InnerProduct<Vec<T>> for () {
    type Scalar = T;
    /// Computes the dot product of two vectors: `x^T y`.
    fn dot(&self, x: &Vec<T>, y: &Vec<T>) -> T {
        assert_eq!(x.len(), y.len(), "Vectors must have the same length");
        x.iter()
            .zip(y.iter())
            .fold(T::zero(), |acc, (&xi, &yi)| acc + xi * yi)
    }
    /// Computes the Euclidean norm of a vector: `||x||_2`.
    fn norm(&self, x: &Vec<T>) -> T {
        x.iter().fold(T::zero(), |acc, &xi| acc + xi * xi).sqrt()
    }
}

/// Euclidean distance `‖x − y‖₂` between two iterates.
pub fn distance<T: Float>(x: &[T], y: &[T]) -> T {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    x.iter()
        .zip(y)
        .fold(T::zero(), |acc, (&xi, &yi)| {
            let d = xi - yi;
            acc + d * d
        })
        .sqrt()
}

/// Residual `r = b − A x`.
pub fn residual<M, T>(a: &M, b: &[T], x: &[T]) -> Vec<T>
where
    M: MatVec<Vec<T>>,
    T: Float,
{
    let mut ax = vec![T::zero(); b.len()];
    a.matvec(&x.to_vec(), &mut ax);
    b.iter().zip(ax).map(|(&bi, axi)| bi - axi).collect()
}

