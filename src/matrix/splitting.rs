//! Diagonal / lower / upper splitting `A = D − E − F` and the fixed-point
//! operators of the stationary methods.
//!
//! - Jacobi: `B = D⁻¹(D − A)`, `g = D⁻¹ b`
//! - SOR(ω): `B = (D − ωE)⁻¹((1 − ω)D + ωF)`, `g = ω (D − ωE)⁻¹ b`
//!
//! The SOR operator equals `(I − ωD⁻¹E)⁻¹((1 − ω)I + ωD⁻¹F)`; it is formed column by column
//! with forward substitution on `D − ωE`. Gauss–Seidel is SOR with `ω = 1`.

use crate::error::IterError;
use crate::matrix::dense::{check_len, check_square, from_raw};
use faer::Mat;
use num_traits::Float;

/// Unique splitting `A = D − E − F`.
///
/// `lower` holds `E` (the negated strict lower part of `A`), `upper` holds `F`
/// (the negated strict upper part).
#[derive(Debug, Clone)]
pub struct Splitting<T> {
    pub diag: Vec<T>,
    pub lower: Mat<T>,
    pub upper: Mat<T>,
}

/// Fixed-point operator of a stationary method: `x_{k+1} = B x_k + g`.
#[derive(Debug, Clone)]
pub struct IterationOperator<T> {
    pub b: Mat<T>,
    pub g: Vec<T>,
}

impl<T: Float> Splitting<T> {
    /// Splits `a`. Fails on a non-square matrix or a zero diagonal entry.
    pub fn new(a: &Mat<T>) -> Result<Self, IterError> {
        let n = check_square(a)?;
        let mut diag = Vec::with_capacity(n);
        for i in 0..n {
            let aii = a[(i, i)];
            if aii == T::zero() {
                return Err(IterError::SingularDiagonal(i));
            }
            diag.push(aii);
        }
        let lower = Mat::from_fn(n, n, |i, j| if j < i { -a[(i, j)] } else { T::zero() });
        let upper = Mat::from_fn(n, n, |i, j| if j > i { -a[(i, j)] } else { T::zero() });
        Ok(Self { diag, lower, upper })
    }

    /// Order of the split matrix.
    pub fn n(&self) -> usize {
        self.diag.len()
    }

    /// Jacobi operator: `B = D⁻¹(E + F)`, `g = D⁻¹ b`.
    pub fn jacobi(&self, b: &[T]) -> Result<IterationOperator<T>, IterError> {
        let n = self.n();
        check_len("right-hand side length", b, n)?;
        let bmat = Mat::from_fn(n, n, |i, j| {
            (self.lower[(i, j)] + self.upper[(i, j)]) / self.diag[i]
        });
        let g = b.iter().zip(&self.diag).map(|(&bi, &di)| bi / di).collect();
        Ok(IterationOperator { b: bmat, g })
    }

    /// Gauss–Seidel operator, i.e. SOR with `ω = 1`.
    pub fn gauss_seidel(&self, b: &[T]) -> Result<IterationOperator<T>, IterError> {
        self.sor(T::one(), b)
    }

    /// SOR operator for relaxation `omega`. No bounds are enforced on `omega`.
    pub fn sor(&self, omega: T, b: &[T]) -> Result<IterationOperator<T>, IterError> {
        let n = self.n();
        check_len("right-hand side length", b, n)?;
        // D − ωE, lower triangular
        let l = Mat::from_fn(n, n, |i, j| {
            if i == j {
                self.diag[i]
            } else if j < i {
                -omega * self.lower[(i, j)]
            } else {
                T::zero()
            }
        });

        let one_minus = T::one() - omega;
        let mut data = Vec::with_capacity(n * n);
        let mut col = vec![T::zero(); n];
        for j in 0..n {
            // column j of (1 − ω)D + ωF
            for (i, c) in col.iter_mut().enumerate() {
                *c = if i == j {
                    one_minus * self.diag[i]
                } else if i < j {
                    omega * self.upper[(i, j)]
                } else {
                    T::zero()
                };
            }
            lower_triangular_solve(&l, &mut col)?;
            data.extend_from_slice(&col);
        }

        let mut g: Vec<T> = b.iter().map(|&bi| omega * bi).collect();
        lower_triangular_solve(&l, &mut g)?;
        Ok(IterationOperator { b: from_raw(n, n, &data), g })
    }
}

impl<T: Float> IterationOperator<T> {
    /// `out = B x + g`.
    pub fn apply(&self, x: &[T], out: &mut [T]) {
        for (i, o) in out.iter_mut().enumerate() {
            let mut acc = self.g[i];
            for (j, &xj) in x.iter().enumerate() {
                acc = acc + self.b[(i, j)] * xj;
            }
            *o = acc;
        }
    }
}

/// Solves `L y = rhs` in place by forward substitution, reading only the lower
/// triangle (diagonal included) of `l`.
///
/// A zero pivot or a non-finite entry of the solution is reported as
/// [`IterError::SingularIterationMatrix`].
pub fn lower_triangular_solve<T: Float>(l: &Mat<T>, rhs: &mut [T]) -> Result<(), IterError> {
    let n = check_square(l)?;
    check_len("triangular right-hand side length", rhs, n)?;
    for i in 0..n {
        let pivot = l[(i, i)];
        if pivot == T::zero() {
            return Err(IterError::SingularIterationMatrix(i));
        }
        let mut acc = rhs[i];
        for j in 0..i {
            acc = acc - l[(i, j)] * rhs[j];
        }
        let yi = acc / pivot;
        if !yi.is_finite() {
            return Err(IterError::SingularIterationMatrix(i));
        }
        rhs[i] = yi;
    }
    Ok(())
}
