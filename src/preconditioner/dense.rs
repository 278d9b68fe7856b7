//! General dense preconditioner `P`, applied through faer's full-pivoting LU.
//!
//! `P` is factorized once at construction, so every `apply` is a pair of triangular
//! solves. A singular `P` leaves a zero pivot in the factors; the solve then produces
//! non-finite entries, reported as [`IterError::SingularIterationMatrix`] at the first
//! `apply`.

use crate::error::IterError;
use crate::matrix::dense::check_square;
use crate::preconditioner::Preconditioner;
use faer::linalg::solvers::{FullPivLu, SolveCore};
use faer::traits::{ComplexField, RealField};
use faer::{Conj, Mat, MatMut};
use num_traits::Float;
use std::fmt;

/// Dense preconditioner holding the cached LU factorization of `P`.
pub struct DensePreconditioner<T> {
    n: usize,
    factor: FullPivLu<T>,
}

impl<T: ComplexField + RealField + Float> DensePreconditioner<T> {
    /// Factorizes `p`. Fails if `p` is not square.
    pub fn new(p: &Mat<T>) -> Result<Self, IterError> {
        let n = check_square(p)?;
        let factor = FullPivLu::new(p.as_ref());
        Ok(Self { n, factor })
    }

    /// Order of `P`.
    pub fn n(&self) -> usize {
        self.n
    }
}

impl<T> fmt::Debug for DensePreconditioner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DensePreconditioner").field("n", &self.n).finish_non_exhaustive()
    }
}

impl<T: ComplexField + RealField + Float> Preconditioner<Mat<T>, Vec<T>> for DensePreconditioner<T> {
    fn setup(&mut self, a: &Mat<T>) -> Result<(), IterError> {
        let n = check_square(a)?;
        if n != self.n {
            return Err(IterError::DimensionMismatch {
                what: "preconditioner order",
                expected: n,
                found: self.n,
            });
        }
        Ok(())
    }

    fn apply(&self, r: &Vec<T>, z: &mut Vec<T>) -> Result<(), IterError> {
        let n = self.n;
        if r.len() != n || z.len() != n {
            return Err(IterError::DimensionMismatch {
                what: "preconditioner order",
                expected: r.len(),
                found: n,
            });
        }
        z.copy_from_slice(r);
        let z_mat = MatMut::from_column_major_slice_mut(z.as_mut_slice(), n, 1);
        self.factor.solve_in_place_with_conj(Conj::No, z_mat);
        if let Some(i) = z.iter().position(|&zi| !Float::is_finite(zi)) {
            return Err(IterError::SingularIterationMatrix(i));
        }
        Ok(())
    }
}
