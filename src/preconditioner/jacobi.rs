// Jacobi preconditioner implementation

use crate::error::IterError;
use crate::matrix::dense::check_square;
use crate::preconditioner::Preconditioner;
use faer::Mat;
use num_traits::Float;

/// Jacobi preconditioner: P = D = diag(A), so z = D⁻¹ r.
#[derive(Debug, Clone)]
pub struct Jacobi<T> {
    pub(crate) inv_diag: Vec<T>,
}

impl<T: Float> Jacobi<T> {
    /// new with empty state; user must call `setup`.
    pub fn new() -> Self {
        Self { inv_diag: Vec::new() }
    }

    /// Builds the preconditioner from `a` in one step.
    pub fn from_matrix(a: &Mat<T>) -> Result<Self, IterError> {
        let mut pc = Self::new();
        Preconditioner::<Mat<T>, Vec<T>>::setup(&mut pc, a)?;
        Ok(pc)
    }
}

impl<T: Float> Default for Jacobi<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Preconditioner<Mat<T>, Vec<T>> for Jacobi<T> {
    fn setup(&mut self, a: &Mat<T>) -> Result<(), IterError> {
        let n = check_square(a)?;
        let mut inv_diag = Vec::with_capacity(n);
        for i in 0..n {
            let aii = a[(i, i)];
            if aii == T::zero() {
                return Err(IterError::ZeroPivot(i));
            }
            inv_diag.push(T::one() / aii);
        }
        self.inv_diag = inv_diag;
        Ok(())
    }

    fn apply(&self, r: &Vec<T>, z: &mut Vec<T>) -> Result<(), IterError> {
        let n = self.inv_diag.len();
        if r.len() != n || z.len() != n {
            return Err(IterError::DimensionMismatch {
                what: "Jacobi preconditioner size",
                expected: n,
                found: if r.len() != n { r.len() } else { z.len() },
            });
        }
        for ((zi, &ri), &di) in z.iter_mut().zip(r).zip(&self.inv_diag) {
            *zi = di * ri;
        }
        Ok(())
    }
}
