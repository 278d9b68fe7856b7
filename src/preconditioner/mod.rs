//! Preconditioners for the descent and conjugate-gradient solvers.
//!
//! A preconditioner is any operator that can solve `P z = r` exactly for a given `r`.
//! Richardson and steepest descent only need `P` to be invertible; PCG additionally
//! assumes `P` symmetric positive-definite. That assumption is the caller's obligation
//! and is never checked here.

use crate::error::IterError;

/// A preconditioner P ≈ A.
pub trait Preconditioner<M, V> {
    /// Solve P z = r, writing the result into `z`.
    fn apply(&self, r: &V, z: &mut V) -> Result<(), IterError>;
    /// Optionally: setup/validate against A
    fn setup(&mut self, _a: &M) -> Result<(), IterError> {
        Ok(())
    }
}

pub mod dense;
pub mod identity;
pub mod jacobi;

pub use dense::DensePreconditioner;
pub use identity::Identity;
pub use jacobi::Jacobi;

/// Applies `pc`, falling back to the identity when none is given.
pub(crate) fn apply_or_identity<M, T: Copy>(
    pc: Option<&dyn Preconditioner<M, Vec<T>>>,
    r: &Vec<T>,
    z: &mut Vec<T>,
) -> Result<(), IterError> {
    match pc {
        Some(pc) => pc.apply(r, z),
        None => {
            z.clone_from(r);
            Ok(())
        }
    }
}
