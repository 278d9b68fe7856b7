//! Iterative solver interfaces.
//!
//! Every solver reads the initial guess from `x`, overwrites it with the final iterate
//! and returns the complete iteration history, converged or not.

use crate::preconditioner::Preconditioner;
use crate::utils::convergence::SolveStats;

/// Common interface for the iterative solvers.
pub trait LinearSolver<M, V> {
    type Error;
    type Scalar: Copy + PartialOrd;
    /// Solve A·x = b, writing result into `x`.
    /// `pc == None` stands for the identity preconditioner; solvers that do not
    /// precondition ignore it.
    fn solve(
        &mut self,
        a: &M,
        pc: Option<&dyn Preconditioner<M, V>>,
        b: &V,
        x: &mut V,
    ) -> Result<SolveStats<Self::Scalar>, Self::Error>;
}

pub mod stationary;
pub use stationary::{Method, StationarySolver, Strategy};

pub mod richardson;
pub use richardson::{GradientSolver, RichardsonSolver};

pub mod pcg;
pub use pcg::PcgSolver;
