//! relaxa: classical iterative solvers for dense linear systems over Faer
//!
//! Stationary splitting methods (Jacobi, Gauss–Seidel, SOR) in elementwise and matrix form,
//! preconditioned Richardson and steepest descent, and preconditioned conjugate gradient.
//! Every solver returns its full increment / residual history, whether or not it converged.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod matrix;
pub mod preconditioner;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use crate::config::*;
pub use crate::context::*;
pub use crate::core::*;
pub use crate::error::*;
pub use crate::matrix::*;
pub use crate::preconditioner::*;
pub use crate::solver::*;
pub use crate::utils::*;
