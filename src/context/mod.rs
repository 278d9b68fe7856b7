//! Context module: solver selection and per-call resolution of defaults.
//!
//! - [`solver_context`]: the `SolverContext` factory, `SolverKind` and `Solution`.
//!
//! # Example
//! ```rust
//! use relaxa::context::{SolverContext, SolverKind};
//! use relaxa::matrix::from_rows;
//!
//! let a = from_rows(&[&[4.0, 1.0], &[1.0, 3.0]]);
//! let sol = SolverContext::new(SolverKind::Pcg).solve(&a, &[1.0, 2.0], None).unwrap();
//! assert!(sol.stats.converged);
//! ```
//!
//! # References
//! - Saad, Y. (2003). Iterative Methods for Sparse Linear Systems. SIAM.
//! - Quarteroni, Sacco, Saleri. Numerical Mathematics. Springer.

pub mod solver_context;
pub use solver_context::{Solution, SolverContext, SolverKind};
