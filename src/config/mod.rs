//! Configuration for solver construction.

pub mod options;
pub use options::SolverOptions;
