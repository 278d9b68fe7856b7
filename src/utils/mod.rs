//! Shared solver utilities.

pub mod convergence;
pub use convergence::{Convergence, Monitor, SolveStats, StopCriteria, StopReason};
