//! Matrix module: dense helpers and the diagonal/lower/upper splitting.

pub mod dense;
pub use dense::{banded_test_system, from_rows};
pub mod splitting;
pub use splitting::{IterationOperator, Splitting, lower_triangular_solve};
