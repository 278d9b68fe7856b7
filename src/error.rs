use thiserror::Error;

// Unified error type for relaxa

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IterError {
    #[error("dimension mismatch: {what} (expected {expected}, found {found})")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("zero pivot at row {0}")]
    ZeroPivot(usize),
    #[error("singular diagonal: entry ({0}, {0}) is zero")]
    SingularDiagonal(usize),
    #[error("singular iteration matrix: zero pivot at row {0}")]
    SingularIterationMatrix(usize),
}
