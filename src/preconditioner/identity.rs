use crate::error::IterError;
use crate::preconditioner::Preconditioner;

/// Identity preconditioner: z = r.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<M, T: Copy> Preconditioner<M, Vec<T>> for Identity {
    fn apply(&self, r: &Vec<T>, z: &mut Vec<T>) -> Result<(), IterError> {
        if z.len() != r.len() {
            return Err(IterError::DimensionMismatch {
                what: "preconditioner output length",
                expected: r.len(),
                found: z.len(),
            });
        }
        z.copy_from_slice(r);
        Ok(())
    }
}
