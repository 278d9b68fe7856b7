//! Preconditioned Conjugate Gradient (PCG) per Saad §9.2, in the textbook form that keeps
//! the A-conjugation coefficient explicit:
//!
//! ```text
//! p_0 = z_0 = P⁻¹ r_0
//! α = (p · r) / (p · A p)
//! x ← x + α p
//! r ← r − α A p
//! z ← P⁻¹ r
//! β = (z · A p) / (p · A p)
//! p ← z − β p
//! ```
//!
//! `P` must be SPD for the recurrence to be valid; this is not checked. There is no restart
//! or reorthogonalization, so directions slowly lose exact A-conjugacy in floating point.
//! Only the increment criterion stops the iteration early; the residual ratios are recorded
//! for inspection.

use crate::core::traits::{InnerProduct, MatVec};
use crate::core::wrappers::residual;
use crate::error::IterError;
use crate::matrix::dense::check_system;
use crate::preconditioner::{Preconditioner, apply_or_identity};
use crate::solver::LinearSolver;
use crate::utils::convergence::{Convergence, Monitor, SolveStats, StopCriteria, StopReason};
use faer::Mat;
use num_traits::Float;
use tracing::debug;

pub struct PcgSolver<T> {
    pub conv: Convergence<T>,
}

impl<T: Float> PcgSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence::new(tol, max_iters, StopCriteria::INCREMENT) }
    }

    /// Also stop once `‖r_k‖ / ‖r_0‖ < tol`.
    pub fn with_residual_stop(mut self, flag: bool) -> Self {
        self.conv.criteria.set(StopCriteria::RESIDUAL, flag);
        self
    }
}

impl<T: Float> LinearSolver<Mat<T>, Vec<T>> for PcgSolver<T> {
    type Error = IterError;
    type Scalar = T;

    fn solve(
        &mut self,
        a: &Mat<T>,
        pc: Option<&dyn Preconditioner<Mat<T>, Vec<T>>>,
        b: &Vec<T>,
        x: &mut Vec<T>,
    ) -> Result<SolveStats<T>, IterError> {
        let n = check_system(a, b, x)?;
        let ip = ();
        let mut monitor = Monitor::with_residuals("pcg", self.conv);

        let mut r = residual(a, b, x);
        let r0_norm = ip.norm(&r);
        if r0_norm == T::zero() {
            debug!("pcg: initial guess solves the system");
            return Ok(monitor.finish(StopReason::Residual));
        }
        let mut z = vec![T::zero(); n];
        apply_or_identity(pc, &r, &mut z)?;
        let mut p = z.clone();
        let mut ap = vec![T::zero(); n];

        let reason = loop {
            if !monitor.has_budget() {
                break StopReason::MaxIterations;
            }
            a.matvec(&p, &mut ap);
            let p_dot_ap = ip.dot(&p, &ap);
            // A vanished direction (p = 0) leaves x unchanged and ends on the increment test.
            let alpha = if p_dot_ap == T::zero() { T::zero() } else { ip.dot(&p, &r) / p_dot_ap };
            let mut step_sq = T::zero();
            for (xj, &pj) in x.iter_mut().zip(&p) {
                let dx = alpha * pj;
                *xj = *xj + dx;
                step_sq = step_sq + dx * dx;
            }
            for (rj, &apj) in r.iter_mut().zip(&ap) {
                *rj = *rj - alpha * apj;
            }
            apply_or_identity(pc, &r, &mut z)?;
            let beta = if p_dot_ap == T::zero() { T::zero() } else { ip.dot(&z, &ap) / p_dot_ap };
            for (pj, &zj) in p.iter_mut().zip(&z) {
                *pj = zj - beta * *pj;
            }
            monitor.record_residual(ip.norm(&r) / r0_norm);
            monitor.record_increment(step_sq.sqrt());
            if let Some(reason) = monitor.check() {
                break reason;
            }
        };
        Ok(monitor.finish(reason))
    }
}
