//! Preconditioned Richardson iteration and preconditioned steepest descent.
//!
//! Both iterate `x_{k+1} = x_k + α_k z_k` with `r_k = b − A x_k` and `z_k = P⁻¹ r_k`:
//!
//! - Richardson uses a fixed step `α` chosen by the caller (1 by default), and recomputes
//!   the true residual `b − A x_{k+1}` after every step.
//! - Steepest descent takes the exact line-search step
//!   `α_k = (r_k · z_k) / ((A z_k) · z_k)` and updates the residual by recurrence,
//!   `r_{k+1} = r_k − α_k A z_k`.
//!
//! Both record `res_k = ‖r_k‖ / ‖r_0‖` (with `res_0 = 1`) and `inc_k = ‖x_{k+1} − x_k‖`,
//! and stop when either drops below `tol`. Nothing checks that the pair `(A, P)` yields
//! a convergent iteration; divergence shows up in the returned history.

use crate::core::traits::{InnerProduct, MatVec};
use crate::core::wrappers::{distance, residual};
use crate::error::IterError;
use crate::matrix::dense::check_system;
use crate::preconditioner::{Preconditioner, apply_or_identity};
use crate::solver::LinearSolver;
use crate::utils::convergence::{Convergence, Monitor, SolveStats, StopCriteria, StopReason};
use faer::Mat;
use num_traits::Float;
use tracing::debug;

/// Step-length rule of a descent iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step<T> {
    Fixed(T),
    LineSearch,
}

/// Preconditioned Richardson iteration with a fixed relaxation step.
pub struct RichardsonSolver<T> {
    pub conv: Convergence<T>,
    pub alpha: T,
}

impl<T: Float> RichardsonSolver<T> {
    /// Richardson with `α = 1`.
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self {
            conv: Convergence::new(tol, max_iters, StopCriteria::EITHER),
            alpha: T::one(),
        }
    }

    pub fn with_alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Preconditioned steepest descent with exact line search.
pub struct GradientSolver<T> {
    pub conv: Convergence<T>,
}

impl<T: Float> GradientSolver<T> {
    pub fn new(tol: T, max_iters: usize) -> Self {
        Self { conv: Convergence::new(tol, max_iters, StopCriteria::EITHER) }
    }
}

impl<T: Float> LinearSolver<Mat<T>, Vec<T>> for RichardsonSolver<T> {
    type Error = IterError;
    type Scalar = T;

    fn solve(
        &mut self,
        a: &Mat<T>,
        pc: Option<&dyn Preconditioner<Mat<T>, Vec<T>>>,
        b: &Vec<T>,
        x: &mut Vec<T>,
    ) -> Result<SolveStats<T>, IterError> {
        descent("richardson", Step::Fixed(self.alpha), self.conv, a, pc, b, x)
    }
}

impl<T: Float> LinearSolver<Mat<T>, Vec<T>> for GradientSolver<T> {
    type Error = IterError;
    type Scalar = T;

    fn solve(
        &mut self,
        a: &Mat<T>,
        pc: Option<&dyn Preconditioner<Mat<T>, Vec<T>>>,
        b: &Vec<T>,
        x: &mut Vec<T>,
    ) -> Result<SolveStats<T>, IterError> {
        descent("gradient", Step::LineSearch, self.conv, a, pc, b, x)
    }
}

fn descent<T: Float>(
    method: &'static str,
    step: Step<T>,
    conv: Convergence<T>,
    a: &Mat<T>,
    pc: Option<&dyn Preconditioner<Mat<T>, Vec<T>>>,
    b: &Vec<T>,
    x: &mut Vec<T>,
) -> Result<SolveStats<T>, IterError> {
    let n = check_system(a, b, x)?;
    let ip = ();
    let mut monitor = Monitor::with_residuals(method, conv);

    let mut r = residual(a, b, x);
    let r0_norm = ip.norm(&r);
    if r0_norm == T::zero() {
        debug!(method, "initial guess solves the system");
        return Ok(monitor.finish(StopReason::Residual));
    }

    let mut z = vec![T::zero(); n];
    let mut az = vec![T::zero(); n];
    let mut x_new = vec![T::zero(); n];
    let reason = loop {
        if !monitor.has_budget() {
            break StopReason::MaxIterations;
        }
        apply_or_identity(pc, &r, &mut z)?;
        let alpha = match step {
            Step::Fixed(alpha) => alpha,
            Step::LineSearch => {
                a.matvec(&z, &mut az);
                let denom = ip.dot(&az, &z);
                // z = 0 only when r = 0
                if denom == T::zero() { T::zero() } else { ip.dot(&r, &z) / denom }
            }
        };
        for ((xn, &xi), &zi) in x_new.iter_mut().zip(x.iter()).zip(&z) {
            *xn = xi + alpha * zi;
        }
        match step {
            Step::Fixed(_) => r = residual(a, b, &x_new),
            Step::LineSearch => {
                for (ri, &azi) in r.iter_mut().zip(&az) {
                    *ri = *ri - alpha * azi;
                }
            }
        }
        monitor.record_residual(ip.norm(&r) / r0_norm);
        monitor.record_increment(distance(&x_new, x));
        std::mem::swap(x, &mut x_new);
        if let Some(reason) = monitor.check() {
            break reason;
        }
    };
    Ok(monitor.finish(reason))
}
