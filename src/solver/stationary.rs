//! Stationary splitting methods: Jacobi, Gauss–Seidel and SOR.
//!
//! Each method is available in two interchangeable strategies that produce the same
//! iterates up to rounding:
//!
//! - [`Strategy::Elementwise`] sweeps the coordinates in order. Gauss–Seidel and SOR
//!   use the coordinates `< i` already updated in the current sweep, Jacobi only the
//!   previous iterate. SOR blends the Gauss–Seidel value with the old one:
//!   `x_new[i] = (1 − ω) x[i] + ω · gs_i`.
//! - [`Strategy::MatrixForm`] precomputes the fixed-point operator `(B, g)` from the
//!   splitting `A = D − E − F` and iterates `x_{k+1} = B x_k + g`.
//!
//! After every sweep the increment `‖x_{k+1} − x_k‖₂` is recorded; the iteration stops
//! as soon as it falls below `tol`, or after `max_iters` sweeps. The relaxation factor
//! is not validated: `0 < ω < 2` is the classical convergence range for SPD matrices,
//! anything else is at the caller's risk.

use crate::core::wrappers::distance;
use crate::error::IterError;
use crate::matrix::dense::check_system;
use crate::matrix::splitting::{IterationOperator, Splitting};
use crate::preconditioner::Preconditioner;
use crate::solver::LinearSolver;
use crate::utils::convergence::{Convergence, Monitor, SolveStats, StopCriteria, StopReason};
use faer::Mat;
use num_traits::Float;
use tracing::debug;

/// Which stationary method to run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method<T> {
    Jacobi,
    GaussSeidel,
    /// Successive over-relaxation with factor `omega`.
    Sor { omega: T },
}

impl<T: Float> Method<T> {
    /// Relaxation factor; 1 for Jacobi and Gauss–Seidel.
    pub fn omega(&self) -> T {
        match *self {
            Method::Sor { omega } => omega,
            _ => T::one(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Method::Jacobi => "jacobi",
            Method::GaussSeidel => "gauss-seidel",
            Method::Sor { .. } => "sor",
        }
    }
}

/// How a sweep is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Coordinate-by-coordinate update straight from the entries of `A`.
    #[default]
    Elementwise,
    /// `x_{k+1} = B x_k + g` with the precomputed iteration operator.
    MatrixForm,
}

pub struct StationarySolver<T> {
    pub conv: Convergence<T>,
    pub method: Method<T>,
    pub strategy: Strategy,
}

impl<T: Float> StationarySolver<T> {
    pub fn new(method: Method<T>, tol: T, max_iters: usize) -> Self {
        Self {
            conv: Convergence::new(tol, max_iters, StopCriteria::INCREMENT),
            method,
            strategy: Strategy::default(),
        }
    }

    pub fn jacobi(tol: T, max_iters: usize) -> Self {
        Self::new(Method::Jacobi, tol, max_iters)
    }

    pub fn gauss_seidel(tol: T, max_iters: usize) -> Self {
        Self::new(Method::GaussSeidel, tol, max_iters)
    }

    pub fn sor(omega: T, tol: T, max_iters: usize) -> Self {
        Self::new(Method::Sor { omega }, tol, max_iters)
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Resolved per-call sweep kernel.
enum Sweep<'a, T> {
    Elementwise { a: &'a Mat<T>, b: &'a [T] },
    Operator(IterationOperator<T>),
}

impl<'a, T: Float> Sweep<'a, T> {
    fn build(
        method: Method<T>,
        strategy: Strategy,
        a: &'a Mat<T>,
        b: &'a [T],
    ) -> Result<Self, IterError> {
        match strategy {
            Strategy::Elementwise => {
                if let Some(i) = (0..a.nrows()).find(|&i| a[(i, i)] == T::zero()) {
                    return Err(IterError::ZeroPivot(i));
                }
                Ok(Sweep::Elementwise { a, b })
            }
            Strategy::MatrixForm => {
                let split = Splitting::new(a)?;
                let op = match method {
                    Method::Jacobi => split.jacobi(b)?,
                    Method::GaussSeidel => split.gauss_seidel(b)?,
                    Method::Sor { omega } => split.sor(omega, b)?,
                };
                Ok(Sweep::Operator(op))
            }
        }
    }

    fn run(&self, method: Method<T>, x: &[T], x_new: &mut [T]) {
        match self {
            Sweep::Operator(op) => op.apply(x, x_new),
            Sweep::Elementwise { a, b } => {
                let n = x.len();
                let omega = method.omega();
                for i in 0..n {
                    let mut sigma = b[i];
                    for j in 0..i {
                        let xj = if method == Method::Jacobi { x[j] } else { x_new[j] };
                        sigma = sigma - a[(i, j)] * xj;
                    }
                    for j in (i + 1)..n {
                        sigma = sigma - a[(i, j)] * x[j];
                    }
                    let gs = sigma / a[(i, i)];
                    x_new[i] = match method {
                        Method::Sor { .. } => (T::one() - omega) * x[i] + omega * gs,
                        _ => gs,
                    };
                }
            }
        }
    }
}

impl<T: Float> LinearSolver<Mat<T>, Vec<T>> for StationarySolver<T> {
    type Error = IterError;
    type Scalar = T;

    fn solve(
        &mut self,
        a: &Mat<T>,
        pc: Option<&dyn Preconditioner<Mat<T>, Vec<T>>>,
        b: &Vec<T>,
        x: &mut Vec<T>,
    ) -> Result<SolveStats<T>, IterError> {
        let _ = pc; // splitting methods are not preconditioned
        let n = check_system(a, b, x)?;
        let sweep = Sweep::build(self.method, self.strategy, a, b)?;
        debug!(method = self.method.name(), strategy = ?self.strategy, n, "stationary solve");

        let mut monitor = Monitor::new(self.method.name(), self.conv);
        let mut cur = x.clone();
        let mut next = vec![T::zero(); n];
        let reason = loop {
            if !monitor.has_budget() {
                break StopReason::MaxIterations;
            }
            sweep.run(self.method, &cur, &mut next);
            monitor.record_increment(distance(&next, &cur));
            std::mem::swap(&mut cur, &mut next);
            if let Some(reason) = monitor.check() {
                break reason;
            }
        };
        *x = cur;
        Ok(monitor.finish(reason))
    }
}
