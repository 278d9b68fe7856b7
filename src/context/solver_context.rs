//! Factory for the iterative solvers.
//!
//! `SolverContext` holds a solver kind, resolved options and an optional preconditioner,
//! and runs one solve per call. Absent inputs are resolved into concrete values at the
//! start of each call: no preconditioner means the identity, no initial guess means the
//! zero vector.
//!
//! # Usage
//!
//! 1. Construct a `SolverContext` with the desired kind, then adjust options or attach a
//!    preconditioner.
//! 2. Call `solve` with `A`, `b` and an optional initial guess.

use crate::config::SolverOptions;
use crate::error::IterError;
use crate::matrix::dense::{check_len, check_square};
use crate::preconditioner::Preconditioner;
use crate::solver::{
    GradientSolver, LinearSolver, Method, PcgSolver, RichardsonSolver, StationarySolver,
};
use crate::utils::convergence::SolveStats;
use faer::Mat;
use num_traits::Float;

/// Enum representing the available solver types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    /// Jacobi splitting
    Jacobi,
    /// Gauss–Seidel splitting
    GaussSeidel,
    /// Successive over-relaxation, factor from `SolverOptions::omega`
    Sor,
    /// Preconditioned Richardson, step from `SolverOptions::alpha`
    Richardson,
    /// Preconditioned steepest descent
    Gradient,
    /// Preconditioned conjugate gradient
    Pcg,
}

impl SolverKind {
    /// True for the splitting methods, which take no preconditioner.
    pub fn is_stationary(self) -> bool {
        matches!(self, SolverKind::Jacobi | SolverKind::GaussSeidel | SolverKind::Sor)
    }
}

/// Final iterate of a solve with its history.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T> {
    pub x: Vec<T>,
    pub stats: SolveStats<T>,
}

impl<T> Solution<T> {
    /// Iterations performed; equal to `max_iters` when the budget ran out.
    pub fn niter(&self) -> usize {
        self.stats.iterations
    }
}

/// Context and configuration for one kind of solver.
pub struct SolverContext<T> {
    /// The type of solver to use
    pub kind: SolverKind,
    /// Tolerance, budget and method parameters
    pub options: SolverOptions<T>,
    /// Optional preconditioner (identity when absent)
    pub pc: Option<Box<dyn Preconditioner<Mat<T>, Vec<T>>>>,
}

impl<T: Float + 'static> SolverContext<T> {
    pub fn new(kind: SolverKind) -> Self {
        Self { kind, options: SolverOptions::default(), pc: None }
    }

    pub fn with_options(mut self, options: SolverOptions<T>) -> Self {
        self.options = options;
        self
    }

    pub fn with_preconditioner<P>(mut self, pc: P) -> Self
    where
        P: Preconditioner<Mat<T>, Vec<T>> + 'static,
    {
        self.pc = Some(Box::new(pc));
        self
    }

    /// Solve `Ax = b` starting from `x0` (zero vector when `None`).
    ///
    /// The preconditioner, if any, is set up against `a` before iterating.
    pub fn solve(&mut self, a: &Mat<T>, b: &[T], x0: Option<&[T]>) -> Result<Solution<T>, IterError> {
        let n = check_square(a)?;
        let mut x = match x0 {
            Some(x0) => {
                check_len("initial guess length", x0, n)?;
                x0.to_vec()
            }
            None => vec![T::zero(); n],
        };
        let b = b.to_vec();
        let opts = self.options;

        if !self.kind.is_stationary() {
            if let Some(pc) = self.pc.as_mut() {
                pc.setup(a)?;
            }
        }
        let pc = self.pc.as_deref();

        let stats = match self.kind {
            SolverKind::Jacobi => self.stationary(Method::Jacobi).solve(a, None, &b, &mut x)?,
            SolverKind::GaussSeidel => {
                self.stationary(Method::GaussSeidel).solve(a, None, &b, &mut x)?
            }
            SolverKind::Sor => self
                .stationary(Method::Sor { omega: opts.omega })
                .solve(a, None, &b, &mut x)?,
            SolverKind::Richardson => RichardsonSolver::new(opts.tol, opts.max_iters)
                .with_alpha(opts.alpha)
                .solve(a, pc, &b, &mut x)?,
            SolverKind::Gradient => {
                GradientSolver::new(opts.tol, opts.max_iters).solve(a, pc, &b, &mut x)?
            }
            SolverKind::Pcg => PcgSolver::new(opts.tol, opts.max_iters)
                .with_residual_stop(opts.pcg_residual_stop)
                .solve(a, pc, &b, &mut x)?,
        };
        Ok(Solution { x, stats })
    }

    fn stationary(&self, method: Method<T>) -> StationarySolver<T> {
        StationarySolver::new(method, self.options.tol, self.options.max_iters)
            .with_strategy(self.options.strategy)
    }
}
