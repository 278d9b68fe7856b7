//! Solver options with the classical defaults.
//!
//! Every parameter a caller may leave out is resolved here once, into plain values,
//! before a solve starts: `tol = 1e-6`, `max_iters = 100`, `ω = 1`, `α = 1`, elementwise
//! sweeps for the stationary methods.

use crate::solver::Strategy;
use num_traits::Float;

/// Tolerance, budget and method parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions<T> {
    /// Stopping tolerance applied to increments (and residual ratios where used).
    pub tol: T,
    /// Iteration budget.
    pub max_iters: usize,
    /// SOR relaxation factor ω. Ignored by the other methods.
    pub omega: T,
    /// Richardson step α. Ignored by the other methods.
    pub alpha: T,
    /// Sweep strategy of the stationary methods.
    pub strategy: Strategy,
    /// Let PCG stop on the residual ratio as well as on the increment.
    pub pcg_residual_stop: bool,
}

impl<T: Float> Default for SolverOptions<T> {
    fn default() -> Self {
        Self {
            tol: T::from(1e-6).unwrap_or_else(T::epsilon),
            max_iters: 100,
            omega: T::one(),
            alpha: T::one(),
            strategy: Strategy::Elementwise,
            pcg_residual_stop: false,
        }
    }
}

impl<T: Float> SolverOptions<T> {
    pub fn with_tol(mut self, tol: T) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_omega(mut self, omega: T) -> Self {
        self.omega = omega;
        self
    }

    pub fn with_alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_pcg_residual_stop(mut self, flag: bool) -> Self {
        self.pcg_residual_stop = flag;
        self
    }
}
