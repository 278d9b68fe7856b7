//! Convergence tracking & stopping rules shared by every solver.
//!
//! Each solve owns one [`Monitor`]. The solver records the increment norm
//! `‖x_{k+1} − x_k‖` after every iteration and, for the residual-based methods, the
//! ratio `‖r_k‖ / ‖r_0‖`. The monitor decides when to stop and finally produces the
//! [`SolveStats`] handed back to the caller.
//!
//! Running out of iterations is not an error: the stats carry `converged == false`
//! together with the full history, and a `warn` event is emitted.

use bitflags::bitflags;
use num_traits::Float;
use tracing::{debug, trace, warn};

bitflags! {
    /// Which histories may end the iteration early.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct StopCriteria: u32 {
        /// Stop once `inc_k < tol`.
        const INCREMENT = 0b01;
        /// Stop once `res_k < tol`.
        const RESIDUAL  = 0b10;
        const EITHER    = Self::INCREMENT.bits() | Self::RESIDUAL.bits();
    }
}

/// Stopping criteria.
#[derive(Clone, Copy, Debug)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
    pub criteria: StopCriteria,
}

impl<T: Float> Convergence<T> {
    pub fn new(tol: T, max_iters: usize, criteria: StopCriteria) -> Self {
        Self { tol, max_iters, criteria }
    }
}

/// Why an iteration ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The last increment dropped below the tolerance.
    Increment,
    /// The last residual ratio dropped below the tolerance.
    Residual,
    /// `max_iters` iterations were performed without meeting a criterion.
    MaxIterations,
}

/// Outcome of a solve: iteration count, status and the complete histories.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub converged: bool,
    pub reason: StopReason,
    /// `‖x_{k+1} − x_k‖` for every iteration performed.
    pub inc: Vec<T>,
    /// `‖r_k‖ / ‖r_0‖`, starting with `1`; empty for the stationary methods.
    pub res: Vec<T>,
}

impl<T: Copy> SolveStats<T> {
    pub fn final_increment(&self) -> Option<T> {
        self.inc.last().copied()
    }

    pub fn final_residual(&self) -> Option<T> {
        self.res.last().copied()
    }
}

/// Per-call iteration state.
pub struct Monitor<T> {
    method: &'static str,
    conv: Convergence<T>,
    inc: Vec<T>,
    res: Vec<T>,
}

impl<T: Float> Monitor<T> {
    /// Monitor without a residual history (stationary methods).
    pub fn new(method: &'static str, conv: Convergence<T>) -> Self {
        Self {
            method,
            conv,
            inc: Vec::with_capacity(conv.max_iters.min(256)),
            res: Vec::new(),
        }
    }

    /// Monitor whose residual history starts with `res_0 = 1`.
    pub fn with_residuals(method: &'static str, conv: Convergence<T>) -> Self {
        let mut m = Self::new(method, conv);
        m.res.reserve(conv.max_iters.min(256) + 1);
        m.res.push(T::one());
        m
    }

    /// Iterations performed so far.
    pub fn iterations(&self) -> usize {
        self.inc.len()
    }

    /// True while another iteration fits in the budget.
    pub fn has_budget(&self) -> bool {
        self.iterations() < self.conv.max_iters
    }

    pub fn record_increment(&mut self, inc: T) {
        self.inc.push(inc);
        trace!(
            method = self.method,
            iteration = self.inc.len(),
            increment = inc.to_f64().unwrap_or(f64::NAN),
            "increment recorded"
        );
    }

    pub fn record_residual(&mut self, ratio: T) {
        self.res.push(ratio);
        trace!(
            method = self.method,
            iteration = self.res.len() - 1,
            residual = ratio.to_f64().unwrap_or(f64::NAN),
            "residual recorded"
        );
    }

    /// Returns a reason to stop after the latest iteration, if any.
    ///
    /// The residual criterion is checked before the increment criterion; the budget
    /// only counts once neither has been met.
    pub fn check(&self) -> Option<StopReason> {
        let tol = self.conv.tol;
        if self.conv.criteria.contains(StopCriteria::RESIDUAL)
            && self.res.len() > 1
            && self.res.last().is_some_and(|&r| r < tol)
        {
            return Some(StopReason::Residual);
        }
        if self.conv.criteria.contains(StopCriteria::INCREMENT)
            && self.inc.last().is_some_and(|&d| d < tol)
        {
            return Some(StopReason::Increment);
        }
        if !self.has_budget() {
            return Some(StopReason::MaxIterations);
        }
        None
    }

    /// Consumes the monitor into the caller-facing stats.
    pub fn finish(self, reason: StopReason) -> SolveStats<T> {
        let iterations = self.iterations();
        let converged = reason != StopReason::MaxIterations;
        let final_increment = self
            .inc
            .last()
            .and_then(|v| v.to_f64())
            .unwrap_or(f64::NAN);
        if converged {
            debug!(method = self.method, iterations, final_increment, ?reason, "converged");
        } else {
            warn!(
                method = self.method,
                iterations,
                max_iters = self.conv.max_iters,
                final_increment,
                "iteration budget exhausted before convergence"
            );
        }
        SolveStats { iterations, converged, reason, inc: self.inc, res: self.res }
    }
}
