//! Solver result reporting.
//!
//! ## Purpose
//!
//! This module defines the convergence status and result summary shared by
//! the coordinate-descent driver and the active-shooting solvers.
//!
//! ## Design notes
//!
//! * **Non-convergence is not an error**: hitting the iteration cap is
//!   reported through [`ConvergenceStatus::MaxIterationsReached`] so callers
//!   can retry with relaxed tolerance or accept the approximate result.

// External dependencies
use num_traits::Float;

// ============================================================================
// Convergence Status
// ============================================================================

/// Outcome of a solve with respect to the convergence criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// Two consecutive passes reported a maximum change below tolerance.
    Converged,

    /// The pass cap was reached without meeting the two-pass criterion.
    /// The iterate holds the best approximation found.
    MaxIterationsReached,
}

// ============================================================================
// Solve Summary
// ============================================================================

/// Summary of a completed (or capped) solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CDResult<T> {
    /// Convergence outcome.
    pub status: ConvergenceStatus,

    /// Number of passes performed (full and active-only combined). For
    /// continuation solves this counts the final penalty step only.
    pub iterations: usize,

    /// Maximum absolute coordinate change observed in the last pass.
    pub max_change: T,
}

impl<T: Float> CDResult<T> {
    /// True when the solve met the two-pass convergence criterion.
    #[inline]
    pub fn converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
}
