//! Solver configuration.
//!
//! ## Purpose
//!
//! This module defines [`CDOptions`], the immutable configuration shared by
//! the coordinate-descent driver and the active-shooting solvers.
//!
//! ## Design notes
//!
//! * **Plain data**: a small copyable struct with chained `with_*` setters;
//!   validation happens in the engine's validator, not here.
//! * **Warm starts**: `warm_start` selects between solving directly from the
//!   supplied iterate and running the geometric continuation path.
//!
//! ## Non-goals
//!
//! * This module does not validate parameter values.

// External dependencies
use num_traits::Float;

// ============================================================================
// Options
// ============================================================================

/// Immutable configuration for a coordinate-descent solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CDOptions<T> {
    /// Maximum number of passes (full or active-only) per solve.
    pub max_iter: usize,

    /// Convergence tolerance on the maximum absolute coordinate change.
    pub tolerance: T,

    /// Start from the supplied iterate at the target penalty instead of
    /// running the continuation path from `lambda_max`.
    pub warm_start: bool,

    /// Number of penalty values on the continuation path.
    pub num_continuation_steps: usize,
}

impl<T: Float> Default for CDOptions<T> {
    fn default() -> Self {
        CDOptions {
            max_iter: 5_000,
            tolerance: T::from(1e-7).unwrap(),
            warm_start: false,
            num_continuation_steps: 50,
        }
    }
}

impl<T: Float> CDOptions<T> {
    /// Set the pass cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable warm starting.
    pub fn with_warm_start(mut self, warm_start: bool) -> Self {
        self.warm_start = warm_start;
        self
    }

    /// Set the number of continuation steps.
    pub fn with_continuation_steps(mut self, steps: usize) -> Self {
        self.num_continuation_steps = steps;
        self
    }
}
