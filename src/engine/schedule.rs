//! Continuation schedules and penalty-scale bounds.
//!
//! ## Purpose
//!
//! This module provides the two ingredients of path-following: the smallest
//! penalty scale that makes the all-zero iterate optimal (`lambda_max`),
//! and a plain geometric sequence of penalty multipliers consumed by the
//! driver's continuation loop.
//!
//! ## Design notes
//!
//! * **Plain generator**: the schedule is an ordinary iterator over a
//!   geometric grid, not a recursive or lazily-regenerated structure.
//! * **Scale, not value**: [`penalty_scale_max`] works in units of the
//!   target penalty (a multiplier), so the same machinery serves uniform
//!   and weighted penalties.
//!
//! ## Invariants
//!
//! * The schedule is strictly decreasing and ends exactly at `to`.
//! * Unpenalized coordinates (zero weight) never contribute to the scale
//!   bound.
//!
//! ## Non-goals
//!
//! * This module does not run the solves (see `engine::driver`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::accumulate::AccumulateLinalg;
use crate::algorithms::losses::Loss;
use crate::math::prox::Penalty;
use crate::primitives::iterate::SparseIterate;

// ============================================================================
// Penalty Scale Bound
// ============================================================================

/// Largest ratio `|grad_k| / w_k` over penalized coordinates at the current
/// iterate.
///
/// Evaluated at the zero iterate this is the multiplier of the target
/// penalty at which the zero vector becomes optimal: for any scale at or
/// above it, every coordinate satisfies the stationarity condition
/// `|grad_k| <= scale * w_k`. The loss's residual cache must be consistent
/// with `x`.
pub fn penalty_scale_max<T: AccumulateLinalg>(
    loss: &Loss<T>,
    x: &SparseIterate<T>,
    penalty: &Penalty<T>,
) -> T {
    let p = loss.num_coordinates();
    let mut best = T::zero();
    for k in 0..p {
        let w = penalty.threshold(k);
        if w > T::zero() {
            best = best.max(loss.gradient_coordinate(x, k).abs() / w);
        }
    }
    best
}

/// Smallest uniform L1 penalty making the all-zero vector optimal.
///
/// Initializes the loss at the zero iterate and scans the unpenalized
/// gradient; for least squares this is `max_k |X_k' y| / n`.
pub fn lambda_max<T: AccumulateLinalg>(loss: &mut Loss<T>) -> T {
    let zero = SparseIterate::new(loss.num_coordinates());
    loss.initialize(&zero);
    let mut best = T::zero();
    for k in 0..loss.num_coordinates() {
        best = best.max(loss.gradient_coordinate(&zero, k).abs());
    }
    best
}

// ============================================================================
// Geometric Schedule
// ============================================================================

/// Geometrically spaced decreasing sequence from `from` down to `to`.
#[derive(Debug, Clone)]
pub struct GeometricSchedule<T> {
    log_from: T,
    log_to: T,
    steps: usize,
    index: usize,
}

/// Build a geometric schedule of `steps` values, inclusive of both
/// endpoints. With `steps == 1` only `to` is produced.
pub fn geometric_schedule<T: Float>(from: T, to: T, steps: usize) -> GeometricSchedule<T> {
    GeometricSchedule {
        log_from: from.ln(),
        log_to: to.ln(),
        steps,
        index: 0,
    }
}

impl<T: Float> Iterator for GeometricSchedule<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.index >= self.steps {
            return None;
        }
        let value = if self.steps == 1 || self.index == self.steps - 1 {
            self.log_to.exp()
        } else {
            let t = T::from(self.index).unwrap() / T::from(self.steps - 1).unwrap();
            (self.log_from + (self.log_to - self.log_from) * t).exp()
        };
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: Float> ExactSizeIterator for GeometricSchedule<T> {}
