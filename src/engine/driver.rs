//! Coordinate-descent driver.
//!
//! ## Purpose
//!
//! This module orchestrates a full solve: validation, residual
//! initialization, full and active-only sweeps, convergence testing, and
//! the warm-start / continuation logic.
//!
//! ## Design notes
//!
//! * **Two pass kinds**: a full pass visits every coordinate and then
//!   prunes zero-valued active entries; an active-only pass visits the
//!   current active set.
//! * **Two-pass convergence**: convergence is declared only when two
//!   consecutive passes both report a maximum change below tolerance. A
//!   small full pass is confirmed by one active-only pass; this guards
//!   against stopping on a pass that only touched a subset of coordinates.
//! * **Continuation**: without a warm start, the driver clears the iterate,
//!   computes the penalty scale at which zero is optimal, and solves a
//!   geometric sequence of scaled penalties down to the target, each step
//!   warm-started from the previous solution.
//!
//! ## Invariants
//!
//! * The loss's residual cache is (re)initialized before any sequence of
//!   coordinate updates.
//! * Hitting the pass cap is reported, not raised: the iterate keeps the
//!   best approximation found.
//!
//! ## Non-goals
//!
//! * This module does not choose penalties or bandwidths (see
//!   `evaluation`).
//! * This module does not operate on Gram statistics (see
//!   `algorithms::shooting`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::algorithms::losses::Loss;
use crate::engine::schedule::{geometric_schedule, penalty_scale_max};
use crate::engine::validator::Validator;
use crate::math::accumulate::AccumulateLinalg;
use crate::math::prox::Penalty;
use crate::primitives::errors::SparseRegError;
use crate::primitives::iterate::SparseIterate;
use crate::primitives::options::CDOptions;
use crate::primitives::status::{CDResult, ConvergenceStatus};

// ============================================================================
// Driver Entry Point
// ============================================================================

/// Minimize `loss + penalty` by proximal coordinate descent, mutating `x`
/// in place.
///
/// With `opts.warm_start` the solve starts from the supplied iterate at the
/// target penalty; otherwise the iterate is cleared and the continuation
/// path is run from the zero-optimal penalty scale down to the target.
///
/// Returns the [`CDResult`] of the final (target-penalty) solve.
pub fn coordinate_descent<T: AccumulateLinalg>(
    x: &mut SparseIterate<T>,
    loss: &mut Loss<T>,
    penalty: &Penalty<T>,
    opts: &CDOptions<T>,
) -> Result<CDResult<T>, SparseRegError> {
    Validator::validate_options(opts)?;
    Validator::validate_iterate(x, loss.num_coordinates())?;
    Validator::validate_penalty(penalty, loss.num_coordinates())?;

    if opts.warm_start {
        loss.initialize(x);
        return solve_at(x, loss, penalty, T::one(), opts);
    }

    x.clear();
    loss.initialize(x);
    let scale_max = penalty_scale_max(loss, x, penalty);
    if !scale_max.is_finite() || scale_max <= T::one() {
        // The target penalty already dominates the zero-iterate gradient
        // (or no coordinate is penalized): solve directly.
        return solve_at(x, loss, penalty, T::one(), opts);
    }

    let mut result = CDResult {
        status: ConvergenceStatus::Converged,
        iterations: 0,
        max_change: T::zero(),
    };
    for mult in geometric_schedule(scale_max, T::one(), opts.num_continuation_steps) {
        result = solve_at(x, loss, penalty, mult, opts)?;
    }
    Ok(result)
}

// ============================================================================
// Pass State Machine
// ============================================================================

/// Solve at a fixed penalty multiplier, starting from the current iterate
/// and a consistent residual cache.
fn solve_at<T: AccumulateLinalg>(
    x: &mut SparseIterate<T>,
    loss: &mut Loss<T>,
    penalty: &Penalty<T>,
    mult: T,
    opts: &CDOptions<T>,
) -> Result<CDResult<T>, SparseRegError> {
    let mut scratch: Vec<usize> = Vec::new();
    let mut prev_small = false;
    let mut confirm = false;
    let mut iterations = 0;
    let mut max_change = T::infinity();

    for _ in 0..opts.max_iter {
        iterations += 1;
        max_change = if confirm {
            active_pass(x, loss, penalty, mult, &mut scratch)?
        } else {
            let change = full_pass(x, loss, penalty, mult)?;
            x.drop_zeros();
            change
        };

        let small = max_change < opts.tolerance;
        if small && prev_small {
            return Ok(CDResult {
                status: ConvergenceStatus::Converged,
                iterations,
                max_change,
            });
        }
        // A small full pass is confirmed by one active-only pass; any
        // other outcome routes back to a full pass.
        confirm = small && !confirm;
        prev_small = small;
    }

    Ok(CDResult {
        status: ConvergenceStatus::MaxIterationsReached,
        iterations,
        max_change,
    })
}

/// Visit every coordinate once; returns the maximum absolute change.
fn full_pass<T: AccumulateLinalg>(
    x: &mut SparseIterate<T>,
    loss: &mut Loss<T>,
    penalty: &Penalty<T>,
    mult: T,
) -> Result<T, SparseRegError> {
    let mut change = T::zero();
    for k in 0..loss.num_coordinates() {
        let threshold = mult * penalty.threshold(k);
        let delta = loss.descend_coordinate(x, k, threshold)?;
        change = change.max(delta.abs());
    }
    Ok(change)
}

/// Visit only the currently active coordinates.
fn active_pass<T: AccumulateLinalg>(
    x: &mut SparseIterate<T>,
    loss: &mut Loss<T>,
    penalty: &Penalty<T>,
    mult: T,
    scratch: &mut Vec<usize>,
) -> Result<T, SparseRegError> {
    scratch.clear();
    scratch.extend(x.active_indices());
    let mut change = T::zero();
    for &k in scratch.iter() {
        let threshold = mult * penalty.threshold(k);
        let delta = loss.descend_coordinate(x, k, threshold)?;
        change = change.max(delta.abs());
    }
    Ok(change)
}
