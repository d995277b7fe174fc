//! Leave-one-out bandwidth selection for local polynomial regression.
//!
//! ## Purpose
//!
//! This module scores candidate bandwidths by leave-one-out
//! cross-validation: for each bandwidth and each held-out observation, the
//! penalized fit is run on the remainder, the selected (nonzero)
//! coordinates are refit unpenalized by weighted least squares, and the
//! squared prediction error is accumulated.
//!
//! ## Design notes
//!
//! * **Post-selection refit**: the penalized estimate is biased by
//!   shrinkage; refitting the selected support unpenalized gives the
//!   prediction error of the selected model, not of the shrunken one.
//! * **Caller selects**: scores are returned per bandwidth; picking the
//!   minimizer is left to the caller, with [`best_bandwidth`] as a
//!   convenience.
//! * **Independence**: held-out fits share no warm-start state, so the
//!   inner loop is embarrassingly parallel in principle (kept sequential
//!   here).
//!
//! ## Invariants
//!
//! * Training and test observations are disjoint in every fold.
//! * A singular refit system falls back to the penalized estimate rather
//!   than failing the whole scan.
//!
//! ## Non-goals
//!
//! * This module does not fit the final model (see
//!   `evaluation::locpoly`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::evaluation::locpoly::fit_at_point;
use crate::math::accumulate::AccumulateLinalg;
use crate::math::basis::{expand_row, expanded_width};
use crate::math::kernel::KernelFunction;
use crate::math::linalg::FloatLinalg;
use crate::primitives::errors::SparseRegError;
use crate::primitives::iterate::SparseIterate;
use crate::primitives::options::CDOptions;

// ============================================================================
// Subset Building
// ============================================================================

/// Copy every observation except `holdout` into the scratch buffers.
fn build_training_subset<T: Float>(
    x: &[T],
    z: &[T],
    y: &[T],
    q: usize,
    holdout: usize,
    tx: &mut Vec<T>,
    tz: &mut Vec<T>,
    ty: &mut Vec<T>,
) {
    tx.clear();
    tz.clear();
    ty.clear();
    for i in 0..y.len() {
        if i == holdout {
            continue;
        }
        tx.extend_from_slice(&x[i * q..(i + 1) * q]);
        tz.push(z[i]);
        ty.push(y[i]);
    }
}

// ============================================================================
// Post-Selection Refit
// ============================================================================

/// Unpenalized weighted least-squares refit on the selected support.
///
/// `design` is the row-major expanded training design, `support` the
/// selected column indices. Returns `None` when the normal equations are
/// singular beyond the backend's fallbacks.
fn refit_on_support<T: AccumulateLinalg + FloatLinalg>(
    design: &[T],
    weights: &[T],
    y: &[T],
    p: usize,
    support: &[usize],
) -> Option<Vec<T>> {
    let m = support.len();
    let n = y.len();
    let mut normal = Vec::new();
    normal.resize(m * m, T::zero());
    let mut rhs = Vec::new();
    rhs.resize(m, T::zero());

    for l in 0..n {
        let row = &design[l * p..(l + 1) * p];
        let w = weights[l];
        for (si, &s) in support.iter().enumerate() {
            let ws = w * row[s];
            rhs[si] = rhs[si] + ws * y[l];
            for (ti, &t) in support.iter().enumerate().skip(si) {
                let value = ws * row[t];
                normal[si * m + ti] = normal[si * m + ti] + value;
                if ti != si {
                    normal[ti * m + si] = normal[ti * m + si] + value;
                }
            }
        }
    }

    T::solve_normal(&normal, &rhs, m)
}

// ============================================================================
// Leave-One-Out Scoring
// ============================================================================

/// Score candidate bandwidths by leave-one-out cross-validation.
///
/// Returns the aggregate squared prediction error per bandwidth, in the
/// order of `bandwidths`. The bandwidth minimizing the score is selected by
/// the caller (see [`best_bandwidth`]).
#[allow(clippy::too_many_arguments)]
pub fn locpoly_loocv<T: AccumulateLinalg + FloatLinalg>(
    x: &[T],
    z: &[T],
    y: &[T],
    bandwidths: &[T],
    degree: usize,
    kernel: KernelFunction,
    lambda: T,
    opts: &CDOptions<T>,
) -> Result<Vec<T>, SparseRegError> {
    let (n, q) = Validator::validate_data(x, y)?;
    if z.len() != n {
        return Err(SparseRegError::DimensionMismatch {
            expected: n,
            got: z.len(),
            what: "smoothing variable length",
        });
    }
    if n < 2 {
        return Err(SparseRegError::TooFewPoints { got: n, min: 2 });
    }
    Validator::validate_grid(bandwidths, "bandwidths")?;
    for &h in bandwidths {
        Validator::validate_bandwidth(h)?;
    }
    Validator::validate_options(opts)?;

    let p = expanded_width(q, degree);
    let mut scores = Vec::with_capacity(bandwidths.len());
    let mut tx: Vec<T> = Vec::with_capacity((n - 1) * q);
    let mut tz: Vec<T> = Vec::with_capacity(n - 1);
    let mut ty: Vec<T> = Vec::with_capacity(n - 1);
    let mut row: Vec<T> = Vec::new();
    row.resize(p, T::zero());
    let mut support: Vec<usize> = Vec::new();

    for &h in bandwidths {
        let mut total = T::zero();
        for holdout in 0..n {
            build_training_subset(x, z, y, q, holdout, &mut tx, &mut tz, &mut ty);
            let z0 = z[holdout];

            let mut iterate = SparseIterate::new(p);
            let (design, weights, _) = fit_at_point(
                &tx, &tz, &ty, q, z0, degree, kernel, h, lambda, opts, &mut iterate,
            )?;

            iterate.drop_zeros();
            support.clear();
            support.extend(iterate.active_indices());

            // Design row of the held-out point at its own location: only
            // the degree-0 columns survive `dz = 0`.
            expand_row(&x[holdout * q..(holdout + 1) * q], T::zero(), degree, &mut row);

            let prediction = if support.is_empty() {
                T::zero()
            } else {
                match refit_on_support(&design, &weights, &ty, p, &support) {
                    Some(refit) => {
                        let mut acc = T::zero();
                        for (si, &s) in support.iter().enumerate() {
                            acc = acc + refit[si] * row[s];
                        }
                        acc
                    }
                    None => {
                        let mut acc = T::zero();
                        for &s in &support {
                            acc = acc + iterate.get(s) * row[s];
                        }
                        acc
                    }
                }
            };

            let err = y[holdout] - prediction;
            total = total + err * err;
        }
        scores.push(total);
    }

    Ok(scores)
}

/// Bandwidth with the smallest score. `None` when the slices are empty or
/// their lengths disagree.
pub fn best_bandwidth<T: Float>(bandwidths: &[T], scores: &[T]) -> Option<T> {
    if bandwidths.is_empty() || bandwidths.len() != scores.len() {
        return None;
    }
    let mut best = 0;
    for i in 1..scores.len() {
        if scores[i] < scores[best] {
            best = i;
        }
    }
    Some(bandwidths[best])
}
