//! Active-shooting Lasso and group-Lasso solvers on Gram statistics.
//!
//! ## Purpose
//!
//! This module provides greedy working-set solvers that operate on the
//! sufficient statistics `XX = X'X/n` and `Xy = X'y/n` instead of the raw
//! design matrix. Each outer round re-optimizes the current active set and
//! then scans the complement for a coordinate (or group) violating
//! first-order optimality, stopping only when the KKT condition
//! `|Xy_j - (XX beta)_j| <= lambda_j` holds everywhere outside the active
//! set.
//!
//! ## Design notes
//!
//! * **Data-reduced**: valid only when the full design fits in memory;
//!   cheap for large `n`, expensive for large `p`.
//! * **Epsilon seeding**: a newly added coordinate is seeded at machine
//!   epsilon (signed) so the sparse iterate never stores a true zero for an
//!   active position.
//! * **Group steps**: the group variant runs an inner proximal-gradient
//!   solve per active group with the Lipschitz-safe fixed step
//!   `1 / lambda_max(XX_gg)`; the eigenvalue is memoized per group because
//!   the Gram matrix is immutable for the lifetime of a solve.
//!
//! ## Invariants
//!
//! * Each outer round strictly grows or re-optimizes the active set.
//! * If no coordinate violates at the zero iterate, the zero solution is
//!   returned immediately as globally optimal.
//!
//! ## Non-goals
//!
//! * This module does not run continuation paths (see `engine::driver`).
//! * This module does not build Gram statistics from streams; callers pass
//!   resident data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::Range;
use num_traits::Float;

// Internal dependencies
use crate::math::accumulate::AccumulateLinalg;
use crate::math::linalg::FloatLinalg;
use crate::math::prox::{block_soft_threshold, soft_threshold, Penalty};
use crate::primitives::errors::SparseRegError;
use crate::primitives::iterate::SparseIterate;
use crate::primitives::options::CDOptions;
use crate::primitives::status::{CDResult, ConvergenceStatus};

// ============================================================================
// Gram Statistics
// ============================================================================

/// Sufficient statistics `XX = X'X/n` (row-major `p x p`) and `Xy = X'y/n`.
#[derive(Debug, Clone)]
pub struct GramStats<T> {
    xx: Vec<T>,
    xy: Vec<T>,
    p: usize,
}

impl<T: AccumulateLinalg> GramStats<T> {
    /// Wrap precomputed statistics.
    pub fn new(xx: Vec<T>, xy: Vec<T>) -> Result<Self, SparseRegError> {
        let p = xy.len();
        if p == 0 {
            return Err(SparseRegError::EmptyInput);
        }
        if xx.len() != p * p {
            return Err(SparseRegError::DimensionMismatch {
                expected: p * p,
                got: xx.len(),
                what: "Gram matrix length",
            });
        }
        Ok(GramStats { xx, xy, p })
    }

    /// Build the statistics from a resident row-major `n x p` design and
    /// response of length `n`.
    pub fn from_data(x: &[T], y: &[T]) -> Result<Self, SparseRegError> {
        let n = y.len();
        if n == 0 || x.is_empty() {
            return Err(SparseRegError::EmptyInput);
        }
        if x.len() % n != 0 {
            return Err(SparseRegError::MalformedDesign { x_len: x.len(), n });
        }
        let p = x.len() / n;
        let n_float = T::from(n).unwrap();

        // Transpose once so the pairwise products run over contiguous columns.
        let mut cols = Vec::new();
        cols.resize(n * p, T::zero());
        for i in 0..n {
            for k in 0..p {
                cols[k * n + i] = x[i * p + k];
            }
        }

        let mut xx = Vec::new();
        xx.resize(p * p, T::zero());
        for k in 0..p {
            let col_k = &cols[k * n..(k + 1) * n];
            for j in k..p {
                let value = T::dot(col_k, &cols[j * n..(j + 1) * n]) / n_float;
                xx[k * p + j] = value;
                xx[j * p + k] = value;
            }
        }
        let xy = (0..p)
            .map(|k| T::dot(&cols[k * n..(k + 1) * n], y) / n_float)
            .collect();
        Ok(GramStats { xx, xy, p })
    }

    /// Number of coordinates `p`.
    #[inline]
    pub fn num_coordinates(&self) -> usize {
        self.p
    }

    /// Entry `XX[k, j]`.
    #[inline]
    pub fn xx_at(&self, k: usize, j: usize) -> T {
        self.xx[k * self.p + j]
    }

    /// Entry `Xy[k]`.
    #[inline]
    pub fn xy_at(&self, k: usize) -> T {
        self.xy[k]
    }
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Residual correlation `Xy_k - (XX beta)_k`, accumulated over the active
/// set of `beta`.
fn residual_correlation<T: AccumulateLinalg>(
    stats: &GramStats<T>,
    beta: &SparseIterate<T>,
    k: usize,
) -> T {
    let mut acc = stats.xy_at(k);
    for j in beta.active_indices() {
        acc = acc - stats.xx_at(k, j) * beta.get(j);
    }
    acc
}

fn check_shapes<T: AccumulateLinalg>(
    beta: &SparseIterate<T>,
    stats: &GramStats<T>,
    penalty_len: Option<usize>,
) -> Result<(), SparseRegError> {
    if beta.len() != stats.p {
        return Err(SparseRegError::DimensionMismatch {
            expected: stats.p,
            got: beta.len(),
            what: "iterate length",
        });
    }
    if let Some(len) = penalty_len {
        if len != stats.p {
            return Err(SparseRegError::DimensionMismatch {
                expected: stats.p,
                got: len,
                what: "penalty weight length",
            });
        }
    }
    Ok(())
}

// ============================================================================
// Active-Shooting Lasso
// ============================================================================

/// Solve the Lasso KKT system on Gram statistics by active shooting.
///
/// Mutates `beta` in place and reports convergence through the returned
/// [`CDResult`].
pub fn active_shooting_lasso<T: AccumulateLinalg>(
    beta: &mut SparseIterate<T>,
    stats: &GramStats<T>,
    penalty: &Penalty<T>,
    opts: &CDOptions<T>,
) -> Result<CDResult<T>, SparseRegError> {
    check_shapes(beta, stats, penalty.weight_len())?;

    let p = stats.p;
    let mut iterations = 0;
    let mut max_change = T::zero();
    let mut scratch: Vec<usize> = Vec::new();

    for _ in 0..opts.max_iter {
        // Re-optimize the current active set by cyclic coordinate updates.
        let mut inner = 0;
        loop {
            inner += 1;
            iterations += 1;
            scratch.clear();
            scratch.extend(beta.active_indices());
            let mut change = T::zero();
            for &k in &scratch {
                let a_kk = stats.xx_at(k, k);
                if a_kk <= T::zero() {
                    return Err(SparseRegError::NumericDegeneracy(format!(
                        "non-positive Gram diagonal at coordinate {}",
                        k
                    )));
                }
                let old = beta.get(k);
                let s = residual_correlation(stats, beta, k) + a_kk * old;
                let new = soft_threshold(s, penalty.threshold(k)) / a_kk;
                let delta = new - old;
                if delta != T::zero() {
                    beta.set(k, new);
                    change = change.max(delta.abs());
                }
            }
            max_change = change;
            if change < opts.tolerance || inner >= opts.max_iter {
                break;
            }
        }
        beta.drop_zeros();

        // Scan the complement for the strongest KKT violation.
        let mut violator: Option<(usize, T, T)> = None;
        for k in 0..p {
            if beta.is_active(k) {
                continue;
            }
            let s = residual_correlation(stats, beta, k);
            let excess = s.abs() - penalty.threshold(k);
            match violator {
                Some((_, best, _)) if best >= excess => {}
                _ => violator = Some((k, excess, s)),
            }
        }
        match violator {
            Some((k, excess, s)) if excess > T::zero() => {
                // Seed away from exact zero so the active entry survives
                // the next drop_zeros.
                beta.set(k, T::epsilon() * s.signum());
            }
            _ => {
                return Ok(CDResult {
                    status: ConvergenceStatus::Converged,
                    iterations,
                    max_change,
                });
            }
        }
    }

    Ok(CDResult {
        status: ConvergenceStatus::MaxIterationsReached,
        iterations,
        max_change,
    })
}

// ============================================================================
// Active-Shooting Group Lasso
// ============================================================================

/// Check that `groups` is a partition of `0..p` into contiguous,
/// non-empty, ordered blocks.
fn check_groups<T: Float>(
    groups: &[Range<usize>],
    lambda: &[T],
    p: usize,
) -> Result<(), SparseRegError> {
    if groups.is_empty() {
        return Err(SparseRegError::InvalidGroups(format!(
            "no groups supplied for {} coordinates",
            p
        )));
    }
    if lambda.len() != groups.len() {
        return Err(SparseRegError::DimensionMismatch {
            expected: groups.len(),
            got: lambda.len(),
            what: "group penalty length",
        });
    }
    let mut cursor = 0;
    for (gi, g) in groups.iter().enumerate() {
        if g.start != cursor || g.end <= g.start {
            return Err(SparseRegError::InvalidGroups(format!(
                "group {} spans {}..{}, expected a non-empty block starting at {}",
                gi, g.start, g.end, cursor
            )));
        }
        cursor = g.end;
    }
    if cursor != p {
        return Err(SparseRegError::InvalidGroups(format!(
            "groups cover {} of {} coordinates",
            cursor, p
        )));
    }
    for (gi, &l) in lambda.iter().enumerate() {
        if !(l >= T::zero()) || !l.is_finite() {
            return Err(SparseRegError::InvalidPenaltyWeight {
                index: gi,
                value: l.to_f64().unwrap_or(f64::NAN),
            });
        }
    }
    Ok(())
}

/// Gradient of the Gram quadratic restricted to group `g`, with the group's
/// block taken from `v` instead of `beta`.
fn group_gradient<T: AccumulateLinalg>(
    stats: &GramStats<T>,
    beta: &SparseIterate<T>,
    g: &Range<usize>,
    v: &[T],
    grad: &mut [T],
) {
    for (off, j) in g.clone().enumerate() {
        let mut acc = -stats.xy_at(j);
        for l in beta.active_indices() {
            if !g.contains(&l) {
                acc = acc + stats.xx_at(j, l) * beta.get(l);
            }
        }
        for (voff, l) in g.clone().enumerate() {
            acc = acc + stats.xx_at(j, l) * v[voff];
        }
        grad[off] = acc;
    }
}

/// Solve the group Lasso on Gram statistics by active shooting over groups.
///
/// `groups` must partition `0..p` into contiguous blocks; `lambda` holds one
/// non-negative penalty weight per group.
pub fn active_shooting_group_lasso<T: AccumulateLinalg + FloatLinalg>(
    beta: &mut SparseIterate<T>,
    stats: &GramStats<T>,
    groups: &[Range<usize>],
    lambda: &[T],
    opts: &CDOptions<T>,
) -> Result<CDResult<T>, SparseRegError> {
    check_shapes(beta, stats, None)?;
    check_groups(groups, lambda, stats.p)?;

    let mut iterations = 0;
    let mut max_change = T::zero();
    // Lipschitz constants, memoized: the Gram blocks never change.
    let mut lipschitz: Vec<Option<T>> = Vec::new();
    lipschitz.resize(groups.len(), None);

    let mut v: Vec<T> = Vec::new();
    let mut grad: Vec<T> = Vec::new();
    let mut block: Vec<T> = Vec::new();

    for _ in 0..opts.max_iter {
        // Re-optimize the active groups.
        let mut inner = 0;
        loop {
            inner += 1;
            iterations += 1;
            let mut change = T::zero();
            for (gi, g) in groups.iter().enumerate() {
                if !g.clone().any(|j| beta.is_active(j)) {
                    continue;
                }
                let m = g.end - g.start;
                let step = match lipschitz[gi] {
                    Some(l) => T::one() / l,
                    None => {
                        block.clear();
                        // Column-major block extraction; symmetric, so the
                        // layout direction is immaterial.
                        for j in g.clone() {
                            for l in g.clone() {
                                block.push(stats.xx_at(l, j));
                            }
                        }
                        let l = T::max_eigenvalue(&block, m).unwrap_or(T::zero());
                        if l <= T::zero() {
                            return Err(SparseRegError::NumericDegeneracy(format!(
                                "non-positive Lipschitz constant for group {}",
                                gi
                            )));
                        }
                        lipschitz[gi] = Some(l);
                        T::one() / l
                    }
                };

                v.clear();
                v.extend(g.clone().map(|j| beta.get(j)));
                grad.clear();
                grad.resize(m, T::zero());

                // Inner proximal-gradient solve at fixed step, to its own
                // tolerance.
                let mut block_iter = 0;
                loop {
                    block_iter += 1;
                    group_gradient(stats, beta, g, &v, &mut grad);
                    let mut block_change = T::zero();
                    let mut next: Vec<T> =
                        v.iter().zip(&grad).map(|(&vi, &dj)| vi - step * dj).collect();
                    block_soft_threshold(&mut next, step * lambda[gi]);
                    for (off, j) in g.clone().enumerate() {
                        let delta = next[off] - v[off];
                        block_change = block_change.max(delta.abs());
                        v[off] = next[off];
                        beta.set(j, next[off]);
                    }
                    if block_change < opts.tolerance || block_iter >= opts.max_iter {
                        change = change.max(block_change);
                        break;
                    }
                    change = change.max(block_change);
                }
            }
            max_change = change;
            if change < opts.tolerance || inner >= opts.max_iter {
                break;
            }
        }
        beta.drop_zeros();

        // Scan inactive groups for a block KKT violation.
        let mut violator: Option<(usize, T)> = None;
        for (gi, g) in groups.iter().enumerate() {
            if g.clone().any(|j| beta.is_active(j)) {
                continue;
            }
            let mut norm_sq = T::zero();
            for j in g.clone() {
                let d = residual_correlation(stats, beta, j);
                norm_sq = norm_sq + d * d;
            }
            let excess = norm_sq.sqrt() - lambda[gi];
            match violator {
                Some((_, best)) if best >= excess => {}
                _ => violator = Some((gi, excess)),
            }
        }
        match violator {
            Some((gi, excess)) if excess > T::zero() => {
                let g = &groups[gi];
                for j in g.clone() {
                    let d = residual_correlation(stats, beta, j);
                    if d != T::zero() {
                        beta.set(j, T::epsilon() * d.signum());
                    }
                }
            }
            _ => {
                return Ok(CDResult {
                    status: ConvergenceStatus::Converged,
                    iterations,
                    max_change,
                });
            }
        }
    }

    Ok(CDResult {
        status: ConvergenceStatus::MaxIterationsReached,
        iterations,
        max_change,
    })
}
