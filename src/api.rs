//! High-level API for sparse regression.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: one-call solvers for
//! the Lasso, square-root Lasso, and group Lasso, the local polynomial
//! fitting and bandwidth-selection routines, and the quantile-regression
//! assembly over a pluggable LP backend. It also re-exports the lower-layer
//! types an advanced caller needs (losses, penalties, the driver, Gram
//! statistics).
//!
//! ## Design notes
//!
//! * **Convenience first**: the one-call solvers accept flat slices and
//!   return dense coefficient vectors; callers needing warm starts, sparse
//!   iterates, or convergence metadata use [`coordinate_descent`] and the
//!   re-exported building blocks directly.
//! * **Backend seam**: quantile regression is expressed as a linear
//!   program; the [`QuantRegBackend`] trait keeps the LP solver out of this
//!   crate, so any conic/LP library can be plugged in.
//!
//! ## Key concepts
//!
//! * All objectives are averaged over observations: the Lasso solves
//!   `(1/2n) ||y - X b||^2 + lambda ||b||_1`, so `lambda` is comparable
//!   across sample sizes.
//! * The square-root Lasso solves `||y - X b||_2 + lambda ||b||_1` with the
//!   unnormalized residual norm.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::Range;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::losses::{
    LeastSquares, Loss, Quadratic, SqrtLasso, WeightedLeastSquares,
};
pub use crate::algorithms::shooting::{
    active_shooting_group_lasso, active_shooting_lasso, GramStats,
};
pub use crate::engine::driver::coordinate_descent;
pub use crate::engine::schedule::lambda_max;
pub use crate::evaluation::cv::{best_bandwidth, locpoly_loocv};
pub use crate::evaluation::locpoly::{locpoly_l1, LocPolyFit};
pub use crate::math::accumulate::AccumulateLinalg;
pub use crate::math::kernel::KernelFunction;
pub use crate::math::linalg::FloatLinalg;
pub use crate::math::prox::Penalty;
pub use crate::primitives::errors::SparseRegError;
pub use crate::primitives::iterate::SparseIterate;
pub use crate::primitives::options::CDOptions;
pub use crate::primitives::status::{CDResult, ConvergenceStatus};

// ============================================================================
// One-Call Solvers
// ============================================================================

/// Solve the Lasso `(1/2n) ||y - X b||^2 + lambda ||b||_1`.
///
/// `x` is the flattened row-major `n x p` design matrix and `y` the response
/// of length `n`. Returns the dense coefficient vector.
///
/// ```rust
/// use sparsereg_rs::prelude::*;
///
/// // Identity design: each coordinate is soft-thresholded at n * lambda.
/// let x: Vec<f64> = vec![1.0, 0.0, 0.0, 1.0];
/// let y = vec![3.0, 0.0];
/// let beta = lasso(&x, &y, 0.5, &CDOptions::default())?;
/// assert!((beta[0] - 2.0).abs() < 1e-6);
/// assert_eq!(beta[1], 0.0);
/// # Result::<(), SparseRegError>::Ok(())
/// ```
pub fn lasso<T: AccumulateLinalg>(
    x: &[T],
    y: &[T],
    lambda: T,
    opts: &CDOptions<T>,
) -> Result<Vec<T>, SparseRegError> {
    let (_, p) = Validator::validate_data(x, y)?;
    let mut loss = Loss::LeastSquares(LeastSquares::new(x, y)?);
    let penalty = Penalty::L1(lambda);
    let mut beta = SparseIterate::new(p);
    coordinate_descent(&mut beta, &mut loss, &penalty, opts)?;
    Ok(beta.to_dense())
}

/// Solve the weighted Lasso with one non-negative penalty weight per
/// coordinate; zero-weight coordinates are unpenalized.
pub fn weighted_lasso<T: AccumulateLinalg>(
    x: &[T],
    y: &[T],
    weights: &[T],
    opts: &CDOptions<T>,
) -> Result<Vec<T>, SparseRegError> {
    let (_, p) = Validator::validate_data(x, y)?;
    let mut loss = Loss::LeastSquares(LeastSquares::new(x, y)?);
    let penalty = Penalty::WeightedL1(weights.to_vec());
    let mut beta = SparseIterate::new(p);
    coordinate_descent(&mut beta, &mut loss, &penalty, opts)?;
    Ok(beta.to_dense())
}

/// Solve the square-root Lasso `||y - X b||_2 + lambda ||b||_1`.
///
/// The coordinate update requires `lambda^2 < ||X_k||^2` for every column;
/// a violation surfaces as [`SparseRegError::NumericDegeneracy`].
pub fn sqrt_lasso<T: AccumulateLinalg>(
    x: &[T],
    y: &[T],
    lambda: T,
    opts: &CDOptions<T>,
) -> Result<Vec<T>, SparseRegError> {
    let (_, p) = Validator::validate_data(x, y)?;
    let mut loss = Loss::SqrtLasso(SqrtLasso::new(x, y)?);
    let penalty = Penalty::L1(lambda);
    let mut beta = SparseIterate::new(p);
    coordinate_descent(&mut beta, &mut loss, &penalty, opts)?;
    Ok(beta.to_dense())
}

/// Solve the group Lasso on Gram statistics built from the data.
///
/// `groups` must partition `0..p` into contiguous blocks; `lambda` holds
/// one non-negative penalty weight per group.
pub fn group_lasso<T: AccumulateLinalg + FloatLinalg>(
    x: &[T],
    y: &[T],
    groups: &[Range<usize>],
    lambda: &[T],
    opts: &CDOptions<T>,
) -> Result<Vec<T>, SparseRegError> {
    let (_, p) = Validator::validate_data(x, y)?;
    Validator::validate_options(opts)?;
    let stats = GramStats::from_data(x, y)?;
    let mut beta = SparseIterate::new(p);
    active_shooting_group_lasso(&mut beta, &stats, groups, lambda, opts)?;
    Ok(beta.to_dense())
}

// ============================================================================
// Quantile Regression
// ============================================================================

/// Linear-programming backend seam for quantile regression.
///
/// Implementors solve the standard-form LP
///
/// ```text
/// minimize    objective' v
/// subject to  constraints * v = rhs,   v >= 0
/// ```
///
/// with `constraints` flattened row-major (`rhs.len()` rows of `num_vars`
/// entries), returning the optimal `v` of length `num_vars`. Infeasibility
/// or solver failures are reported as
/// [`SparseRegError::BackendFailure`].
pub trait QuantRegBackend<T> {
    /// Solve the equality-constrained LP with non-negative variables.
    fn solve_lp(
        &self,
        objective: &[T],
        constraints: &[T],
        rhs: &[T],
        num_vars: usize,
    ) -> Result<Vec<T>, SparseRegError>;
}

/// Fit quantile regression at level `tau` by solving its LP formulation.
///
/// Minimizes the check loss `sum_i rho_tau(y_i - x_i' b)` with
/// `rho_tau(u) = u * (tau - 1[u < 0])` via the split
/// `b = b+ - b-`, `y_i - x_i' b = u_i - v_i` with all parts non-negative,
/// which turns the problem into a linear program in `2p + 2n` variables.
/// Returns the coefficient vector `b`.
pub fn quantreg<T: AccumulateLinalg, B: QuantRegBackend<T>>(
    backend: &B,
    x: &[T],
    y: &[T],
    tau: T,
) -> Result<Vec<T>, SparseRegError> {
    let (n, p) = Validator::validate_data(x, y)?;
    if !tau.is_finite() || tau <= T::zero() || tau >= T::one() {
        return Err(SparseRegError::InvalidQuantile(
            tau.to_f64().unwrap_or(f64::NAN),
        ));
    }

    let num_vars = 2 * p + 2 * n;
    let mut objective = Vec::new();
    objective.resize(num_vars, T::zero());
    for i in 0..n {
        objective[2 * p + i] = tau;
        objective[2 * p + n + i] = T::one() - tau;
    }

    // Row i: x_i' b+ - x_i' b- + u_i - v_i = y_i.
    let mut constraints = Vec::new();
    constraints.resize(n * num_vars, T::zero());
    for i in 0..n {
        let row = &mut constraints[i * num_vars..(i + 1) * num_vars];
        for k in 0..p {
            row[k] = x[i * p + k];
            row[p + k] = -x[i * p + k];
        }
        row[2 * p + i] = T::one();
        row[2 * p + n + i] = -T::one();
    }

    let solution = backend.solve_lp(&objective, &constraints, y, num_vars)?;
    if solution.len() != num_vars {
        return Err(SparseRegError::DimensionMismatch {
            expected: num_vars,
            got: solution.len(),
            what: "LP solution length",
        });
    }

    Ok((0..p).map(|k| solution[k] - solution[p + k]).collect())
}
