//! Penalized local polynomial regression.
//!
//! ## Purpose
//!
//! This module fits an L1-penalized, kernel-weighted polynomial expansion
//! of the covariates at every point of an evaluation grid, warm-starting
//! each grid point from the previous point's solution.
//!
//! ## Design notes
//!
//! * **Weight normalization**: kernel weights are rescaled to sum to `n`
//!   before fitting, so the penalty strength is comparable across grid
//!   points and across bandwidths; with an unbounded (or very wide) kernel
//!   the weights degrade gracefully to all-ones, and the fit reduces to
//!   plain penalized least squares.
//! * **Warm starts**: adjacent grid points are assumed close, so each fit
//!   after the first reuses the previous solution and skips the
//!   continuation path. The grid loop is therefore inherently sequential.
//!
//! ## Invariants
//!
//! * Coefficient columns follow the `math::basis` layout: covariate-major,
//!   ascending powers of `(z - z0)` within each covariate block.
//!
//! ## Non-goals
//!
//! * This module does not select bandwidths (see `evaluation::cv`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Feature-gated imports (alloc)
#[cfg(not(feature = "std"))]
use alloc::string::ToString;
#[cfg(feature = "std")]
use std::string::ToString;

// Internal dependencies
use crate::algorithms::losses::{Loss, WeightedLeastSquares};
use crate::engine::driver::coordinate_descent;
use crate::engine::validator::Validator;
use crate::math::accumulate::AccumulateLinalg;
use crate::math::basis::{expand_design, expanded_width};
use crate::math::kernel::KernelFunction;
use crate::math::prox::Penalty;
use crate::primitives::errors::SparseRegError;
use crate::primitives::iterate::SparseIterate;
use crate::primitives::options::CDOptions;
use crate::primitives::status::CDResult;

// ============================================================================
// Fit Output
// ============================================================================

/// Fitted coefficients of a local polynomial regression, one column per
/// grid point.
#[derive(Debug, Clone)]
pub struct LocPolyFit<T> {
    /// Column-major storage: `num_coefficients` values per grid point.
    coefficients: Vec<T>,
    p: usize,
    num_points: usize,
}

impl<T: Copy> LocPolyFit<T> {
    /// Number of coefficients per grid point (`q * (degree + 1)`).
    #[inline]
    pub fn num_coefficients(&self) -> usize {
        self.p
    }

    /// Number of grid points fitted.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Coefficient column for grid point `g`.
    ///
    /// # Panics
    ///
    /// Panics if `g >= self.num_points()`.
    #[inline]
    pub fn column(&self, g: usize) -> &[T] {
        &self.coefficients[g * self.p..(g + 1) * self.p]
    }
}

// ============================================================================
// Kernel Weights
// ============================================================================

/// Kernel weights around `z0`, rescaled to sum to `n`.
pub(crate) fn normalized_kernel_weights<T: AccumulateLinalg>(
    z: &[T],
    z0: T,
    kernel: KernelFunction,
    bandwidth: T,
) -> Result<Vec<T>, SparseRegError> {
    let n = z.len();
    let mut weights: Vec<T> = z.iter().map(|&zi| kernel.weight(zi, z0, bandwidth)).collect();
    let mut total = T::zero();
    for &w in &weights {
        total = total + w;
    }
    if total <= T::zero() {
        return Err(SparseRegError::NumericDegeneracy(
            "all kernel weights vanished; bandwidth too small for the grid point".to_string(),
        ));
    }
    let scale = T::from(n).unwrap() / total;
    for w in weights.iter_mut() {
        *w = *w * scale;
    }
    Ok(weights)
}

// ============================================================================
// Single-Point Fit
// ============================================================================

/// Fit the penalized weighted least-squares expansion at one evaluation
/// point, leaving the solution in `iterate`.
///
/// Returns the expanded design and the normalized weights so callers (the
/// cross-validation layer) can reuse them for post-selection refits.
#[allow(clippy::too_many_arguments)]
pub(crate) fn fit_at_point<T: AccumulateLinalg>(
    x: &[T],
    z: &[T],
    y: &[T],
    q: usize,
    z0: T,
    degree: usize,
    kernel: KernelFunction,
    bandwidth: T,
    lambda: T,
    opts: &CDOptions<T>,
    iterate: &mut SparseIterate<T>,
) -> Result<(Vec<T>, Vec<T>, CDResult<T>), SparseRegError> {
    let design = expand_design(x, z, z0, q, degree);
    let weights = normalized_kernel_weights(z, z0, kernel, bandwidth)?;
    let wls = WeightedLeastSquares::new(&design, y, &weights)?;
    let mut loss = Loss::WeightedLeastSquares(wls);
    let penalty = Penalty::L1(lambda);
    let result = coordinate_descent(iterate, &mut loss, &penalty, opts)?;
    Ok((design, weights, result))
}

// ============================================================================
// Grid Fit
// ============================================================================

/// Fit an L1-penalized local polynomial regression over an evaluation grid.
///
/// `x` is the row-major `n x q` covariate matrix, `z` the smoothing
/// variable, and `y` the response. Returns one coefficient column per grid
/// point, each of width `q * (degree + 1)`.
#[allow(clippy::too_many_arguments)]
pub fn locpoly_l1<T: AccumulateLinalg>(
    x: &[T],
    z: &[T],
    y: &[T],
    zgrid: &[T],
    degree: usize,
    kernel: KernelFunction,
    bandwidth: T,
    lambda: T,
    opts: &CDOptions<T>,
) -> Result<LocPolyFit<T>, SparseRegError> {
    let (n, q) = Validator::validate_data(x, y)?;
    if z.len() != n {
        return Err(SparseRegError::DimensionMismatch {
            expected: n,
            got: z.len(),
            what: "smoothing variable length",
        });
    }
    Validator::validate_grid(zgrid, "zgrid")?;
    Validator::validate_bandwidth(bandwidth)?;
    Validator::validate_options(opts)?;

    let p = expanded_width(q, degree);
    let mut iterate = SparseIterate::new(p);
    let mut point_opts = *opts;
    let mut coefficients = Vec::with_capacity(p * zgrid.len());

    for (g, &z0) in zgrid.iter().enumerate() {
        if g > 0 {
            // Adjacent grid points share their active sets; reuse the
            // previous solution instead of re-running continuation.
            point_opts.warm_start = true;
        }
        fit_at_point(
            x, z, y, q, z0, degree, kernel, bandwidth, lambda, &point_opts, &mut iterate,
        )?;
        coefficients.extend_from_slice(&iterate.to_dense());
    }

    Ok(LocPolyFit {
        coefficients,
        p,
        num_points: zgrid.len(),
    })
}
