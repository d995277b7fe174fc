//! Polynomial basis expansion for local polynomial regression.
//!
//! ## Purpose
//!
//! This module expands covariate rows into polynomial-in-`(z - z0)` design
//! rows. For `q` covariates and degree `d`, each row widens to
//! `q * (d + 1)` columns.
//!
//! ## Key concepts
//!
//! * **Column layout**: covariate-major. Columns for covariate `j` occupy
//!   the contiguous block `j*(d+1) .. (j+1)*(d+1)`, ordered by increasing
//!   power of `(z - z0)`. The degree-0 column of each block is the
//!   covariate itself, so a fitted coefficient vector predicts at `z = z0`
//!   through the degree-0 columns alone.
//!
//! ## Invariants
//!
//! * `expand_row` writes exactly `expanded_width(q, degree)` values.
//!
//! ## Non-goals
//!
//! * This module does not apply kernel weights (see `math::kernel`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Basis Expansion
// ============================================================================

/// Width of an expanded design row.
#[inline]
pub const fn expanded_width(q: usize, degree: usize) -> usize {
    q * (degree + 1)
}

/// Expand a single covariate row around `z0`.
///
/// `dz` is `z_i - z0` for the observation being expanded. `out` must have
/// length `expanded_width(x_row.len(), degree)`.
pub fn expand_row<T: Float>(x_row: &[T], dz: T, degree: usize, out: &mut [T]) {
    debug_assert_eq!(out.len(), expanded_width(x_row.len(), degree));
    for (j, &xj) in x_row.iter().enumerate() {
        let mut power = T::one();
        let base = j * (degree + 1);
        for d in 0..=degree {
            out[base + d] = xj * power;
            power = power * dz;
        }
    }
}

/// Expand a full design matrix around the evaluation point `z0`.
///
/// `x` is row-major `n x q`; the result is row-major
/// `n x expanded_width(q, degree)`.
pub fn expand_design<T: Float>(
    x: &[T],
    z: &[T],
    z0: T,
    q: usize,
    degree: usize,
) -> Vec<T> {
    let n = z.len();
    let p = expanded_width(q, degree);
    let mut design = Vec::new();
    design.resize(n * p, T::zero());
    for i in 0..n {
        let dz = z[i] - z0;
        expand_row(&x[i * q..(i + 1) * q], dz, degree, &mut design[i * p..(i + 1) * p]);
    }
    design
}
