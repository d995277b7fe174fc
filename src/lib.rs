//! # sparsereg — Proximal coordinate descent for sparse linear models
//!
//! A coordinate-descent engine for sparsity-penalized linear regression:
//! the Lasso (uniform and weighted), the square-root Lasso, and the group
//! Lasso, plus kernel-weighted local polynomial regression with
//! leave-one-out bandwidth selection built on top of the same solver.
//!
//! ## How it works
//!
//! Every solver minimizes `smooth loss + sparsity penalty` one coordinate
//! at a time. Each coordinate update is a closed-form proximal step
//! (soft-thresholding against the local curvature), and a residual cache
//! makes each step O(n). Two ingredients keep the solvers fast on sparse
//! problems:
//!
//! 1. **Active-set sweeps**: after a full pass over all coordinates, the
//!    engine repeatedly re-optimizes only the nonzero coordinates, falling
//!    back to full passes to catch new entries.
//! 2. **Continuation**: cold starts follow a geometric sequence of penalty
//!    scales from the zero-optimal penalty down to the target, warm-starting
//!    each step from the previous solution.
//!
//! For data-reduced problems the Gram-statistics solvers
//! ([`prelude::GramStats`], `active_shooting_lasso`,
//! `active_shooting_group_lasso`) operate on `X'X/n` and `X'y/n` instead of
//! the raw design, adding one violating coordinate (or group) per round
//! until the KKT conditions hold everywhere.
//!
//! ## Quick Start
//!
//! ```rust
//! use sparsereg_rs::prelude::*;
//!
//! // (1/2n) ||y - X b||^2 + lambda ||b||_1 with an identity design:
//! // each coordinate is soft-thresholded at n * lambda.
//! let x: Vec<f64> = vec![1.0, 0.0, 0.0, 1.0]; // row-major 2 x 2
//! let y = vec![3.0, 0.0];
//! let beta = lasso(&x, &y, 0.5, &CDOptions::default())?;
//!
//! assert!((beta[0] - 2.0).abs() < 1e-6);
//! assert_eq!(beta[1], 0.0);
//! # Result::<(), SparseRegError>::Ok(())
//! ```
//!
//! ### Group Lasso
//!
//! Coordinates are penalized in contiguous blocks by their joint L2 norm;
//! single-coordinate groups reduce to the Lasso.
//!
//! ```rust
//! use sparsereg_rs::prelude::*;
//!
//! let x: Vec<f64> = vec![1.0, 0.0, 0.0, 1.0];
//! let y = vec![3.0, 0.0];
//! let groups = [0..1, 1..2];
//! let beta = group_lasso(&x, &y, &groups, &[0.5, 0.5], &CDOptions::default())?;
//!
//! assert!((beta[0] - 2.0).abs() < 1e-4);
//! assert_eq!(beta[1], 0.0);
//! # Result::<(), SparseRegError>::Ok(())
//! ```
//!
//! ### Local polynomial regression
//!
//! Fit an L1-penalized, kernel-weighted polynomial expansion of the
//! covariates at each point of an evaluation grid:
//!
//! ```rust
//! use sparsereg_rs::prelude::*;
//!
//! // One covariate (all ones), constant response: the degree-0
//! // coefficient recovers the response level, minus the L1 shrinkage.
//! let n = 20;
//! let x = vec![1.0; n];
//! let z: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
//! let y = vec![2.0; n];
//!
//! let fit = locpoly_l1(
//!     &x, &z, &y,
//!     &[0.25, 0.5, 0.75], // evaluation grid
//!     0,                  // polynomial degree
//!     Gaussian,
//!     0.3,                // bandwidth
//!     0.01,               // penalty
//!     &CDOptions::default(),
//! )?;
//!
//! assert_eq!(fit.num_points(), 3);
//! assert!((fit.column(1)[0] - 2.0).abs() < 0.05);
//! # Result::<(), SparseRegError>::Ok(())
//! ```
//!
//! Bandwidths are selected by leave-one-out cross-validation with an
//! unpenalized refit on the selected support (`locpoly_loocv` /
//! `best_bandwidth`).
//!
//! ### Error handling
//!
//! Fallible operations return `Result<_, SparseRegError>`; the `?` operator
//! is idiomatic. Non-convergence is *not* an error: solvers that expose a
//! [`prelude::CDResult`] report it through
//! [`prelude::ConvergenceStatus::MaxIterationsReached`], and the iterate
//! keeps the best approximation found.
//!
//! ## no_std
//!
//! The crate supports `no_std` environments (with `alloc`). Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! sparsereg_rs = { version = "0.1", default-features = false }
//! ```
//!
//! ## References
//!
//! - Friedman, J., Hastie, T. & Tibshirani, R. (2010). "Regularization
//!   Paths for Generalized Linear Models via Coordinate Descent"
//! - Belloni, A., Chernozhukov, V. & Wang, L. (2011). "Square-root lasso:
//!   pivotal recovery of sparse signals via conic programming"
//! - Peng, J. et al. (2009). "Partial Correlation Estimation by Joint
//!   Sparse Regression Models"

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the sparse iterate with active-set tracking, solver options,
// convergence reporting, and the error taxonomy.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains proximal operators, smoothing kernels, polynomial basis
// expansion, scalar/SIMD accumulation kernels, and the linear algebra
// backend abstraction.
mod math;

// Layer 3: Algorithms - core solvers.
//
// Contains the coordinate-differentiable losses with incremental residual
// maintenance and the Gram-statistics active-shooting solvers.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
//
// Contains input validation, the full/active-only pass state machine with
// its two-pass convergence rule, and the continuation schedule.
mod engine;

// Layer 5: Evaluation - applying the solver to data.
//
// Contains penalized local polynomial regression over evaluation grids and
// leave-one-out bandwidth selection.
mod evaluation;

// High-level API for sparse regression.
//
// Provides the one-call solvers and the quantile-regression LP assembly.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard sparse-regression prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used functions and types:
///
/// ```
/// use sparsereg_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        active_shooting_group_lasso, active_shooting_lasso, best_bandwidth, coordinate_descent,
        group_lasso, lambda_max, lasso, locpoly_l1, locpoly_loocv, quantreg, sqrt_lasso,
        weighted_lasso, AccumulateLinalg, CDOptions, CDResult, ConvergenceStatus, FloatLinalg,
        GramStats, KernelFunction,
        KernelFunction::{Epanechnikov, Gaussian},
        LeastSquares, LocPolyFit, Loss, Penalty, QuantRegBackend, Quadratic, SparseIterate,
        SparseRegError, SqrtLasso, WeightedLeastSquares,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation layer.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
