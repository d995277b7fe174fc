//! Coordinate-differentiable loss functions.
//!
//! ## Purpose
//!
//! This module provides the losses the coordinate-descent driver can
//! minimize: least squares, weighted least squares, the square-root lasso
//! loss, and a generic quadratic. Each loss owns its data and (except the
//! quadratic) a residual cache, and knows how to take one proximal
//! coordinate step.
//!
//! ## Design notes
//!
//! * **Closed set**: losses form the [`Loss`] enum; the fixed variant set
//!   keeps the driver monomorphic per call and dispatch branch-predictable.
//! * **Column-major storage**: design matrices are transposed into
//!   column-major form at construction so that the per-coordinate dot
//!   products run over contiguous memory (see `math::accumulate`).
//! * **Normalization**: the smooth losses are averaged over `n`
//!   (objective `(1/2n)||y - X beta||^2` and its weighted twin), so their
//!   curvature/correlation statistics are directly comparable to Gram
//!   statistics `X'X/n`, `X'y/n`. The square-root lasso uses the
//!   unnormalized residual norm, matching its closed-form update.
//!
//! ## Key concepts
//!
//! * **Capability set**: `initialize`, `num_coordinates`,
//!   `gradient_coordinate`, `descend_coordinate`.
//! * **Incremental residuals**: every coordinate step applies an O(n)
//!   correction `r -= X_k * delta`; the full residual is recomputed only by
//!   `initialize`.
//!
//! ## Invariants
//!
//! * Whenever the driver runs coordinate updates, the residual cache equals
//!   `y - X * x` for the current iterate; the driver guarantees this by
//!   calling `initialize` before any update sequence.
//! * `descend_coordinate` returns the signed change applied (zero if the
//!   coordinate did not move).
//! * Numerical degeneracies (zero curvature, the square-root-lasso guard)
//!   surface as errors instead of NaN/Inf.
//!
//! ## Non-goals
//!
//! * This module does not decide sweep order or convergence (see
//!   `engine::driver`).
//! * This module does not validate input finiteness (see
//!   `engine::validator`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::math::accumulate::AccumulateLinalg;
use crate::math::prox::soft_threshold;
use crate::primitives::errors::SparseRegError;
use crate::primitives::iterate::SparseIterate;

// ============================================================================
// Shared Column Storage
// ============================================================================

/// Transpose a row-major `n x p` design matrix into column-major storage.
fn to_columns<T: AccumulateLinalg>(x: &[T], n: usize, p: usize) -> Vec<T> {
    let mut cols = Vec::new();
    cols.resize(n * p, T::zero());
    for i in 0..n {
        for k in 0..p {
            cols[k * n + i] = x[i * p + k];
        }
    }
    cols
}

/// Shape-check a flattened row-major design against its response vector.
fn design_shape<T>(x: &[T], y: &[T]) -> Result<(usize, usize), SparseRegError> {
    let n = y.len();
    if n == 0 || x.is_empty() {
        return Err(SparseRegError::EmptyInput);
    }
    if x.len() % n != 0 {
        return Err(SparseRegError::MalformedDesign { x_len: x.len(), n });
    }
    Ok((n, x.len() / n))
}

// ============================================================================
// Least Squares
// ============================================================================

/// Least-squares loss `(1/2n) ||y - X beta||^2` with a residual cache.
#[derive(Debug, Clone)]
pub struct LeastSquares<T> {
    /// Column-major design matrix, `p` contiguous columns of length `n`.
    cols: Vec<T>,
    y: Vec<T>,
    n: usize,
    p: usize,
    n_float: T,
    /// Unnormalized squared column norms `||X_k||^2`.
    col_sq: Vec<T>,
    residual: Vec<T>,
}

impl<T: AccumulateLinalg> LeastSquares<T> {
    /// Build from a row-major `n x p` design and response of length `n`.
    pub fn new(x: &[T], y: &[T]) -> Result<Self, SparseRegError> {
        let (n, p) = design_shape(x, y)?;
        let cols = to_columns(x, n, p);
        let col_sq = (0..p).map(|k| T::norm_sq(&cols[k * n..(k + 1) * n])).collect();
        Ok(LeastSquares {
            cols,
            y: y.to_vec(),
            n,
            p,
            n_float: T::from(n).unwrap(),
            col_sq,
            residual: y.to_vec(),
        })
    }

    #[inline]
    fn col(&self, k: usize) -> &[T] {
        &self.cols[k * self.n..(k + 1) * self.n]
    }

    fn rebuild_residual(&mut self, x: &SparseIterate<T>) {
        self.residual.copy_from_slice(&self.y);
        for k in x.active_indices() {
            let xk = x.get(k);
            if xk != T::zero() {
                T::axpy(-xk, &self.cols[k * self.n..(k + 1) * self.n], &mut self.residual);
            }
        }
    }

    fn gradient(&self, k: usize) -> T {
        -T::dot(self.col(k), &self.residual) / self.n_float
    }

    fn descend(
        &mut self,
        x: &mut SparseIterate<T>,
        k: usize,
        threshold: T,
    ) -> Result<T, SparseRegError> {
        let a = self.col_sq[k] / self.n_float;
        if a <= T::zero() {
            return Err(SparseRegError::NumericDegeneracy(format!(
                "zero curvature at coordinate {}",
                k
            )));
        }
        let b = T::dot(self.col(k), &self.residual) / self.n_float;
        let old = x.get(k);
        let new = soft_threshold(old + b / a, threshold / a);
        let delta = new - old;
        if delta != T::zero() {
            let n = self.n;
            T::axpy(-delta, &self.cols[k * n..(k + 1) * n], &mut self.residual);
            x.set(k, new);
        }
        Ok(delta)
    }
}

// ============================================================================
// Weighted Least Squares
// ============================================================================

/// Weighted least-squares loss `(1/2n) sum_i w_i (y_i - x_i' beta)^2`.
///
/// This is the loss the local polynomial layer fits, with kernel weights.
#[derive(Debug, Clone)]
pub struct WeightedLeastSquares<T> {
    cols: Vec<T>,
    y: Vec<T>,
    weights: Vec<T>,
    n: usize,
    p: usize,
    n_float: T,
    /// Weighted squared column norms `sum_i w_i x_ik^2`.
    col_sq: Vec<T>,
    residual: Vec<T>,
}

impl<T: AccumulateLinalg> WeightedLeastSquares<T> {
    /// Build from a row-major design, response, and elementwise weights.
    pub fn new(x: &[T], y: &[T], weights: &[T]) -> Result<Self, SparseRegError> {
        let (n, p) = design_shape(x, y)?;
        if weights.len() != n {
            return Err(SparseRegError::DimensionMismatch {
                expected: n,
                got: weights.len(),
                what: "weight vector length",
            });
        }
        let cols = to_columns(x, n, p);
        let col_sq = (0..p)
            .map(|k| {
                let col = &cols[k * n..(k + 1) * n];
                T::weighted_dot(weights, col, col)
            })
            .collect();
        Ok(WeightedLeastSquares {
            cols,
            y: y.to_vec(),
            weights: weights.to_vec(),
            n,
            p,
            n_float: T::from(n).unwrap(),
            col_sq,
            residual: y.to_vec(),
        })
    }

    #[inline]
    fn col(&self, k: usize) -> &[T] {
        &self.cols[k * self.n..(k + 1) * self.n]
    }

    fn rebuild_residual(&mut self, x: &SparseIterate<T>) {
        self.residual.copy_from_slice(&self.y);
        for k in x.active_indices() {
            let xk = x.get(k);
            if xk != T::zero() {
                T::axpy(-xk, &self.cols[k * self.n..(k + 1) * self.n], &mut self.residual);
            }
        }
    }

    fn gradient(&self, k: usize) -> T {
        -T::weighted_dot(&self.weights, self.col(k), &self.residual) / self.n_float
    }

    fn descend(
        &mut self,
        x: &mut SparseIterate<T>,
        k: usize,
        threshold: T,
    ) -> Result<T, SparseRegError> {
        let a = self.col_sq[k] / self.n_float;
        if a <= T::zero() {
            return Err(SparseRegError::NumericDegeneracy(format!(
                "zero weighted curvature at coordinate {}",
                k
            )));
        }
        let b = T::weighted_dot(&self.weights, self.col(k), &self.residual) / self.n_float;
        let old = x.get(k);
        let new = soft_threshold(old + b / a, threshold / a);
        let delta = new - old;
        if delta != T::zero() {
            let n = self.n;
            T::axpy(-delta, &self.cols[k * n..(k + 1) * n], &mut self.residual);
            x.set(k, new);
        }
        Ok(delta)
    }
}

// ============================================================================
// Square-Root Lasso
// ============================================================================

/// Square-root lasso loss `||y - X beta||_2` with a residual cache.
///
/// The coordinate update has a closed form derived from the subgradient
/// optimality condition. With `s = X_k' r~` (`r~` being the residual with
/// coordinate k's contribution added back), `x_sqr = ||X_k||^2` and
/// `r_sqr = ||r~||^2`, the new coefficient is zero when
/// `|s| <= lambda * sqrt(r_sqr)`, and otherwise
///
/// ```text
/// (s - sign(s) * lambda / sqrt(1 - lambda^2/x_sqr)
///     * sqrt(r_sqr - s^2/x_sqr)) / x_sqr
/// ```
///
/// The update is only valid for `lambda^2 < x_sqr`; the guard failing is
/// reported as [`SparseRegError::NumericDegeneracy`].
#[derive(Debug, Clone)]
pub struct SqrtLasso<T> {
    cols: Vec<T>,
    y: Vec<T>,
    n: usize,
    p: usize,
    col_sq: Vec<T>,
    residual: Vec<T>,
}

impl<T: AccumulateLinalg> SqrtLasso<T> {
    /// Build from a row-major `n x p` design and response of length `n`.
    pub fn new(x: &[T], y: &[T]) -> Result<Self, SparseRegError> {
        let (n, p) = design_shape(x, y)?;
        let cols = to_columns(x, n, p);
        let col_sq = (0..p).map(|k| T::norm_sq(&cols[k * n..(k + 1) * n])).collect();
        Ok(SqrtLasso {
            cols,
            y: y.to_vec(),
            n,
            p,
            col_sq,
            residual: y.to_vec(),
        })
    }

    #[inline]
    fn col(&self, k: usize) -> &[T] {
        &self.cols[k * self.n..(k + 1) * self.n]
    }

    fn rebuild_residual(&mut self, x: &SparseIterate<T>) {
        self.residual.copy_from_slice(&self.y);
        for k in x.active_indices() {
            let xk = x.get(k);
            if xk != T::zero() {
                T::axpy(-xk, &self.cols[k * self.n..(k + 1) * self.n], &mut self.residual);
            }
        }
    }

    fn gradient(&self, k: usize) -> T {
        let norm = T::norm_sq(&self.residual).sqrt();
        if norm == T::zero() {
            T::zero()
        } else {
            -T::dot(self.col(k), &self.residual) / norm
        }
    }

    fn descend(
        &mut self,
        x: &mut SparseIterate<T>,
        k: usize,
        lambda: T,
    ) -> Result<T, SparseRegError> {
        let x_sqr = self.col_sq[k];
        if x_sqr <= T::zero() {
            return Err(SparseRegError::NumericDegeneracy(format!(
                "zero-norm column at coordinate {}",
                k
            )));
        }
        let old = x.get(k);
        // Correlation and norm of the residual with coordinate k added back.
        let c = T::dot(self.col(k), &self.residual);
        let s = c + old * x_sqr;
        let two = T::one() + T::one();
        let r_sqr = T::norm_sq(&self.residual) + two * old * c + old * old * x_sqr;
        let new = if s.abs() <= lambda * r_sqr.sqrt() {
            T::zero()
        } else {
            // The nonzero branch is only defined for lambda^2 < ||X_k||^2;
            // the zero branch above already covers the boundary case where
            // the penalty scale makes the zero coefficient optimal.
            if lambda * lambda >= x_sqr {
                return Err(SparseRegError::NumericDegeneracy(format!(
                    "square-root lasso guard failed at coordinate {}: lambda^2 >= ||X_k||^2",
                    k
                )));
            }
            // Cauchy-Schwarz keeps the inner radicand non-negative; clamp
            // the rounding error.
            let radicand = (r_sqr - s * s / x_sqr).max(T::zero());
            let shrink = lambda / (T::one() - lambda * lambda / x_sqr).sqrt();
            (s - s.signum() * shrink * radicand.sqrt()) / x_sqr
        };
        let delta = new - old;
        if delta != T::zero() {
            let n = self.n;
            T::axpy(-delta, &self.cols[k * n..(k + 1) * n], &mut self.residual);
            x.set(k, new);
        }
        Ok(delta)
    }
}

// ============================================================================
// Quadratic
// ============================================================================

/// Quadratic loss `(1/2) x' A x + b' x` with symmetric `A`.
///
/// Stateless: there is no residual cache, and `initialize` is a no-op.
#[derive(Debug, Clone)]
pub struct Quadratic<T> {
    /// Row-major `p x p` symmetric matrix.
    a: Vec<T>,
    b: Vec<T>,
    p: usize,
}

impl<T: AccumulateLinalg> Quadratic<T> {
    /// Build from a row-major symmetric `p x p` matrix and linear term.
    pub fn new(a: &[T], b: &[T]) -> Result<Self, SparseRegError> {
        let p = b.len();
        if p == 0 {
            return Err(SparseRegError::EmptyInput);
        }
        if a.len() != p * p {
            return Err(SparseRegError::DimensionMismatch {
                expected: p * p,
                got: a.len(),
                what: "quadratic matrix length",
            });
        }
        Ok(Quadratic {
            a: a.to_vec(),
            b: b.to_vec(),
            p,
        })
    }

    fn gradient(&self, x: &SparseIterate<T>, k: usize) -> T {
        let row = &self.a[k * self.p..(k + 1) * self.p];
        let mut acc = self.b[k];
        for j in x.active_indices() {
            acc = acc + row[j] * x.get(j);
        }
        acc
    }

    fn descend(
        &self,
        x: &mut SparseIterate<T>,
        k: usize,
        threshold: T,
    ) -> Result<T, SparseRegError> {
        let a_kk = self.a[k * self.p + k];
        if a_kk <= T::zero() {
            return Err(SparseRegError::NumericDegeneracy(format!(
                "non-positive diagonal at coordinate {}",
                k
            )));
        }
        let grad = self.gradient(x, k);
        let old = x.get(k);
        let new = soft_threshold(old - grad / a_kk, threshold / a_kk);
        let delta = new - old;
        if delta != T::zero() {
            x.set(k, new);
        }
        Ok(delta)
    }
}

// ============================================================================
// Loss Enum
// ============================================================================

/// Closed set of coordinate-differentiable losses.
#[derive(Debug, Clone)]
pub enum Loss<T> {
    /// `(1/2n) ||y - X beta||^2`.
    LeastSquares(LeastSquares<T>),

    /// `(1/2n) sum_i w_i (y_i - x_i' beta)^2`.
    WeightedLeastSquares(WeightedLeastSquares<T>),

    /// `||y - X beta||_2` (square-root lasso).
    SqrtLasso(SqrtLasso<T>),

    /// `(1/2) x' A x + b' x`.
    Quadratic(Quadratic<T>),
}

impl<T: AccumulateLinalg> Loss<T> {
    /// Get the name of the loss.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Loss::LeastSquares(_) => "LeastSquares",
            Loss::WeightedLeastSquares(_) => "WeightedLeastSquares",
            Loss::SqrtLasso(_) => "SqrtLasso",
            Loss::Quadratic(_) => "Quadratic",
        }
    }

    /// Number of coordinates `p` of the optimization variable.
    #[inline]
    pub fn num_coordinates(&self) -> usize {
        match self {
            Loss::LeastSquares(ls) => ls.p,
            Loss::WeightedLeastSquares(wls) => wls.p,
            Loss::SqrtLasso(sl) => sl.p,
            Loss::Quadratic(q) => q.p,
        }
    }

    /// Number of observations `n`, when the loss owns raw data.
    #[inline]
    pub fn num_observations(&self) -> Option<usize> {
        match self {
            Loss::LeastSquares(ls) => Some(ls.n),
            Loss::WeightedLeastSquares(wls) => Some(wls.n),
            Loss::SqrtLasso(sl) => Some(sl.n),
            Loss::Quadratic(_) => None,
        }
    }

    /// Rebuild the residual cache for the given iterate.
    ///
    /// The driver calls this before any sequence of coordinate updates;
    /// afterwards every update maintains the cache incrementally.
    pub fn initialize(&mut self, x: &SparseIterate<T>) {
        match self {
            Loss::LeastSquares(ls) => ls.rebuild_residual(x),
            Loss::WeightedLeastSquares(wls) => wls.rebuild_residual(x),
            Loss::SqrtLasso(sl) => sl.rebuild_residual(x),
            Loss::Quadratic(_) => {}
        }
    }

    /// Partial derivative of the smooth part at the current iterate,
    /// restricted to coordinate `k`.
    ///
    /// Requires a residual cache consistent with `x` (see
    /// [`Loss::initialize`]). For the square-root lasso this is the
    /// derivative of the unnormalized residual norm, and zero at a perfect
    /// fit.
    pub fn gradient_coordinate(&self, x: &SparseIterate<T>, k: usize) -> T {
        match self {
            Loss::LeastSquares(ls) => ls.gradient(k),
            Loss::WeightedLeastSquares(wls) => wls.gradient(k),
            Loss::SqrtLasso(sl) => sl.gradient(k),
            Loss::Quadratic(q) => q.gradient(x, k),
        }
    }

    /// Take one proximal coordinate step on coordinate `k` with effective
    /// penalty weight `threshold`, updating the iterate and residual cache
    /// in place.
    ///
    /// Returns the signed change applied (zero if the coordinate did not
    /// move).
    pub fn descend_coordinate(
        &mut self,
        x: &mut SparseIterate<T>,
        k: usize,
        threshold: T,
    ) -> Result<T, SparseRegError> {
        match self {
            Loss::LeastSquares(ls) => ls.descend(x, k, threshold),
            Loss::WeightedLeastSquares(wls) => wls.descend(x, k, threshold),
            Loss::SqrtLasso(sl) => sl.descend(x, k, threshold),
            Loss::Quadratic(q) => q.descend(x, k, threshold),
        }
    }
}
