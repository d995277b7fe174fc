//! Scalar and SIMD accumulation kernels.
//!
//! ## Purpose
//!
//! This module provides the dot-product, squared-norm, and axpy primitives
//! that dominate the cost of every coordinate update. Columns of the design
//! matrix are stored contiguously, so these loops are the hot path of the
//! whole crate.
//!
//! ## Design notes
//!
//! * **Two-lane SIMD**: the `f64` implementations accumulate with
//!   `wide::f64x2`; `f32` and generic floats use the scalar twins.
//! * **Bridging trait**: [`AccumulateLinalg`] selects the fastest available
//!   implementation per float type, keeping callers generic.
//!
//! ## Invariants
//!
//! * All functions assume equal-length slices; mismatches are a programming
//!   error checked by `debug_assert`.
//!
//! ## Non-goals
//!
//! * This module does not solve linear systems (see `math::linalg`).

// External dependencies
use num_traits::Float;
use wide::f64x2;

// ============================================================================
// Scalar Kernels
// ============================================================================

/// Dot product, scalar accumulation.
#[inline]
pub fn dot_scalar<T: Float>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    let mut acc = T::zero();
    for i in 0..a.len() {
        acc = acc + a[i] * b[i];
    }
    acc
}

/// Three-slice weighted dot product `sum_i w_i * a_i * b_i`, scalar.
#[inline]
pub fn weighted_dot_scalar<T: Float>(w: &[T], a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), w.len());
    let mut acc = T::zero();
    for i in 0..a.len() {
        acc = acc + w[i] * a[i] * b[i];
    }
    acc
}

/// Squared Euclidean norm, scalar.
#[inline]
pub fn norm_sq_scalar<T: Float>(a: &[T]) -> T {
    let mut acc = T::zero();
    for &ai in a {
        acc = acc + ai * ai;
    }
    acc
}

/// In-place `y += alpha * x`, scalar.
#[inline]
pub fn axpy_scalar<T: Float>(alpha: T, x: &[T], y: &mut [T]) {
    debug_assert_eq!(x.len(), y.len());
    for i in 0..x.len() {
        y[i] = y[i] + alpha * x[i];
    }
}

// ============================================================================
// SIMD Kernels (f64)
// ============================================================================

/// Dot product with two-lane f64 SIMD accumulation.
pub fn dot_f64_simd(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let n = a.len();
    let pairs = n / 2;
    let mut acc = f64x2::splat(0.0);
    for i in 0..pairs {
        let va = f64x2::new([a[2 * i], a[2 * i + 1]]);
        let vb = f64x2::new([b[2 * i], b[2 * i + 1]]);
        acc = va.mul_add(vb, acc);
    }
    let lanes = acc.to_array();
    let mut total = lanes[0] + lanes[1];
    if n % 2 == 1 {
        total += a[n - 1] * b[n - 1];
    }
    total
}

/// Weighted dot product with two-lane f64 SIMD accumulation.
pub fn weighted_dot_f64_simd(w: &[f64], a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), w.len());
    let n = a.len();
    let pairs = n / 2;
    let mut acc = f64x2::splat(0.0);
    for i in 0..pairs {
        let vw = f64x2::new([w[2 * i], w[2 * i + 1]]);
        let va = f64x2::new([a[2 * i], a[2 * i + 1]]);
        let vb = f64x2::new([b[2 * i], b[2 * i + 1]]);
        acc = (vw * va).mul_add(vb, acc);
    }
    let lanes = acc.to_array();
    let mut total = lanes[0] + lanes[1];
    if n % 2 == 1 {
        total += w[n - 1] * a[n - 1] * b[n - 1];
    }
    total
}

/// Squared Euclidean norm with two-lane f64 SIMD accumulation.
pub fn norm_sq_f64_simd(a: &[f64]) -> f64 {
    let n = a.len();
    let pairs = n / 2;
    let mut acc = f64x2::splat(0.0);
    for i in 0..pairs {
        let va = f64x2::new([a[2 * i], a[2 * i + 1]]);
        acc = va.mul_add(va, acc);
    }
    let lanes = acc.to_array();
    let mut total = lanes[0] + lanes[1];
    if n % 2 == 1 {
        total += a[n - 1] * a[n - 1];
    }
    total
}

// ============================================================================
// AccumulateLinalg Trait
// ============================================================================

/// Bridges generic `Float` code to the fastest accumulation kernels
/// available for the concrete type.
pub trait AccumulateLinalg: Float + 'static {
    /// Dot product of two equal-length slices.
    fn dot(a: &[Self], b: &[Self]) -> Self;
    /// Weighted dot product `sum_i w_i * a_i * b_i`.
    fn weighted_dot(w: &[Self], a: &[Self], b: &[Self]) -> Self;
    /// Squared Euclidean norm.
    fn norm_sq(a: &[Self]) -> Self;
    /// In-place `y += alpha * x`.
    fn axpy(alpha: Self, x: &[Self], y: &mut [Self]);
}

impl AccumulateLinalg for f64 {
    #[inline]
    fn dot(a: &[Self], b: &[Self]) -> Self {
        dot_f64_simd(a, b)
    }
    #[inline]
    fn weighted_dot(w: &[Self], a: &[Self], b: &[Self]) -> Self {
        weighted_dot_f64_simd(w, a, b)
    }
    #[inline]
    fn norm_sq(a: &[Self]) -> Self {
        norm_sq_f64_simd(a)
    }
    #[inline]
    fn axpy(alpha: Self, x: &[Self], y: &mut [Self]) {
        axpy_scalar(alpha, x, y)
    }
}

impl AccumulateLinalg for f32 {
    #[inline]
    fn dot(a: &[Self], b: &[Self]) -> Self {
        dot_scalar(a, b)
    }
    #[inline]
    fn weighted_dot(w: &[Self], a: &[Self], b: &[Self]) -> Self {
        weighted_dot_scalar(w, a, b)
    }
    #[inline]
    fn norm_sq(a: &[Self]) -> Self {
        norm_sq_scalar(a)
    }
    #[inline]
    fn axpy(alpha: Self, x: &[Self], y: &mut [Self]) {
        axpy_scalar(alpha, x, y)
    }
}
