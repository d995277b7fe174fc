//! Linear algebra backend abstraction.
//!
//! ## Purpose
//!
//! This module provides a trait-based abstraction over the dense linear
//! algebra operations the solvers need but never inline: solving small
//! weighted normal-equation systems (post-selection refits) and computing
//! the largest eigenvalue of a group's Gram block (Lipschitz step sizes).
//!
//! ## Design notes
//!
//! * Uses QR decomposition (Householder reflections) with an SVD fallback
//!   for rank-deficient systems.
//! * Eigenvalues come from the symmetric eigendecomposition; callers pass
//!   symmetric blocks by construction.
//! * Generic over `FloatLinalg` types (f32 and f64) which delegate to the
//!   nalgebra backend.
//!
//! ## Non-goals
//!
//! * This module does not build the normal equations (callers accumulate
//!   them with `math::accumulate`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// FloatLinalg Trait
// ============================================================================

/// Helper trait to bridge generic Float types to the nalgebra backend.
pub trait FloatLinalg: Float + 'static {
    /// Solve the normal equations `A * beta = b` for a square system.
    fn solve_normal(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>>;
    /// Largest eigenvalue of a symmetric `n x n` matrix.
    fn max_eigenvalue(a: &[Self], n: usize) -> Option<Self>;
}

impl FloatLinalg for f64 {
    #[inline]
    fn solve_normal(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_normal_equations_f64(a, b, n)
    }
    #[inline]
    fn max_eigenvalue(a: &[Self], n: usize) -> Option<Self> {
        nalgebra_backend::max_eigenvalue_f64(a, n)
    }
}

impl FloatLinalg for f32 {
    #[inline]
    fn solve_normal(a: &[Self], b: &[Self], n: usize) -> Option<Vec<Self>> {
        nalgebra_backend::solve_normal_equations_f32(a, b, n)
    }
    #[inline]
    fn max_eigenvalue(a: &[Self], n: usize) -> Option<Self> {
        nalgebra_backend::max_eigenvalue_f32(a, n)
    }
}

// ============================================================================
// Nalgebra Backend Implementation
// ============================================================================

/// Nalgebra-based linear algebra operations.
pub mod nalgebra_backend {
    use super::*;
    use nalgebra::{DMatrix, DVector};

    /// Solve normal equations A * beta = b using f64 precision.
    pub fn solve_normal_equations_f64(a: &[f64], b: &[f64], n: usize) -> Option<Vec<f64>> {
        let matrix = DMatrix::from_column_slice(n, n, a);
        let rhs = DVector::from_column_slice(b);

        let qr = matrix.clone().qr();
        if let Some(solution) = qr.solve(&rhs) {
            return Some(solution.as_slice().to_vec());
        }

        matrix
            .svd(true, true)
            .solve(&rhs, f64::EPSILON * 100.0)
            .ok()
            .map(|s: DVector<f64>| s.as_slice().to_vec())
    }

    /// Largest eigenvalue of a symmetric matrix using f64 precision.
    pub fn max_eigenvalue_f64(a: &[f64], n: usize) -> Option<f64> {
        if n == 0 {
            return None;
        }
        let matrix = DMatrix::from_column_slice(n, n, a);
        let eigen = matrix.symmetric_eigen();
        eigen.eigenvalues.iter().copied().reduce(f64::max)
    }

    /// Solve normal equations A * beta = b using f32 precision.
    pub fn solve_normal_equations_f32(a: &[f32], b: &[f32], n: usize) -> Option<Vec<f32>> {
        let matrix = DMatrix::from_column_slice(n, n, a);
        let rhs = DVector::from_column_slice(b);

        let qr = matrix.clone().qr();
        if let Some(solution) = qr.solve(&rhs) {
            return Some(solution.as_slice().to_vec());
        }

        matrix
            .svd(true, true)
            .solve(&rhs, f32::EPSILON * 100.0)
            .ok()
            .map(|s: DVector<f32>| s.as_slice().to_vec())
    }

    /// Largest eigenvalue of a symmetric matrix using f32 precision.
    pub fn max_eigenvalue_f32(a: &[f32], n: usize) -> Option<f32> {
        if n == 0 {
            return None;
        }
        let matrix = DMatrix::from_column_slice(n, n, a);
        let eigen = matrix.symmetric_eigen();
        eigen.eigenvalues.iter().copied().reduce(f32::max)
    }
}
