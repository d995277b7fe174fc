//! Smoothing kernels for local polynomial regression.
//!
//! ## Purpose
//!
//! This module provides the kernel functions that turn distances along the
//! smoothing variable into observation weights for the local polynomial
//! layer.
//!
//! ## Design notes
//!
//! * **Normalization-free**: weights are renormalized by the caller, so the
//!   kernels omit their density-normalizing constants.
//! * **Support**: the Epanechnikov kernel is bounded on [-1, 1]; the
//!   Gaussian kernel is cut off once its value is negligible.
//!
//! ## Invariants
//!
//! * Kernels are non-negative and symmetric.
//! * Bounded kernels return exactly zero outside their support.
//!
//! ## Non-goals
//!
//! * This module does not perform weight normalization.
//! * This module does not handle bandwidth selection (see
//!   `evaluation::cv`).

// External dependencies
use num_traits::Float;

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Cutoff for Gaussian kernel evaluation.
///
/// Beyond this normalized distance, the Gaussian kernel value is effectively
/// zero (exp(-6^2/2) approx 6.9e-9). This prevents numerical underflow.
const GAUSSIAN_CUTOFF: f64 = 6.0;

// ============================================================================
// Kernel Function Enum
// ============================================================================

/// Smoothing kernel for local polynomial regression.
///
/// Each kernel defines a function K: R -> [0, inf) mapping normalized
/// distances `u = (z - z0) / h` to weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelFunction {
    /// Gaussian kernel: K(u) = exp(-u^2 / 2).
    #[default]
    Gaussian,

    /// Epanechnikov kernel: K(u) = (1 - u^2) for |u| < 1.
    Epanechnikov,
}

impl KernelFunction {
    /// Get the name of the kernel.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            KernelFunction::Gaussian => "Gaussian",
            KernelFunction::Epanechnikov => "Epanechnikov",
        }
    }

    /// Returns the support interval for bounded kernels.
    #[inline]
    pub fn support(&self) -> Option<(f64, f64)> {
        match self {
            KernelFunction::Gaussian => None,
            KernelFunction::Epanechnikov => Some((-1.0, 1.0)),
        }
    }

    /// Evaluate the kernel at a normalized distance `u`.
    #[inline]
    pub fn evaluate<T: Float>(&self, u: T) -> T {
        match self {
            KernelFunction::Gaussian => {
                let cutoff = T::from(GAUSSIAN_CUTOFF).unwrap();
                if u.abs() > cutoff {
                    T::zero()
                } else {
                    (-u * u / (T::one() + T::one())).exp()
                }
            }
            KernelFunction::Epanechnikov => {
                if u.abs() < T::one() {
                    T::one() - u * u
                } else {
                    T::zero()
                }
            }
        }
    }

    /// Evaluate the kernel weight of observation `z` around center `z0` with
    /// bandwidth `h`.
    #[inline]
    pub fn weight<T: Float>(&self, z: T, z0: T, h: T) -> T {
        self.evaluate((z - z0) / h)
    }
}
