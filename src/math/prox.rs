//! Proximal operators for sparsity-inducing penalties.
//!
//! ## Purpose
//!
//! This module provides the proximal operators combined with the smooth
//! losses during coordinate descent: scalar soft-thresholding for L1
//! penalties, per-coordinate thresholds for weighted L1, and block
//! soft-thresholding for group-L2 penalties.
//!
//! ## Design notes
//!
//! * **Pure functions**: proximal maps are stateless; [`Penalty`] only
//!   stores the weights.
//! * **Closed set**: penalties form a closed enum; the small fixed set lets
//!   the driver stay monomorphic per call.
//!
//! ## Key concepts
//!
//! * **Soft threshold**: `S(z, t) = sign(z) * max(|z| - t, 0)`.
//! * **Block soft threshold**: scales a coordinate block by
//!   `max(1 - t/||v||, 0)`.
//!
//! ## Invariants
//!
//! * Thresholds are non-negative; a zero weight means "unpenalized" and such
//!   coordinates are never pruned for having zero magnitude.
//! * `block_soft_threshold` maps a zero-norm block to the zero block (no
//!   division by zero).
//!
//! ## Non-goals
//!
//! * This module does not compute step sizes; the losses fold the local
//!   curvature into the effective threshold before calling in.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Scalar Proximal Maps
// ============================================================================

/// Scalar soft-thresholding operator.
///
/// Returns `sign(z) * max(|z| - t, 0)`. For `t = 0` this is the identity.
#[inline]
pub fn soft_threshold<T: Float>(z: T, t: T) -> T {
    if z > t {
        z - t
    } else if z < -t {
        z + t
    } else {
        T::zero()
    }
}

/// Block soft-thresholding operator (group-L2 proximal map).
///
/// Scales `v` in place by `max(1 - t/||v||, 0)`. A zero-norm block stays
/// zero.
pub fn block_soft_threshold<T: Float>(v: &mut [T], t: T) {
    let mut norm_sq = T::zero();
    for &vi in v.iter() {
        norm_sq = norm_sq + vi * vi;
    }
    let norm = norm_sq.sqrt();
    if norm <= t {
        for vi in v.iter_mut() {
            *vi = T::zero();
        }
    } else {
        let scale = T::one() - t / norm;
        for vi in v.iter_mut() {
            *vi = *vi * scale;
        }
    }
}

// ============================================================================
// Penalty Enum
// ============================================================================

/// Coordinate-separable sparsity penalty.
///
/// Group-L2 penalties are handled by the group solver directly through
/// [`block_soft_threshold`] and a per-group weight slice; they do not appear
/// here because they are not coordinate-separable.
#[derive(Debug, Clone, PartialEq)]
pub enum Penalty<T> {
    /// Uniform L1 penalty with a single scalar weight.
    L1(T),

    /// Weighted L1 penalty with one non-negative weight per coordinate.
    WeightedL1(Vec<T>),
}

impl<T: Float> Penalty<T> {
    /// Get the name of the penalty.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Penalty::L1(_) => "L1",
            Penalty::WeightedL1(_) => "WeightedL1",
        }
    }

    /// Threshold weight for coordinate `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k` is out of range for a weighted penalty.
    #[inline]
    pub fn threshold(&self, k: usize) -> T {
        match self {
            Penalty::L1(lambda) => *lambda,
            Penalty::WeightedL1(weights) => weights[k],
        }
    }

    /// Length of the weight vector, if the penalty carries one.
    #[inline]
    pub fn weight_len(&self) -> Option<usize> {
        match self {
            Penalty::L1(_) => None,
            Penalty::WeightedL1(weights) => Some(weights.len()),
        }
    }
}
