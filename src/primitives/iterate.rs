//! Sparse optimization iterate with active-set tracking.
//!
//! ## Purpose
//!
//! This module provides [`SparseIterate`], the container holding the
//! optimization variable during a coordinate-descent solve. It combines a
//! dense value store with an explicit list of "active" indices (positions
//! ever touched by a nonzero write), so that active-only sweeps and zero
//! pruning are cheap.
//!
//! ## Design notes
//!
//! * **Dense backing**: values live in a flat `Vec<T>` for O(1) reads; the
//!   active list only governs iteration order and pruning.
//! * **Destructive mutation**: the iterate is created once per solve (or
//!   reused across warm-started solves) and mutated in place by the driver.
//! * **Stable order**: active indices iterate in insertion order, which is
//!   stable across repeated calls between mutations.
//!
//! ## Key concepts
//!
//! * **Active set**: indices permitted nonzero values; everything else is
//!   treated as exactly zero.
//! * **Zero pruning**: [`SparseIterate::drop_zeros`] removes active entries
//!   whose stored value is exactly zero, in O(active-set size).
//!
//! ## Invariants
//!
//! * Indices not in the active set hold exactly zero.
//! * After `drop_zeros`, the active set is disjoint from indices holding
//!   exact zero.
//! * The dimensionality is fixed at construction; the iterate is never
//!   resized.
//!
//! ## Non-goals
//!
//! * This module does not perform any numerical optimization.
//! * This module does not validate coordinate values (NaN writes are the
//!   caller's bug, surfaced downstream by the degeneracy checks).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Sparse Iterate
// ============================================================================

/// Sparse vector for the optimization variable, with active-set tracking.
///
/// Out-of-range indices are a programming error and panic, matching slice
/// indexing semantics.
#[derive(Debug, Clone)]
pub struct SparseIterate<T> {
    /// Dense value store of length `p`. Inactive positions hold zero.
    values: Vec<T>,

    /// Active indices in insertion order.
    active: Vec<usize>,

    /// O(1) membership mask for the active set.
    is_active: Vec<bool>,
}

impl<T: Float> SparseIterate<T> {
    /// Create a zero iterate of dimensionality `p`.
    pub fn new(p: usize) -> Self {
        let mut values = Vec::new();
        values.resize(p, T::zero());
        let mut is_active = Vec::new();
        is_active.resize(p, false);
        SparseIterate {
            values,
            active: Vec::new(),
            is_active,
        }
    }

    /// Fixed dimensionality `p`.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the dimensionality is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of currently active indices.
    #[inline]
    pub fn num_active(&self) -> usize {
        self.active.len()
    }

    /// Read coordinate `k` (zero if inactive).
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.len()`.
    #[inline]
    pub fn get(&self, k: usize) -> T {
        self.values[k]
    }

    /// Write coordinate `k`, activating it on the first nonzero write.
    ///
    /// Writing zero to an inactive coordinate is a no-op; writing zero to an
    /// already-active coordinate keeps it active until the next
    /// [`SparseIterate::drop_zeros`].
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.len()`.
    #[inline]
    pub fn set(&mut self, k: usize, v: T) {
        if !self.is_active[k] {
            if v == T::zero() {
                return;
            }
            self.is_active[k] = true;
            self.active.push(k);
        }
        self.values[k] = v;
    }

    /// Whether coordinate `k` is currently in the active set.
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.len()`.
    #[inline]
    pub fn is_active(&self, k: usize) -> bool {
        self.is_active[k]
    }

    /// Remove active entries whose stored value is exactly zero.
    ///
    /// Amortized O(active-set size); preserves the relative order of the
    /// surviving indices.
    pub fn drop_zeros(&mut self) {
        let values = &self.values;
        let is_active = &mut self.is_active;
        self.active.retain(|&k| {
            if values[k] == T::zero() {
                is_active[k] = false;
                false
            } else {
                true
            }
        });
    }

    /// Iterate over the active indices in a stable (insertion) order.
    ///
    /// The returned iterator is finite and may be restarted by calling this
    /// method again.
    #[inline]
    pub fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.iter().copied()
    }

    /// Reset to the zero vector, clearing the active set.
    pub fn clear(&mut self) {
        for &k in &self.active {
            self.values[k] = T::zero();
            self.is_active[k] = false;
        }
        self.active.clear();
    }

    /// Materialize the iterate as a dense vector of length `p`.
    pub fn to_dense(&self) -> Vec<T> {
        self.values.clone()
    }
}
