//! Input validation for solver configuration and data.
//!
//! ## Purpose
//!
//! This module provides validation functions for solver parameters and
//! input data: lengths, finite values, penalty weights, and option bounds.
//!
//! ## Design notes
//!
//! * **Fail-fast**: validation stops at the first error encountered, and
//!   runs before any caller-owned buffer is mutated.
//! * **Efficiency**: checks are ordered from cheap to expensive.
//! * **Generics**: validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or correct invalid inputs.
//! * This module does not perform any optimization itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::prox::Penalty;
use crate::primitives::errors::SparseRegError;
use crate::primitives::iterate::SparseIterate;
use crate::primitives::options::CDOptions;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for solver configuration and input data.
///
/// Provides static methods returning `Result<(), SparseRegError>` that fail
/// fast upon the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a flattened row-major design matrix against its response.
    ///
    /// Returns the inferred `(n, p)` shape.
    pub fn validate_data<T: Float>(x: &[T], y: &[T]) -> Result<(usize, usize), SparseRegError> {
        // Check 1: Non-empty arrays
        if x.is_empty() || y.is_empty() {
            return Err(SparseRegError::EmptyInput);
        }

        // Check 2: Design length is a multiple of the response length
        let n = y.len();
        if x.len() % n != 0 {
            return Err(SparseRegError::MalformedDesign { x_len: x.len(), n });
        }

        // Check 3: All values finite
        for (i, &val) in x.iter().enumerate() {
            if !val.is_finite() {
                return Err(SparseRegError::InvalidNumericValue(format!(
                    "x[{}]={}",
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        for (i, &val) in y.iter().enumerate() {
            if !val.is_finite() {
                return Err(SparseRegError::InvalidNumericValue(format!(
                    "y[{}]={}",
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok((n, x.len() / n))
    }

    /// Validate that the iterate matches the loss dimensionality.
    pub fn validate_iterate<T: Float>(
        x: &SparseIterate<T>,
        p: usize,
    ) -> Result<(), SparseRegError> {
        if x.len() != p {
            return Err(SparseRegError::DimensionMismatch {
                expected: p,
                got: x.len(),
                what: "iterate length",
            });
        }
        Ok(())
    }

    /// Validate a penalty against the coordinate count: weight-vector
    /// length, non-negativity, and finiteness.
    pub fn validate_penalty<T: Float>(
        penalty: &Penalty<T>,
        p: usize,
    ) -> Result<(), SparseRegError> {
        if let Some(len) = penalty.weight_len() {
            if len != p {
                return Err(SparseRegError::DimensionMismatch {
                    expected: p,
                    got: len,
                    what: "penalty weight length",
                });
            }
        }
        for k in 0..p {
            let w = penalty.threshold(k);
            if !(w >= T::zero()) || !w.is_finite() {
                return Err(SparseRegError::InvalidPenaltyWeight {
                    index: k,
                    value: w.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the solver options.
    pub fn validate_options<T: Float>(opts: &CDOptions<T>) -> Result<(), SparseRegError> {
        if opts.max_iter == 0 {
            return Err(SparseRegError::InvalidMaxIter(opts.max_iter));
        }
        if !opts.tolerance.is_finite() || opts.tolerance <= T::zero() {
            return Err(SparseRegError::InvalidTolerance(
                opts.tolerance.to_f64().unwrap_or(f64::NAN),
            ));
        }
        if opts.num_continuation_steps == 0 {
            return Err(SparseRegError::InvalidContinuationSteps(
                opts.num_continuation_steps,
            ));
        }
        Ok(())
    }

    /// Validate a kernel bandwidth.
    pub fn validate_bandwidth<T: Float>(h: T) -> Result<(), SparseRegError> {
        if !h.is_finite() || h <= T::zero() {
            return Err(SparseRegError::InvalidBandwidth(
                h.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate an evaluation grid or bandwidth candidate list.
    pub fn validate_grid<T: Float>(grid: &[T], name: &'static str) -> Result<(), SparseRegError> {
        if grid.is_empty() {
            return Err(SparseRegError::EmptyInput);
        }
        for (i, &val) in grid.iter().enumerate() {
            if !val.is_finite() {
                return Err(SparseRegError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    val.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }
}
