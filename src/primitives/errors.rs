//! Error types for sparse-regression solvers.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while configuring
//! or running the coordinate-descent solvers: shape contract violations,
//! invalid parameters, and numerical degeneracies.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (e.g., expected vs.
//!   actual lengths) so callers can diagnose without re-deriving state.
//! * **Fail-fast**: Shape and parameter errors are raised before any
//!   caller-owned buffer is mutated.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic
//!   messages.
//!
//! ## Key concepts
//!
//! 1. **Dimension mismatches**: iterate length, penalty-vector length, group
//!    layout, or data shapes disagree.
//! 2. **Numeric degeneracy**: zero curvature, zero-norm group blocks, or the
//!    square-root-lasso guard failing. These are reported rather than letting
//!    NaN/Inf propagate.
//! 3. **Parameter validation**: iteration caps, tolerances, bandwidths, and
//!    penalty weights outside their admissible ranges.
//!
//! ## Invariants
//!
//! * Non-convergence is *not* an error; it is reported through
//!   [`crate::primitives::status::ConvergenceStatus`].
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or retry strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for sparse-regression operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SparseRegError {
    /// Input arrays are empty.
    EmptyInput,

    /// A shape/length contract was violated.
    DimensionMismatch {
        /// Expected length or count.
        expected: usize,
        /// Length or count actually provided.
        got: usize,
        /// Which quantity disagreed (e.g., "iterate length").
        what: &'static str,
    },

    /// The design matrix length is not a multiple of the number of responses.
    MalformedDesign {
        /// Number of elements in the flattened design matrix.
        x_len: usize,
        /// Number of responses.
        n: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Number of observations is below the minimum for the requested
    /// operation.
    TooFewPoints {
        /// Number of observations provided.
        got: usize,
        /// Minimum required observations.
        min: usize,
    },

    /// A numerical degeneracy was detected (zero curvature, zero-norm group,
    /// or the square-root-lasso guard `lambda^2 < ||X_k||^2` failing).
    NumericDegeneracy(String),

    /// A penalty weight is negative or non-finite.
    InvalidPenaltyWeight {
        /// Coordinate or group index of the offending weight.
        index: usize,
        /// The weight value, converted to f64 for display.
        value: f64,
    },

    /// The group layout does not partition the coordinate range.
    InvalidGroups(String),

    /// Iteration cap must be at least 1.
    InvalidMaxIter(usize),

    /// Convergence tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// Continuation step count must be at least 1.
    InvalidContinuationSteps(usize),

    /// Kernel bandwidth must be positive and finite.
    InvalidBandwidth(f64),

    /// Quantile level must lie strictly inside (0, 1).
    InvalidQuantile(f64),

    /// The external conic/LP backend reported a failure.
    BackendFailure(String),
}

impl Display for SparseRegError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            SparseRegError::EmptyInput => {
                write!(f, "input arrays must not be empty")
            }
            SparseRegError::DimensionMismatch {
                expected,
                got,
                what,
            } => {
                write!(
                    f,
                    "dimension mismatch for {}: expected {}, got {}",
                    what, expected, got
                )
            }
            SparseRegError::MalformedDesign { x_len, n } => {
                write!(
                    f,
                    "design matrix length {} is not a multiple of the {} responses",
                    x_len, n
                )
            }
            SparseRegError::InvalidNumericValue(context) => {
                write!(f, "input contains a non-finite value: {}", context)
            }
            SparseRegError::TooFewPoints { got, min } => {
                write!(
                    f,
                    "operation requires at least {} observations, got {}",
                    min, got
                )
            }
            SparseRegError::NumericDegeneracy(context) => {
                write!(f, "numerical degeneracy: {}", context)
            }
            SparseRegError::InvalidPenaltyWeight { index, value } => {
                write!(
                    f,
                    "penalty weight at index {} must be non-negative and finite, got {}",
                    index, value
                )
            }
            SparseRegError::InvalidGroups(context) => {
                write!(f, "invalid group layout: {}", context)
            }
            SparseRegError::InvalidMaxIter(got) => {
                write!(f, "max_iter must be at least 1, got {}", got)
            }
            SparseRegError::InvalidTolerance(got) => {
                write!(f, "tolerance must be positive and finite, got {}", got)
            }
            SparseRegError::InvalidContinuationSteps(got) => {
                write!(
                    f,
                    "num_continuation_steps must be at least 1, got {}",
                    got
                )
            }
            SparseRegError::InvalidBandwidth(got) => {
                write!(f, "bandwidth must be positive and finite, got {}", got)
            }
            SparseRegError::InvalidQuantile(got) => {
                write!(
                    f,
                    "quantile level must lie strictly inside (0, 1), got {}",
                    got
                )
            }
            SparseRegError::BackendFailure(context) => {
                write!(f, "conic/LP backend failure: {}", context)
            }
        }
    }
}

#[cfg(feature = "std")]
impl Error for SparseRegError {}
