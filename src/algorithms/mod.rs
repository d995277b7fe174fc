//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the numerical core of the crate:
//! - The closed set of coordinate-differentiable losses with incremental
//!   residual maintenance
//! - The Gram-statistics active-shooting Lasso and group-Lasso solvers
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Coordinate-differentiable loss functions.
pub mod losses;

/// Active-shooting solvers on Gram statistics.
pub mod shooting;
