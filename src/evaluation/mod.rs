//! Layer 5: Evaluation
//!
//! # Purpose
//!
//! This layer applies the solver to data: kernel-weighted local polynomial
//! fits over an evaluation grid, and leave-one-out cross-validation for
//! bandwidth selection.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Leave-one-out bandwidth selection.
pub mod cv;

/// Penalized local polynomial regression.
pub mod locpoly;
