//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical building blocks used throughout
//! the solvers:
//! - Proximal operators for sparsity penalties
//! - Smoothing kernels for local polynomial regression
//! - Polynomial basis expansion
//! - Scalar/SIMD accumulation kernels
//! - A linear algebra backend abstraction
//!
//! These are reusable functions with no algorithm-specific logic.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Proximal operators and the penalty enum.
pub mod prox;

/// Smoothing kernels for local polynomial regression.
pub mod kernel;

/// Polynomial basis expansion around an evaluation point.
pub mod basis;

/// Scalar and SIMD accumulation kernels.
pub mod accumulate;

/// Linear algebra backend abstraction.
pub mod linalg;
