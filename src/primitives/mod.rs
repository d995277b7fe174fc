//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the foundational data types used by every other
//! layer:
//! - The sparse optimization iterate with active-set tracking
//! - Solver configuration
//! - The error taxonomy
//!
//! These types carry no numerical algorithms of their own.
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types for solver operations.
pub mod errors;

/// Sparse optimization iterate with active-set tracking.
pub mod iterate;

/// Solver configuration.
pub mod options;

/// Convergence status and solve summaries.
pub mod status;
