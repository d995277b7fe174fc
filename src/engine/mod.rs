//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates solves. It validates inputs, runs the
//! full/active-only pass state machine with its two-pass convergence rule,
//! and drives warm starts and the geometric continuation path.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Coordinate-descent driver.
pub mod driver;

/// Continuation schedules and penalty-scale bounds.
pub mod schedule;

/// Input validation.
pub mod validator;
