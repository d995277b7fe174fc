#![cfg(feature = "dev")]

use sparsereg_rs::internals::primitives::iterate::SparseIterate;

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_new_iterate_is_zero() {
    let x: SparseIterate<f64> = SparseIterate::new(4);
    assert_eq!(x.len(), 4);
    assert!(!x.is_empty());
    assert_eq!(x.num_active(), 0);
    for k in 0..4 {
        assert_eq!(x.get(k), 0.0);
        assert!(!x.is_active(k));
    }
}

#[test]
fn test_zero_dimensional_iterate() {
    let x: SparseIterate<f64> = SparseIterate::new(0);
    assert!(x.is_empty());
    assert_eq!(x.num_active(), 0);
}

// ============================================================================
// Write Semantics Tests
// ============================================================================

#[test]
fn test_nonzero_write_activates() {
    let mut x: SparseIterate<f64> = SparseIterate::new(3);
    x.set(1, 2.5);
    assert_eq!(x.get(1), 2.5);
    assert!(x.is_active(1));
    assert_eq!(x.num_active(), 1);
}

#[test]
fn test_zero_write_to_inactive_is_noop() {
    let mut x: SparseIterate<f64> = SparseIterate::new(3);
    x.set(0, 0.0);
    assert_eq!(x.num_active(), 0);
    assert!(!x.is_active(0));
}

#[test]
fn test_zero_write_to_active_keeps_membership() {
    let mut x: SparseIterate<f64> = SparseIterate::new(3);
    x.set(2, 1.0);
    x.set(2, 0.0);
    assert_eq!(x.get(2), 0.0);
    assert!(x.is_active(2));
    assert_eq!(x.num_active(), 1);
}

// ============================================================================
// Pruning Tests
// ============================================================================

#[test]
fn test_drop_zeros_prunes_exact_zeros() {
    let mut x: SparseIterate<f64> = SparseIterate::new(4);
    x.set(0, 1.0);
    x.set(1, 2.0);
    x.set(3, 3.0);
    x.set(1, 0.0);
    x.drop_zeros();

    assert_eq!(x.num_active(), 2);
    assert!(x.is_active(0));
    assert!(!x.is_active(1));
    assert!(x.is_active(3));
    let active: Vec<usize> = x.active_indices().collect();
    assert_eq!(active, vec![0, 3]);
}

#[test]
fn test_reactivation_after_drop() {
    let mut x: SparseIterate<f64> = SparseIterate::new(2);
    x.set(0, 1.0);
    x.set(0, 0.0);
    x.drop_zeros();
    assert_eq!(x.num_active(), 0);

    x.set(0, -4.0);
    assert!(x.is_active(0));
    assert_eq!(x.get(0), -4.0);
}

// ============================================================================
// Iteration Order Tests
// ============================================================================

#[test]
fn test_active_indices_insertion_order() {
    let mut x: SparseIterate<f64> = SparseIterate::new(5);
    x.set(3, 1.0);
    x.set(0, 2.0);
    x.set(4, 3.0);

    let order: Vec<usize> = x.active_indices().collect();
    assert_eq!(order, vec![3, 0, 4]);

    // Restartable without mutation.
    let again: Vec<usize> = x.active_indices().collect();
    assert_eq!(again, order);
}

// ============================================================================
// Clear and Densify Tests
// ============================================================================

#[test]
fn test_clear_resets_everything() {
    let mut x: SparseIterate<f64> = SparseIterate::new(3);
    x.set(0, 1.0);
    x.set(2, -2.0);
    x.clear();

    assert_eq!(x.num_active(), 0);
    for k in 0..3 {
        assert_eq!(x.get(k), 0.0);
        assert!(!x.is_active(k));
    }
}

#[test]
fn test_to_dense_round_trip() {
    let mut x: SparseIterate<f64> = SparseIterate::new(4);
    x.set(1, 5.0);
    x.set(3, -1.5);
    assert_eq!(x.to_dense(), vec![0.0, 5.0, 0.0, -1.5]);
}
