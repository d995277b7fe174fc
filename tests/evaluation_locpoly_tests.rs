#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use sparsereg_rs::internals::evaluation::cv::{best_bandwidth, locpoly_loocv};
use sparsereg_rs::internals::evaluation::locpoly::locpoly_l1;
use sparsereg_rs::internals::math::kernel::KernelFunction;
use sparsereg_rs::internals::primitives::errors::SparseRegError;
use sparsereg_rs::internals::primitives::options::CDOptions;
use sparsereg_rs::prelude::lasso;

// ============================================================================
// Local Polynomial Fit Tests
// ============================================================================

#[test]
fn test_locpoly_shape() {
    // q = 2 covariates, degree 1, 3 grid points: 4 coefficients per point.
    let n = 10;
    let mut x = Vec::new();
    let mut z = Vec::new();
    let mut y = Vec::new();
    for i in 0..n {
        let zi = i as f64 / n as f64;
        x.push(1.0);
        x.push(zi * 2.0);
        z.push(zi);
        y.push(1.0 + zi);
    }

    let fit = locpoly_l1(
        &x,
        &z,
        &y,
        &[0.2, 0.5, 0.8],
        1,
        KernelFunction::Gaussian,
        0.5,
        0.01,
        &CDOptions::default(),
    )
    .unwrap();

    assert_eq!(fit.num_points(), 3);
    assert_eq!(fit.num_coefficients(), 4);
    assert_eq!(fit.column(2).len(), 4);
}

#[test]
fn test_locpoly_huge_bandwidth_matches_plain_lasso() {
    // With an effectively flat kernel the normalized weights are all ones,
    // so a degree-0 fit is the plain Lasso on the same data.
    let x = vec![1.0, 2.0, -1.0, 0.5, 3.0, 1.5];
    let z = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
    let y = vec![2.0, 4.0, -1.0, 1.0, 5.0, 3.0];
    let lambda = 0.1;

    let fit = locpoly_l1(
        &x,
        &z,
        &y,
        &[0.35],
        0,
        KernelFunction::Gaussian,
        1e6,
        lambda,
        &CDOptions::default(),
    )
    .unwrap();
    let plain = lasso(&x, &y, lambda, &CDOptions::default()).unwrap();

    assert_eq!(fit.num_coefficients(), 1);
    assert_relative_eq!(fit.column(0)[0], plain[0], epsilon = 1e-6);
}

#[test]
fn test_locpoly_recovers_constant_signal() {
    // Constant response on a unit covariate: every grid point recovers the
    // level, minus the small L1 shrinkage.
    let n = 20;
    let x = vec![1.0; n];
    let z: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
    let y = vec![2.0; n];

    let fit = locpoly_l1(
        &x,
        &z,
        &y,
        &[0.25, 0.5, 0.75],
        0,
        KernelFunction::Gaussian,
        0.3,
        0.01,
        &CDOptions::default(),
    )
    .unwrap();

    for g in 0..3 {
        assert_relative_eq!(fit.column(g)[0], 2.0, epsilon = 0.05);
    }
}

#[test]
fn test_locpoly_vanishing_weights_is_degenerate() {
    // A compact kernel far from every observation leaves no weight mass.
    let x = vec![1.0, 1.0, 1.0];
    let z = vec![0.0, 0.1, 0.2];
    let y = vec![1.0, 1.0, 1.0];

    let err = locpoly_l1(
        &x,
        &z,
        &y,
        &[100.0],
        0,
        KernelFunction::Epanechnikov,
        0.05,
        0.01,
        &CDOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SparseRegError::NumericDegeneracy(_)));
}

#[test]
fn test_locpoly_shape_errors() {
    let opts = CDOptions::default();
    // Smoothing variable length must match n.
    assert!(matches!(
        locpoly_l1(
            &[1.0, 2.0],
            &[0.1],
            &[1.0, 2.0],
            &[0.5],
            0,
            KernelFunction::Gaussian,
            0.5,
            0.1,
            &opts,
        )
        .unwrap_err(),
        SparseRegError::DimensionMismatch { expected: 2, got: 1, .. }
    ));
    // Empty evaluation grid.
    assert!(matches!(
        locpoly_l1(
            &[1.0, 2.0],
            &[0.1, 0.2],
            &[1.0, 2.0],
            &[],
            0,
            KernelFunction::Gaussian,
            0.5,
            0.1,
            &opts,
        )
        .unwrap_err(),
        SparseRegError::EmptyInput
    ));
}

// ============================================================================
// Cross-Validation Tests
// ============================================================================

#[test]
fn test_loocv_constant_signal_scores_zero() {
    // Constant data: the unpenalized refit on the selected support is exact
    // for every held-out point, so every bandwidth scores (near) zero.
    let n = 12;
    let x = vec![1.0; n];
    let z: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
    let y = vec![2.0; n];

    let scores = locpoly_loocv(
        &x,
        &z,
        &y,
        &[0.2, 0.5, 1.0],
        0,
        KernelFunction::Gaussian,
        0.05,
        &CDOptions::default(),
    )
    .unwrap();

    assert_eq!(scores.len(), 3);
    for &s in &scores {
        assert!(s < 1e-10, "score {} should vanish on constant data", s);
    }
}

#[test]
fn test_loocv_prefers_narrow_bandwidth_on_curved_signal() {
    // Degree-0 smoothing of a noiseless curved signal: a huge bandwidth
    // predicts with the global mean and pays its bias, so the narrow
    // candidate must score strictly better.
    let n = 15;
    let mut x = Vec::new();
    let mut z = Vec::new();
    let mut y = Vec::new();
    for i in 0..n {
        let zi = i as f64 / n as f64;
        x.push(1.0);
        z.push(zi);
        y.push(zi * zi);
    }

    let bandwidths = [0.05, 10.0];
    let scores = locpoly_loocv(
        &x,
        &z,
        &y,
        &bandwidths,
        0,
        KernelFunction::Gaussian,
        0.001,
        &CDOptions::default(),
    )
    .unwrap();
    let best = best_bandwidth(&bandwidths, &scores).unwrap();
    assert!(scores[0] < scores[1]);
    assert_relative_eq!(best, 0.05);
}

#[test]
fn test_loocv_too_few_points() {
    assert!(matches!(
        locpoly_loocv(
            &[1.0],
            &[0.1],
            &[1.0],
            &[0.5],
            0,
            KernelFunction::Gaussian,
            0.1,
            &CDOptions::default(),
        )
        .unwrap_err(),
        SparseRegError::TooFewPoints { got: 1, min: 2 }
    ));
}

// ============================================================================
// Bandwidth Selection Tests
// ============================================================================

#[test]
fn test_best_bandwidth_argmin() {
    let bandwidths = [0.1, 0.2, 0.3];
    let scores = [3.0, 1.0, 2.0];
    assert_eq!(best_bandwidth(&bandwidths, &scores), Some(0.2));
}

#[test]
fn test_best_bandwidth_first_wins_ties() {
    let bandwidths = [0.1, 0.2];
    let scores = [1.0, 1.0];
    assert_eq!(best_bandwidth(&bandwidths, &scores), Some(0.1));
}

#[test]
fn test_best_bandwidth_degenerate_inputs() {
    assert_eq!(best_bandwidth::<f64>(&[], &[]), None);
    assert_eq!(best_bandwidth(&[0.1], &[1.0, 2.0]), None);
}
