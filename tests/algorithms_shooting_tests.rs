#![cfg(feature = "dev")]

use approx::assert_relative_eq;
use sparsereg_rs::internals::algorithms::losses::{LeastSquares, Loss};
use sparsereg_rs::internals::algorithms::shooting::{
    active_shooting_group_lasso, active_shooting_lasso, GramStats,
};
use sparsereg_rs::internals::engine::driver::coordinate_descent;
use sparsereg_rs::internals::math::prox::Penalty;
use sparsereg_rs::internals::primitives::errors::SparseRegError;
use sparsereg_rs::internals::primitives::iterate::SparseIterate;
use sparsereg_rs::internals::primitives::options::CDOptions;

// ============================================================================
// Gram Statistics Tests
// ============================================================================

#[test]
fn test_gram_stats_from_data() {
    // X = [[1, 2], [3, 4]], y = [1, 1].
    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [1.0, 1.0];
    let stats = GramStats::from_data(&x, &y).unwrap();

    assert_eq!(stats.num_coordinates(), 2);
    assert_relative_eq!(stats.xx_at(0, 0), 5.0); // (1 + 9) / 2
    assert_relative_eq!(stats.xx_at(0, 1), 7.0); // (2 + 12) / 2
    assert_relative_eq!(stats.xx_at(1, 0), 7.0);
    assert_relative_eq!(stats.xx_at(1, 1), 10.0); // (4 + 16) / 2
    assert_relative_eq!(stats.xy_at(0), 2.0); // (1 + 3) / 2
    assert_relative_eq!(stats.xy_at(1), 3.0); // (2 + 4) / 2
}

#[test]
fn test_gram_stats_shape_errors() {
    assert_eq!(
        GramStats::<f64>::new(vec![], vec![]).unwrap_err(),
        SparseRegError::EmptyInput
    );
    assert!(matches!(
        GramStats::new(vec![1.0, 2.0], vec![1.0, 1.0]).unwrap_err(),
        SparseRegError::DimensionMismatch { expected: 4, got: 2, .. }
    ));
}

// ============================================================================
// Active-Shooting Lasso Tests
// ============================================================================

fn identity_stats(xy: Vec<f64>) -> GramStats<f64> {
    let p = xy.len();
    let mut xx = vec![0.0; p * p];
    for k in 0..p {
        xx[k * p + k] = 1.0;
    }
    GramStats::new(xx, xy).unwrap()
}

#[test]
fn test_shooting_lasso_identity_soft_thresholds() {
    // XX = I, Xy = [3, 0], lambda = 1: beta = soft(Xy, 1) = [2, 0].
    let stats = identity_stats(vec![3.0, 0.0]);
    let mut beta = SparseIterate::new(2);
    let result =
        active_shooting_lasso(&mut beta, &stats, &Penalty::L1(1.0), &CDOptions::default())
            .unwrap();

    assert!(result.converged());
    assert_relative_eq!(beta.get(0), 2.0, epsilon = 1e-10);
    assert_eq!(beta.get(1), 0.0);
    assert_eq!(beta.num_active(), 1);
}

#[test]
fn test_shooting_lasso_above_lambda_max_stays_zero() {
    // lambda exceeds max |Xy_k|: no violator exists at zero, so the zero
    // solution is optimal and returned without any update.
    let stats = identity_stats(vec![3.0, -1.0]);
    let mut beta = SparseIterate::new(2);
    let result =
        active_shooting_lasso(&mut beta, &stats, &Penalty::L1(3.5), &CDOptions::default())
            .unwrap();

    assert!(result.converged());
    assert_eq!(beta.num_active(), 0);
}

#[test]
fn test_shooting_lasso_weighted_penalty() {
    // Zero weight on coordinate 1 leaves it unpenalized.
    let stats = identity_stats(vec![3.0, 2.0]);
    let mut beta = SparseIterate::new(2);
    let penalty = Penalty::WeightedL1(vec![1.0, 0.0]);
    let result =
        active_shooting_lasso(&mut beta, &stats, &penalty, &CDOptions::default()).unwrap();

    assert!(result.converged());
    assert_relative_eq!(beta.get(0), 2.0, epsilon = 1e-10);
    assert_relative_eq!(beta.get(1), 2.0, epsilon = 1e-10);
}

#[test]
fn test_shooting_lasso_penalty_length_mismatch() {
    let stats = identity_stats(vec![1.0, 1.0]);
    let mut beta = SparseIterate::new(2);
    let penalty = Penalty::WeightedL1(vec![1.0]);
    assert!(matches!(
        active_shooting_lasso(&mut beta, &stats, &penalty, &CDOptions::default()).unwrap_err(),
        SparseRegError::DimensionMismatch { .. }
    ));
}

#[test]
fn test_shooting_agrees_with_driver() {
    // Both solvers minimize (1/2n)||y - X b||^2 + lambda ||b||_1; their
    // solutions must agree on the same data.
    let x = [1.0, 1.0, 1.0, -1.0, 2.0, 0.5];
    let y = [1.0, 2.0, 3.0];
    let lambda = 0.1;
    let opts = CDOptions::default();

    let stats = GramStats::from_data(&x, &y).unwrap();
    let mut beta_shoot = SparseIterate::new(2);
    active_shooting_lasso(&mut beta_shoot, &stats, &Penalty::L1(lambda), &opts).unwrap();

    let mut loss = Loss::LeastSquares(LeastSquares::new(&x, &y).unwrap());
    let mut beta_cd = SparseIterate::new(2);
    coordinate_descent(&mut beta_cd, &mut loss, &Penalty::L1(lambda), &opts).unwrap();

    for k in 0..2 {
        assert_relative_eq!(beta_shoot.get(k), beta_cd.get(k), epsilon = 1e-4);
    }
}

// ============================================================================
// Active-Shooting Group Lasso Tests
// ============================================================================

#[test]
fn test_group_lasso_singleton_groups_match_lasso() {
    let stats = identity_stats(vec![3.0, 0.0]);
    let groups = [0..1, 1..2];
    let mut beta = SparseIterate::new(2);
    let result = active_shooting_group_lasso(
        &mut beta,
        &stats,
        &groups,
        &[1.0, 1.0],
        &CDOptions::default(),
    )
    .unwrap();

    assert!(result.converged());
    assert_relative_eq!(beta.get(0), 2.0, epsilon = 1e-6);
    assert_eq!(beta.get(1), 0.0);
}

#[test]
fn test_group_lasso_block_shrinkage() {
    // XX = I, Xy = [3, 4] in one group with lambda = 2: the solution is the
    // block soft threshold of Xy, scale 1 - 2/5 = 0.6.
    let stats = identity_stats(vec![3.0, 4.0]);
    let groups = [0..2];
    let mut beta = SparseIterate::new(2);
    let result = active_shooting_group_lasso(
        &mut beta,
        &stats,
        &groups,
        &[2.0],
        &CDOptions::default(),
    )
    .unwrap();

    assert!(result.converged());
    assert_relative_eq!(beta.get(0), 1.8, epsilon = 1e-6);
    assert_relative_eq!(beta.get(1), 2.4, epsilon = 1e-6);
}

#[test]
fn test_group_lasso_kills_weak_group() {
    // Block norm of Xy is 5; lambda above it keeps the group at zero.
    let stats = identity_stats(vec![3.0, 4.0]);
    let groups = [0..2];
    let mut beta = SparseIterate::new(2);
    let result = active_shooting_group_lasso(
        &mut beta,
        &stats,
        &groups,
        &[5.5],
        &CDOptions::default(),
    )
    .unwrap();

    assert!(result.converged());
    assert_eq!(beta.num_active(), 0);
}

#[test]
fn test_group_lasso_rejects_bad_partition() {
    let stats = identity_stats(vec![1.0, 1.0, 1.0]);
    let opts = CDOptions::default();

    // Gap between blocks.
    let mut beta = SparseIterate::new(3);
    assert!(matches!(
        active_shooting_group_lasso(&mut beta, &stats, &[0..1, 2..3], &[1.0, 1.0], &opts)
            .unwrap_err(),
        SparseRegError::InvalidGroups(_)
    ));

    // Incomplete cover.
    let mut beta = SparseIterate::new(3);
    assert!(matches!(
        active_shooting_group_lasso(&mut beta, &stats, &[0..2], &[1.0], &opts).unwrap_err(),
        SparseRegError::InvalidGroups(_)
    ));

    // Negative group weight.
    let mut beta = SparseIterate::new(3);
    assert!(matches!(
        active_shooting_group_lasso(&mut beta, &stats, &[0..3], &[-1.0], &opts).unwrap_err(),
        SparseRegError::InvalidPenaltyWeight { index: 0, .. }
    ));
}
