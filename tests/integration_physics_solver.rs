//! Integration tests: physics + solver + analysis + run directory
//!
//! These tests drive the public API the way the command-line tool does.

use approx::assert_relative_eq;
use invariance::analysis::{
    evaluate, generate_synthetic_sensors, load_sensor_csv, write_sensor_csv, SensorObservation,
    SyntheticSensorPlan,
};
use invariance::config::load_simulation_config;
use invariance::physics::{check_stability, compute_stability_dt, Grid, Material};
use invariance::run::{RunDirectory, RESIDUALS_FILE};
use invariance::solver::{
    first_non_finite, simulate_heat_2d, BoundaryCondition, ExplicitSolver, InitialCondition,
    Scenario, Solver, SolverConfiguration,
};
use invariance::InvarianceError;
use tempfile::tempdir;

mod common;
use common::{config_json, write_config};

// =================================================================================================
// Stability Gate + Solver
// =================================================================================================

#[test]
fn test_reference_plate_scenario() {
    let dt_max = compute_stability_dt(1.0, 1.0, 1.0).unwrap();
    assert_relative_eq!(dt_max, 0.25);
    check_stability(0.1, dt_max).unwrap();

    let history = simulate_heat_2d(10, 10, 1.0, 1.0, 0.1, 10, 1.0, 100.0, 0.0).unwrap();

    assert_eq!(history.shape(), (11, 10, 10));
    let last = history.final_slice();
    for k in 0..10 {
        assert_eq!(last[[0, k]], 0.0);
        assert_eq!(last[[9, k]], 0.0);
        assert_eq!(last[[k, 0]], 0.0);
        assert_eq!(last[[k, 9]], 0.0);
    }
    assert!(last[[5, 5]] > 0.0 && last[[5, 5]] < 100.0);
    assert!(history.is_finite());
}

#[test]
fn test_stable_run_respects_maximum_principle() {
    let scenario = Scenario::new(
        Grid::new(15, 11, 0.5, 0.25).unwrap(),
        Material::new(0.2).unwrap(),
        BoundaryCondition::Dirichlet(20.0),
        InitialCondition::Uniform(80.0),
    );
    let dt = scenario.dt_max().unwrap();
    let result = ExplicitSolver::new().solve(&scenario, &SolverConfiguration::new(dt, 200)).unwrap();

    // Dirichlet edges pin the minimum at 20, the initial field bounds the maximum
    assert!(result.history.min() >= 20.0 - 1e-9);
    assert!(result.history.max() <= 80.0 + 1e-9);

    let summary = result.summary(dt);
    assert!(summary.max_temperature < 80.0);
    assert_relative_eq!(summary.min_temperature, 20.0, epsilon = 1e-9);
    assert_relative_eq!(summary.t_final, 200.0 * dt, max_relative = 1e-12);
}

#[test]
fn test_unstable_run_is_executed_and_diverges() {
    let dt_max = compute_stability_dt(1.0, 1.0, 1.0).unwrap();
    let dt = 4.0 * dt_max;
    assert!(matches!(check_stability(dt, dt_max), Err(InvarianceError::Unstable { .. })));

    // Not gated: the solver runs anyway and the checkerboard mode blows up
    let initial = ndarray::Array2::from_shape_fn((9, 9), |(i, j)| if (i + j) % 2 == 0 { 1.0 } else { -1.0 });
    let scenario = Scenario::new(
        Grid::new(9, 9, 1.0, 1.0).unwrap(),
        Material::new(1.0).unwrap(),
        BoundaryCondition::Dirichlet(0.0),
        InitialCondition::Field(initial),
    );
    let result = ExplicitSolver::new().solve(&scenario, &SolverConfiguration::new(dt, 600)).unwrap();

    assert_eq!(result.len(), 601);
    let (lo, hi) = invariance::physics::slice_extrema(result.final_slice());
    assert!(first_non_finite(&result.history).is_some() || hi.abs().max(lo.abs()) > 1e6);
}

// =================================================================================================
// Residual Pipeline
// =================================================================================================

#[test]
fn test_sensors_from_the_simulation_have_zero_error() {
    let dt = 0.1;
    let history = simulate_heat_2d(12, 8, 1.0, 1.0, dt, 30, 1.0, 100.0, 0.0).unwrap();
    let plan = SyntheticSensorPlan { count: 25, noise_std: 0.0, seed: 11 };
    let sensors = generate_synthetic_sensors(&history, dt, &plan).unwrap();

    let evaluation = evaluate(&history, &sensors, dt).unwrap();

    assert_eq!(evaluation.metrics.n_measurements, 25);
    assert_eq!(evaluation.metrics.rmse, 0.0);
    assert_eq!(evaluation.metrics.max_error, 0.0);
}

#[test]
fn test_noise_shows_up_in_the_metrics() {
    let dt = 0.1;
    let history = simulate_heat_2d(12, 8, 1.0, 1.0, dt, 30, 1.0, 100.0, 0.0).unwrap();
    let plan = SyntheticSensorPlan { count: 2000, noise_std: 0.5, seed: 5 };
    let sensors = generate_synthetic_sensors(&history, dt, &plan).unwrap();

    let metrics = evaluate(&history, &sensors, dt).unwrap().metrics;

    // For Gaussian noise rmse ~ sigma and mae ~ sigma * sqrt(2 / pi)
    assert_relative_eq!(metrics.rmse, 0.5, max_relative = 0.1);
    assert_relative_eq!(metrics.mae, 0.5 * (2.0 / std::f64::consts::PI).sqrt(), max_relative = 0.1);
    assert!(metrics.mae <= metrics.rmse && metrics.rmse <= metrics.max_error);
}

#[test]
fn test_out_of_range_sensor_fails_the_evaluation() {
    let history = simulate_heat_2d(5, 5, 1.0, 1.0, 0.1, 3, 1.0, 1.0, 0.0).unwrap();
    let sensors = vec![SensorObservation::new(2, 2, 0.1, 1.0), SensorObservation::new(5, 0, 0.1, 1.0)];

    assert!(matches!(
        evaluate(&history, &sensors, 0.1),
        Err(InvarianceError::SensorOutOfRange { position: 1, .. })
    ));
}

// =================================================================================================
// Configuration + Run Directory
// =================================================================================================

#[test]
fn test_config_to_run_directory_workflow() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), "sim.json", &config_json(10, 10, 0.1, 10, 100.0));

    let config = load_simulation_config(&config_path).unwrap();
    config.check_stability().unwrap();

    let run = RunDirectory::create(dir.path().join("runs").join("a"), &config).unwrap();
    let result = ExplicitSolver::new()
        .solve(&config.to_scenario().unwrap(), &config.solver_configuration())
        .unwrap();
    run.write_history(&result.history, result.dt).unwrap();
    run.update_metrics(&result.summary(config.dt_max().unwrap())).unwrap();

    // Sensors round-trip through CSV, then evaluate against the reloaded run
    let sensors_path = dir.path().join("sensors.csv");
    let sensors = generate_synthetic_sensors(
        &result.history,
        result.dt,
        &SyntheticSensorPlan { count: 10, noise_std: 1.0, seed: 1 },
    )
    .unwrap();
    write_sensor_csv(&sensors_path, &sensors).unwrap();

    let reopened = RunDirectory::open(run.path()).unwrap();
    let (history, dt) = reopened.load_history().unwrap();
    assert_eq!(history, result.history);

    let evaluation = evaluate(&history, &load_sensor_csv(&sensors_path).unwrap(), dt).unwrap();
    reopened.write_residuals(&evaluation.residuals).unwrap();
    reopened.update_metrics(&evaluation.metrics).unwrap();

    let metrics = reopened.load_metrics().unwrap();
    for key in ["t_final", "min_temperature", "max_temperature", "dt_max_stable", "rmse", "mae", "max_error", "n_measurements"] {
        assert!(metrics.contains_key(key), "metrics.json misses {key}");
    }
    assert!(reopened.artifact(RESIDUALS_FILE).exists());
}

#[test]
fn test_unstable_config_is_detected_before_running() {
    let dir = tempdir().unwrap();
    let config_path = write_config(dir.path(), "sim.json", &config_json(10, 10, 0.3, 10, 100.0));

    let config = load_simulation_config(&config_path).unwrap();
    match config.check_stability() {
        Err(InvarianceError::Unstable { dt, dt_max }) => {
            assert_eq!(dt, 0.3);
            assert_relative_eq!(dt_max, 0.25);
        }
        other => panic!("expected Unstable, got {:?}", other),
    }
}
