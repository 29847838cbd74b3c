//! Convergence tests for the explicit scheme
//!
//! The lowest sine mode of the unit square is an eigenvector of both the
//! continuous and the discrete Laplacian, which gives an exact reference for
//! the discrete solution and a closed form for the continuous one.

use invariance::physics::{Grid, Material};
use invariance::solver::{
    coefficients, BoundaryCondition, ExplicitSolver, InitialCondition, Scenario, Solver,
    SolverConfiguration,
};
use std::f64::consts::PI;

mod common;
use common::{relative_error, sine_mode_field, sine_mode_growth_factor};

fn sine_scenario(n: usize, alpha: f64) -> Scenario {
    let h = 1.0 / (n - 1) as f64;
    Scenario::new(
        Grid::new(n, n, h, h).unwrap(),
        Material::new(alpha).unwrap(),
        BoundaryCondition::Dirichlet(0.0),
        InitialCondition::Field(sine_mode_field(n, n)),
    )
}

#[test]
fn test_sine_mode_matches_discrete_amplification() {
    let n = 17;
    let scenario = sine_scenario(n, 1.0);
    let dt = 0.8 * scenario.dt_max().unwrap();
    let steps = 40;

    let result = ExplicitSolver::new().solve(&scenario, &SolverConfiguration::new(dt, steps)).unwrap();

    let (cx, cy) = coefficients(&scenario.grid, &scenario.material, dt);
    let g = sine_mode_growth_factor(n, n, cx, cy);
    assert!(g > 0.0 && g < 1.0);

    let initial = sine_mode_field(n, n);
    for step in [1, 10, steps] {
        let expected = &initial * g.powi(step as i32);
        let max_diff = (&result.history.slice(step) - &expected)
            .iter()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()));
        assert!(max_diff < 1e-12, "step {step}: deviation {max_diff}");
    }
}

#[test]
fn test_rectangular_grid_sine_mode() {
    let (nx, ny) = (21, 9);
    let scenario = Scenario::new(
        Grid::new(nx, ny, 0.05, 0.125).unwrap(),
        Material::new(0.5).unwrap(),
        BoundaryCondition::Dirichlet(0.0),
        InitialCondition::Field(sine_mode_field(nx, ny)),
    );
    let dt = 0.5 * scenario.dt_max().unwrap();

    let result = ExplicitSolver::new().solve(&scenario, &SolverConfiguration::new(dt, 25)).unwrap();

    let (cx, cy) = coefficients(&scenario.grid, &scenario.material, dt);
    let g = sine_mode_growth_factor(nx, ny, cx, cy);
    let centre = result.history.value(25, 10, 4).unwrap();
    assert!(relative_error(centre, g.powi(25)) < 1e-12);
}

#[test]
fn test_second_order_spatial_convergence() {
    // cx = cy fixed, so dt ~ h² and the error at a fixed time is O(h²)
    let alpha = 1.0;
    let c = 0.2;
    let t_final = 0.05;
    let exact = (-2.0 * PI * PI * alpha * t_final).exp();

    let mut errors = Vec::new();
    for n in [9, 17, 33] {
        let h = 1.0 / (n - 1) as f64;
        let dt = c * h * h / alpha;
        let steps = (t_final / dt).round() as usize;

        let result = ExplicitSolver::new()
            .solve(&sine_scenario(n, alpha), &SolverConfiguration::new(dt, steps))
            .unwrap();

        let centre = result.history.value(steps, (n - 1) / 2, (n - 1) / 2).unwrap();
        errors.push((centre - exact).abs());
    }

    for pair in errors.windows(2) {
        let ratio = pair[0] / pair[1];
        assert!(ratio > 3.5 && ratio < 4.5, "ratio {ratio} is not second order ({errors:?})");
    }
}

/// Restores the global parallel threshold when dropped, even on a failed assertion
#[cfg(feature = "parallel")]
struct ThresholdReset(usize);

#[cfg(feature = "parallel")]
impl ThresholdReset {
    fn set(threshold: usize) -> Self {
        let previous = invariance::solver::parallel_threshold();
        invariance::solver::set_parallel_threshold(threshold);
        Self(previous)
    }
}

#[cfg(feature = "parallel")]
impl Drop for ThresholdReset {
    fn drop(&mut self) {
        invariance::solver::set_parallel_threshold(self.0);
    }
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_threshold_does_not_change_results() {
    let scenario = sine_scenario(81, 1.0);
    let config = SolverConfiguration::new(0.5 * scenario.dt_max().unwrap(), 20);

    let sequential = {
        let _reset = ThresholdReset::set(usize::MAX);
        ExplicitSolver::new().solve(&scenario, &config).unwrap()
    };
    let parallel = {
        let _reset = ThresholdReset::set(1);
        ExplicitSolver::new().solve(&scenario, &config).unwrap()
    };

    assert_eq!(sequential.history, parallel.history);
}
