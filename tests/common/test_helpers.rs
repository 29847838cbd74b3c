//! Helper functions for integration tests

#![allow(dead_code)]

use ndarray::Array2;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Lowest sine mode sin(pi i / (nx-1)) sin(pi j / (ny-1)); zero on every edge
pub fn sine_mode_field(nx: usize, ny: usize) -> Array2<f64> {
    Array2::from_shape_fn((nx, ny), |(i, j)| {
        (PI * i as f64 / (nx - 1) as f64).sin() * (PI * j as f64 / (ny - 1) as f64).sin()
    })
}

/// Exact per-step amplification of [`sine_mode_field`] under FTCS
///
/// The mode is an eigenvector of the discrete Laplacian with zero Dirichlet
/// edges, so one step multiplies it by
/// `g = 1 - 4 cx sin²(pi / 2(nx-1)) - 4 cy sin²(pi / 2(ny-1))`.
pub fn sine_mode_growth_factor(nx: usize, ny: usize, cx: f64, cy: f64) -> f64 {
    let sx = (PI / (2.0 * (nx - 1) as f64)).sin();
    let sy = (PI / (2.0 * (ny - 1) as f64)).sin();
    1.0 - 4.0 * cx * sx * sx - 4.0 * cy * sy * sy
}

/// A configuration document with a Dirichlet boundary
pub fn config_json(nx: usize, ny: usize, dt: f64, n_steps: usize, initial: f64) -> String {
    format!(
        r#"{{
  "grid": {{"nx": {nx}, "ny": {ny}, "dx": 1.0, "dy": 1.0}},
  "time": {{"dt": {dt}, "n_steps": {n_steps}}},
  "material": {{"alpha": 1.0}},
  "boundary": {{"type": "dirichlet", "value": 0.0}},
  "initial_temperature": {initial}
}}"#
    )
}

/// Write `contents` to `dir/name` and return the path
pub fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
