//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - [`SolverConfiguration`] carries the HOW: time step and number of steps
//! - [`Solver`] applies a numerical method to a [`Scenario`]
//! - [`SimulationResult`] carries the full trajectory plus free-form metadata
//!
//! The `Solver` trait is the seam between orchestration and numerics: the CLI
//! and the tests only talk to `dyn Solver`.

use std::collections::HashMap;

use crate::analysis::metrics::FieldMetrics;
use crate::error::{InvarianceError, Result};
use crate::physics::{slice_extrema, FieldHistory};
use crate::solver::scenario::Scenario;
use ndarray::ArrayView2;

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Time discretisation
///
/// # Example
///
/// ```rust
/// use invariance::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::new(0.01, 1000);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.total_time(), 10.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Time step (s)
    pub dt: f64,

    /// Number of steps; `0` only stores the initial field
    pub n_steps: usize,
}

impl SolverConfiguration {
    /// Create a configuration
    pub fn new(dt: f64, n_steps: usize) -> Self {
        Self { dt, n_steps }
    }

    /// Simulated horizon `n_steps * dt`
    pub fn total_time(&self) -> f64 {
        self.n_steps as f64 * self.dt
    }

    /// Validate configuration
    ///
    /// Stability is not checked here: that is the caller's decision.
    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(InvarianceError::Domain { name: "dt", value: self.dt });
        }
        Ok(())
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Output of a solver run
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// `t_n = n * dt` for every stored slice
    pub time_points: Vec<f64>,

    /// Temperature at every stored slice
    pub history: FieldHistory,

    /// Time step used
    pub dt: f64,

    /// Diagnostic key/value pairs (solver name, coefficients, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Build a result; time points are derived from `dt`
    pub fn new(history: FieldHistory, dt: f64) -> Self {
        // t_n computed from the index, not accumulated, so t_final is exact to rounding
        let time_points = (0..history.n_slices()).map(|n| n as f64 * dt).collect();

        Self {
            time_points,
            history,
            dt,
            metadata: HashMap::new(),
        }
    }

    /// Number of stored slices
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// Never true for solver output (the initial slice is always stored)
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Last simulated time
    pub fn t_final(&self) -> f64 {
        self.time_points.last().copied().unwrap_or(0.0)
    }

    /// Field at the last simulated time
    pub fn final_slice(&self) -> ArrayView2<'_, f64> {
        self.history.final_slice()
    }

    /// Record a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Read a metadata entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Summary metrics of the final slice, tagged with the stability limit
    pub fn summary(&self, dt_max_stable: f64) -> FieldMetrics {
        let (min_temperature, max_temperature) = slice_extrema(self.final_slice());

        FieldMetrics {
            t_final: self.t_final(),
            min_temperature,
            max_temperature,
            dt_max_stable,
        }
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical method advancing a [`Scenario`] in time
///
/// # Contract
///
/// Implementations must:
/// - validate `scenario` and `config` and fail with a typed error
/// - return a history of shape `(n_steps + 1, nx, ny)`
/// - not perform stability gating; that is the caller's policy
pub trait Solver: Send + Sync {
    /// Run the simulation to completion
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult>;

    /// Human readable name (used in logs and metadata)
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_configuration_validation() {
        assert!(SolverConfiguration::new(0.1, 0).validate().is_ok());
        assert!(SolverConfiguration::new(0.0, 10).validate().is_err());
        assert!(SolverConfiguration::new(-0.1, 10).validate().is_err());
        assert!(SolverConfiguration::new(f64::NAN, 10).validate().is_err());
    }

    #[test]
    fn test_result_time_points() {
        let history = FieldHistory::from_array(Array3::zeros((11, 3, 3))).unwrap();
        let result = SimulationResult::new(history, 0.1);

        assert_eq!(result.len(), 11);
        assert_eq!(result.time_points[0], 0.0);
        assert!((result.t_final() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_uses_final_slice() {
        let mut data = Array3::zeros((2, 3, 3));
        data[[0, 1, 1]] = 50.0;
        data[[1, 1, 1]] = 5.0;
        data[[1, 0, 0]] = -1.0;

        let result = SimulationResult::new(FieldHistory::from_array(data).unwrap(), 0.5);
        let summary = result.summary(0.25);

        assert_eq!(summary.t_final, 0.5);
        assert_eq!(summary.min_temperature, -1.0);
        assert_eq!(summary.max_temperature, 5.0);
        assert_eq!(summary.dt_max_stable, 0.25);
    }

    #[test]
    fn test_metadata() {
        let history = FieldHistory::from_array(Array3::zeros((1, 3, 3))).unwrap();
        let mut result = SimulationResult::new(history, 1.0);

        result.add_metadata("solver", "FTCS");
        assert_eq!(result.get_metadata("solver"), Some("FTCS"));
        assert_eq!(result.get_metadata("missing"), None);
    }
}
