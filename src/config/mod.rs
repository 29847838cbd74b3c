//! Simulation configuration
//!
//! A run is described by a single JSON document:
//!
//! ```json
//! {
//!   "grid": { "nx": 50, "ny": 50, "dx": 1.0, "dy": 1.0 },
//!   "time": { "dt": 0.1, "n_steps": 100 },
//!   "material": { "alpha": 1.0 },
//!   "boundary": { "type": "dirichlet", "value": 0.0 },
//!   "initial_temperature": 100.0
//! }
//! ```
//!
//! Unknown keys are rejected at every level, so a typo such as `"n_step"`
//! fails loudly instead of silently falling back to a default.
//!
//! Loading checks the basic preconditions (grid size, positive spacings,
//! diffusivity and time step). It does **not** check stability: that is the
//! caller's gate, see [`SimulationConfig::check_stability`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InvarianceError, Result};
use crate::physics::{check_stability, compute_stability_dt, Grid, Material};
use crate::solver::{BoundaryCondition, InitialCondition, Scenario, SolverConfiguration};

// =================================================================================================
// Sections
// =================================================================================================

/// Spatial discretisation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
}

/// Time discretisation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeConfig {
    pub dt: f64,
    pub n_steps: usize,
}

/// Material properties
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialConfig {
    /// Thermal diffusivity (m²/s)
    pub alpha: f64,
}

/// Edge condition, tagged by `"type"`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum BoundaryConfig {
    /// Fixed temperature on all four edges
    Dirichlet { value: f64 },
}

/// Complete simulation description
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    pub grid: GridConfig,
    pub time: TimeConfig,
    pub material: MaterialConfig,
    pub boundary: BoundaryConfig,
    pub initial_temperature: f64,
}

// =================================================================================================
// Loading
// =================================================================================================

/// Read, parse and validate a configuration file
///
/// # Errors
///
/// - [`InvarianceError::Io`] when the file cannot be read
/// - [`InvarianceError::Json`] on malformed JSON, missing or unknown keys
/// - [`InvarianceError::Config`] when a value violates a precondition
pub fn load_simulation_config(path: impl AsRef<Path>) -> Result<SimulationConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| InvarianceError::io(path, e))?;
    let config: SimulationConfig =
        serde_json::from_str(&text).map_err(|e| InvarianceError::json(path, e))?;

    config.validate()?;
    log::debug!("loaded configuration from {}", path.display());

    Ok(config)
}

impl std::str::FromStr for SimulationConfig {
    type Err = InvarianceError;

    /// Parse and validate a JSON document
    fn from_str(text: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(text)
            .map_err(|e| InvarianceError::Config(format!("malformed configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

// =================================================================================================
// Derived Quantities
// =================================================================================================

impl SimulationConfig {
    /// Check the preconditions of the solver
    ///
    /// Every problem is reported as [`InvarianceError::Config`] naming the
    /// offending key.
    pub fn validate(&self) -> Result<()> {
        self.grid().map_err(|e| InvarianceError::Config(format!("grid: {e}")))?;
        self.material().map_err(|e| InvarianceError::Config(format!("material: {e}")))?;
        self.solver_configuration()
            .validate()
            .map_err(|e| InvarianceError::Config(format!("time: {e}")))?;
        self.boundary_condition()
            .validate()
            .map_err(|e| InvarianceError::Config(format!("boundary: {e}")))?;

        if !self.initial_temperature.is_finite() {
            return Err(InvarianceError::Config(format!(
                "initial_temperature must be finite, got {}",
                self.initial_temperature
            )));
        }

        Ok(())
    }

    /// Grid described by the `grid` section
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.grid.nx, self.grid.ny, self.grid.dx, self.grid.dy)
    }

    /// Material described by the `material` section
    pub fn material(&self) -> Result<Material> {
        Material::new(self.material.alpha)
    }

    /// Boundary condition described by the `boundary` section
    pub fn boundary_condition(&self) -> BoundaryCondition {
        match self.boundary {
            BoundaryConfig::Dirichlet { value } => BoundaryCondition::Dirichlet(value),
        }
    }

    /// Largest stable time step for this grid and material
    pub fn dt_max(&self) -> Result<f64> {
        compute_stability_dt(self.material.alpha, self.grid.dx, self.grid.dy)
    }

    /// Fail with [`InvarianceError::Unstable`] when `time.dt` exceeds [`Self::dt_max`]
    pub fn check_stability(&self) -> Result<()> {
        check_stability(self.time.dt, self.dt_max()?)
    }

    /// WHAT to solve
    pub fn to_scenario(&self) -> Result<Scenario> {
        Ok(Scenario::new(
            self.grid()?,
            self.material()?,
            self.boundary_condition(),
            InitialCondition::Uniform(self.initial_temperature),
        ))
    }

    /// HOW to solve it
    pub fn solver_configuration(&self) -> SolverConfiguration {
        SolverConfiguration::new(self.time.dt, self.time.n_steps)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
