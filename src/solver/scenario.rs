//! Simulation scenario definition
//!
//! A scenario combines the grid, the material and the boundary / initial
//! conditions.
use std::fmt;

use crate::error::Result;
use crate::physics::{compute_stability_dt, Grid, Material};
use crate::solver::boundary::{BoundaryCondition, InitialCondition};

/// Simulation scenario
///
/// Defines a specific case to simulate. This is the "WHAT to solve"
/// (not "HOW to solve"): the same scenario can be advanced with different
/// time steps or step counts.
///
/// # Example
///
/// ```rust
/// use invariance::physics::{Grid, Material};
/// use invariance::solver::{BoundaryCondition, InitialCondition, Scenario};
///
/// let scenario = Scenario::new(
///     Grid::new(10, 10, 1.0, 1.0).unwrap(),
///     Material::new(1.0).unwrap(),
///     BoundaryCondition::Dirichlet(0.0),
///     InitialCondition::Uniform(100.0),
/// );
/// assert!(scenario.validate().is_ok());
/// assert_eq!(scenario.dt_max().unwrap(), 0.25);
/// ```
#[derive(Clone, PartialEq)]
pub struct Scenario {
    /// Spatial discretisation
    pub grid: Grid,

    /// Material filling the domain
    pub material: Material,

    /// Edge condition
    pub boundary: BoundaryCondition,

    /// Field at t = 0
    pub initial: InitialCondition,
}

impl Scenario {
    /// Create a scenario
    pub fn new(
        grid: Grid,
        material: Material,
        boundary: BoundaryCondition,
        initial: InitialCondition,
    ) -> Self {
        Self { grid, material, boundary, initial }
    }

    /// Verify the conditions against the grid
    pub fn validate(&self) -> Result<()> {
        self.boundary.validate()?;
        self.initial.validate(&self.grid)
    }

    /// Largest stable time step for this grid and material
    pub fn dt_max(&self) -> Result<f64> {
        compute_stability_dt(self.material.alpha(), self.grid.dx(), self.grid.dy())
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initial = match &self.initial {
            InitialCondition::Uniform(value) => format!("Uniform ({})", value),
            InitialCondition::Field(field) => format!("Field [{} * {}]", field.nrows(), field.ncols()),
        };

        f.debug_struct("Scenario")
            .field("grid", &self.grid)
            .field("alpha", &self.material.alpha())
            .field("boundary", &self.boundary)
            .field("initial", &initial)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
