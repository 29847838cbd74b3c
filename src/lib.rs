//! invariance: 2D heat diffusion with a stability gate and sensor residuals
//!
//! Simulates transient conduction on a rectangular plate with an explicit
//! finite-difference scheme, and measures how far the simulation is from
//! sensor data.
//!
//! # Architecture
//!
//! invariance is built on two core principles:
//!
//! 1. **Separation of Problem and Numerics**
//!    - A [`Scenario`](solver::Scenario) says what to solve (grid, material, conditions)
//!    - A [`Solver`](solver::Solver) says how to solve it
//!
//! 2. **Stability is the caller's gate**
//!    - [`compute_stability_dt`](physics::compute_stability_dt) gives the largest stable `dt`
//!    - The solver executes whatever it is given, stable or not
//!
//! # Quick Start
//!
//! ```rust
//! use invariance::prelude::*;
//!
//! # fn main() -> invariance::Result<()> {
//! // 1. Describe the plate
//! let scenario = Scenario::new(
//!     Grid::new(10, 10, 1.0, 1.0)?,
//!     Material::new(1.0)?,
//!     BoundaryCondition::Dirichlet(0.0),
//!     InitialCondition::Uniform(100.0),
//! );
//!
//! // 2. Gate the time step
//! let dt = 0.1;
//! check_stability(dt, scenario.dt_max()?)?;
//!
//! // 3. Run
//! let result = ExplicitSolver::new().solve(&scenario, &SolverConfiguration::new(dt, 10))?;
//! assert_eq!(result.history.shape(), (11, 10, 10));
//!
//! // 4. Compare with a sensor
//! let sensors = vec![SensorObservation::new(5, 5, 1.0, 90.0)];
//! let evaluation = evaluate(&result.history, &sensors, dt)?;
//! println!("rmse = {}", evaluation.metrics.rmse);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: grid, material, field history, stability bound
//! - [`solver`]: the explicit FTCS scheme
//! - [`analysis`]: sensors, residuals, error metrics
//! - [`config`]: JSON configuration
//! - [`run`]: run-directory artifacts
//! - [`output`]: CSV export and plots

pub mod analysis;
pub mod config;
pub mod error;
pub mod output;
pub mod physics;
pub mod run;
pub mod runtime;
pub mod solver;

pub use error::{InvarianceError, Result};

/// Crate version, recorded in every run directory
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use invariance::prelude::*;
    //! ```
    pub use crate::analysis::{
        compute_error_metrics, evaluate, sample_at_sensors, ErrorMetrics, FieldMetrics,
        ResidualRecord, SensorObservation,
    };
    pub use crate::config::{load_simulation_config, SimulationConfig};
    pub use crate::error::{InvarianceError, Result};
    pub use crate::physics::{check_stability, compute_stability_dt, FieldHistory, Grid, Material};
    pub use crate::solver::{
        simulate_heat_2d, BoundaryCondition, ExplicitSolver, InitialCondition, Scenario,
        SimulationResult, Solver, SolverConfiguration,
    };
}
