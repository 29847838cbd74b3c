//! Numerical methods for the heat equation
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Available Methods
//!
//! - **[`ExplicitSolver`]**: forward-time centred-space (FTCS)
//!   - Order: first order in time, second order in space
//!   - Cost: one 5-point stencil per interior cell per step
//!   - Stability: conditional, see [`crate::physics::compute_stability_dt`]
//!
//! Implicit schemes (Crank-Nicolson, ADI) are deliberately absent: the
//! stability gate plus the explicit scheme is the whole model.
//!
//! # Example
//!
//! ```rust
//! use invariance::physics::{Grid, Material};
//! use invariance::solver::{
//!     BoundaryCondition, ExplicitSolver, InitialCondition, Scenario, Solver, SolverConfiguration,
//! };
//!
//! let scenario = Scenario::new(
//!     Grid::new(20, 20, 0.1, 0.1).unwrap(),
//!     Material::new(1e-2).unwrap(),
//!     BoundaryCondition::Dirichlet(0.0),
//!     InitialCondition::Uniform(100.0),
//! );
//!
//! let result = ExplicitSolver::new()
//!     .solve(&scenario, &SolverConfiguration::new(0.1, 50))
//!     .unwrap();
//! assert_eq!(result.len(), 51);
//! ```

pub mod ftcs;

// Re-exports for convenience
pub use ftcs::{simulate_heat_2d, ExplicitSolver};
