//! Boundary and initial conditions
//!
//! # Design
//!
//! The domain has four edges (rows `0`, `nx - 1`, columns `0`, `ny - 1`) and
//! one temporal boundary (t = 0):
//!
//! - [`BoundaryCondition`] fixes what happens on the edges at every step
//! - [`InitialCondition`] fixes the field at t = 0
//!
//! Edge values always win over the initial condition: the initial field is
//! written first, then the boundary condition is imposed on top of it.

use ndarray::{Array2, ArrayViewMut2};
use std::fmt;

use crate::error::{InvarianceError, Result};
use crate::physics::Grid;

// =================================================================================================
// Boundary Condition
// =================================================================================================

/// Condition imposed on the four edges of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// Fixed temperature on every edge cell, at every time step
    Dirichlet(f64),
}

impl BoundaryCondition {
    /// Validate that the condition is physically meaningful
    pub fn validate(&self) -> Result<()> {
        match self {
            BoundaryCondition::Dirichlet(value) => {
                if !value.is_finite() {
                    return Err(InvarianceError::InvalidInput(format!(
                        "boundary value must be finite, got {value}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Overwrite the edges of `field` with the boundary value
    ///
    /// Corners belong to two edges and receive the same constant twice, so
    /// the write order does not matter.
    pub fn apply(&self, mut field: ArrayViewMut2<'_, f64>) {
        match *self {
            BoundaryCondition::Dirichlet(value) => {
                let (nx, ny) = field.dim();
                field.row_mut(0).fill(value);
                field.row_mut(nx - 1).fill(value);
                field.column_mut(0).fill(value);
                field.column_mut(ny - 1).fill(value);
            }
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryCondition::Dirichlet(value) => write!(f, "Dirichlet (T = {})", value),
        }
    }
}

// =================================================================================================
// Initial Condition
// =================================================================================================

/// Field at t = 0, before the boundary condition is imposed
#[derive(Debug, Clone, PartialEq)]
pub enum InitialCondition {
    /// Same temperature everywhere
    Uniform(f64),

    /// Arbitrary field of shape `(nx, ny)`
    Field(Array2<f64>),
}

impl InitialCondition {
    /// Check the condition against the grid it will be laid on
    pub fn validate(&self, grid: &Grid) -> Result<()> {
        match self {
            InitialCondition::Uniform(value) => {
                if !value.is_finite() {
                    return Err(InvarianceError::InvalidInput(format!(
                        "initial temperature must be finite, got {value}"
                    )));
                }
            }
            InitialCondition::Field(field) => {
                if field.dim() != grid.shape() {
                    return Err(InvarianceError::InvalidInput(format!(
                        "initial field has shape {:?}, grid is {:?}",
                        field.dim(),
                        grid.shape()
                    )));
                }
                if field.iter().any(|v| !v.is_finite()) {
                    return Err(InvarianceError::InvalidInput(
                        "initial field contains NaN or Inf".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Write the initial field into `target`
    pub fn fill(&self, mut target: ArrayViewMut2<'_, f64>) {
        match self {
            InitialCondition::Uniform(value) => target.fill(*value),
            InitialCondition::Field(field) => target.assign(field),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
