//! Material properties

use crate::error::{InvarianceError, Result};

/// Homogeneous isotropic material
///
/// Only the thermal diffusivity α = k/(ρc) enters the heat equation
/// ∂T/∂t = α ∇²T, so that is all we carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    alpha: f64,
}

impl Material {
    /// Create a material from its diffusivity (m²/s)
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(InvarianceError::Domain { name: "alpha", value: alpha });
        }
        Ok(Self { alpha })
    }

    /// Thermal diffusivity
    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}
