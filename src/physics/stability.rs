//! Von Neumann stability analysis of the explicit scheme
//!
//! For the forward-time centred-space discretisation of ∂T/∂t = α ∇²T on a
//! uniform grid, errors stay bounded only when
//!
//! ```text
//! dt <= 1 / (2 α (1/dx² + 1/dy²))
//! ```
//!
//! Above the bound the scheme does not fail loudly: it silently diverges, so
//! callers must gate every run on [`check_stability`].

use crate::error::{InvarianceError, Result};

fn positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InvarianceError::Domain { name, value })
    }
}

/// Largest stable time step for diffusivity `alpha` and spacings `dx`, `dy`
///
/// # Errors
///
/// [`InvarianceError::Domain`] when any argument is zero, negative or not finite.
///
/// # Example
///
/// ```rust
/// use invariance::physics::compute_stability_dt;
///
/// let dt_max = compute_stability_dt(1.0, 1.0, 1.0).unwrap();
/// assert_eq!(dt_max, 0.25);
/// ```
pub fn compute_stability_dt(alpha: f64, dx: f64, dy: f64) -> Result<f64> {
    let alpha = positive("alpha", alpha)?;
    let dx = positive("dx", dx)?;
    let dy = positive("dy", dy)?;

    Ok(1.0 / (2.0 * alpha * (1.0 / (dx * dx) + 1.0 / (dy * dy))))
}

/// Reject `dt` when it exceeds `dt_max`
pub fn check_stability(dt: f64, dt_max: f64) -> Result<()> {
    if dt > dt_max || dt.is_nan() {
        return Err(InvarianceError::Unstable { dt, dt_max });
    }
    Ok(())
}

/// `dt / dt_max`; values above 1 are unstable
pub fn stability_ratio(dt: f64, dt_max: f64) -> f64 {
    dt / dt_max
}

// =================================================================================================
// Tests
// =================================================================================================
