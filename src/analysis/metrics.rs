//! Error and field metrics
//!
//! [`ErrorMetrics`] summarises how far a simulation is from the sensors;
//! [`FieldMetrics`] summarises the simulation itself. Both serialise to the
//! flat JSON objects stored in a run's `metrics.json`.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::analysis::residuals::ResidualRecord;
use crate::error::{InvarianceError, Result};

/// Residual statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorMetrics {
    /// Root-mean-square residual
    pub rmse: f64,
    /// Mean absolute residual
    pub mae: f64,
    /// Largest absolute residual
    pub max_error: f64,
    /// Number of residuals
    pub n_measurements: usize,
}

/// Summary of a simulated field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldMetrics {
    /// `n_steps * dt`
    pub t_final: f64,
    /// Minimum of the final slice
    pub min_temperature: f64,
    /// Maximum of the final slice
    pub max_temperature: f64,
    /// Stability bound for the grid and material
    pub dt_max_stable: f64,
}

/// Reduce residuals to rmse / mae / max error
///
/// A NaN residual makes all three statistics NaN.
///
/// # Errors
///
/// [`InvarianceError::InvalidInput`] when `records` is empty.
///
/// # Example
///
/// ```rust
/// use invariance::analysis::{compute_error_metrics, ResidualRecord, SensorObservation};
///
/// let sensor = SensorObservation::new(1, 1, 0.0, 10.0);
/// let records = vec![ResidualRecord::new(&sensor, 13.0), ResidualRecord::new(&sensor, 6.0)];
///
/// let metrics = compute_error_metrics(&records).unwrap();
/// assert_eq!(metrics.n_measurements, 2);
/// assert_eq!(metrics.max_error, 4.0);
/// assert_eq!(metrics.mae, 3.5);
/// ```
pub fn compute_error_metrics(records: &[ResidualRecord]) -> Result<ErrorMetrics> {
    if records.is_empty() {
        return Err(InvarianceError::InvalidInput(
            "cannot compute error metrics without residuals".to_string(),
        ));
    }

    let residuals = DVector::from_iterator(records.len(), records.iter().map(|r| r.residual));
    let n = residuals.len() as f64;

    let rmse = (residuals.norm_squared() / n).sqrt();
    let mae = residuals.abs().sum() / n;
    // amax skips NaN
    let max_error = if residuals.iter().any(|r| r.is_nan()) { f64::NAN } else { residuals.amax() };

    Ok(ErrorMetrics { rmse, mae, max_error, n_measurements: records.len() })
}

// =================================================================================================
// Tests
// =================================================================================================
