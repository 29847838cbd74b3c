//! Simulation vs. sensor residuals
//!
//! # Sampling Policy
//!
//! A sensor at time `t` is compared to the stored slice whose index is the
//! nearest integer to `t / dt`, rounding **half away from zero**
//! ([`f64::round`]): with `dt = 0.1`, `t = 0.25` maps to step 3 (modulo the
//! representation of `0.25 / 0.1`). The index is then clamped into
//! `[0, n_steps]`, so timestamps slightly before t = 0 or past the simulated
//! horizon sample the first or last slice instead of failing the whole
//! evaluation.
//!
//! Cell indices are never clamped: a sensor outside the grid is an error.

use serde::{Deserialize, Serialize};

use crate::analysis::metrics::{compute_error_metrics, ErrorMetrics};
use crate::analysis::sensors::SensorObservation;
use crate::error::{InvarianceError, Result};
use crate::physics::FieldHistory;

/// A sensor observation with the simulated value at the same place and time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualRecord {
    /// Row index
    pub i: usize,
    /// Column index
    pub j: usize,
    /// Measurement time (s)
    pub t: f64,
    /// Measured temperature
    pub temperature: f64,
    /// Simulated temperature
    pub predicted_temperature: f64,
    /// `predicted_temperature - temperature`
    pub residual: f64,
}

impl ResidualRecord {
    /// Pair an observation with its prediction
    pub fn new(sensor: &SensorObservation, predicted_temperature: f64) -> Self {
        Self {
            i: sensor.i,
            j: sensor.j,
            t: sensor.t,
            temperature: sensor.temperature,
            predicted_temperature,
            residual: predicted_temperature - sensor.temperature,
        }
    }
}

/// Residuals plus their summary statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// One record per sensor, in input order
    pub residuals: Vec<ResidualRecord>,
    /// Statistics over `residuals`
    pub metrics: ErrorMetrics,
}

/// Stored slice matching time `t`
///
/// # Errors
///
/// [`InvarianceError::InvalidInput`] for a non-finite `t` or a `dt` that is
/// not strictly positive.
///
/// # Example
///
/// ```rust
/// use invariance::analysis::step_index;
///
/// assert_eq!(step_index(0.30, 0.1, 10).unwrap(), 3);
/// assert_eq!(step_index(-0.5, 0.1, 10).unwrap(), 0);
/// assert_eq!(step_index(99.0, 0.1, 10).unwrap(), 10);
/// ```
pub fn step_index(t: f64, dt: f64, n_steps: usize) -> Result<usize> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(InvarianceError::InvalidInput(format!("dt must be strictly positive, got {dt}")));
    }
    if !t.is_finite() {
        return Err(InvarianceError::InvalidInput(format!("sensor time must be finite, got {t}")));
    }

    let nearest = (t / dt).round();
    if nearest <= 0.0 {
        Ok(0)
    } else if nearest >= n_steps as f64 {
        Ok(n_steps)
    } else {
        Ok(nearest as usize)
    }
}

/// Sample the simulated field at each sensor
///
/// One [`ResidualRecord`] per observation, in input order.
///
/// # Errors
///
/// - [`InvarianceError::SensorOutOfRange`] on the first sensor outside the grid
/// - [`InvarianceError::InvalidInput`] for a bad `dt`, or a sensor with a
///   non-finite time or temperature
pub fn sample_at_sensors(
    history: &FieldHistory,
    sensors: &[SensorObservation],
    dt: f64,
) -> Result<Vec<ResidualRecord>> {
    let (_, nx, ny) = history.shape();
    let n_steps = history.n_steps();

    sensors
        .iter()
        .enumerate()
        .map(|(position, sensor)| {
            if !sensor.temperature.is_finite() {
                return Err(InvarianceError::InvalidInput(format!(
                    "sensor {position} has a non-finite temperature ({})",
                    sensor.temperature
                )));
            }
            let step = step_index(sensor.t, dt, n_steps)?;
            let predicted = history.value(step, sensor.i, sensor.j).ok_or(
                InvarianceError::SensorOutOfRange { position, i: sensor.i, j: sensor.j, nx, ny },
            )?;
            Ok(ResidualRecord::new(sensor, predicted))
        })
        .collect()
}

/// Sample the field and summarise the residuals in one go
///
/// # Errors
///
/// Everything [`sample_at_sensors`] raises, plus
/// [`InvarianceError::InvalidInput`] for an empty sensor set.
pub fn evaluate(history: &FieldHistory, sensors: &[SensorObservation], dt: f64) -> Result<Evaluation> {
    let residuals = sample_at_sensors(history, sensors, dt)?;
    let metrics = compute_error_metrics(&residuals)?;
    Ok(Evaluation { residuals, metrics })
}

// =================================================================================================
// Tests
// =================================================================================================
