//! Synthetic sensor datasets
//!
//! Draws virtual sensors from a simulated history: cells and time steps are
//! picked uniformly, and the stored temperature is perturbed with Gaussian
//! noise. Useful to exercise the evaluation pipeline end to end when no
//! physical measurements exist yet.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::analysis::sensors::SensorObservation;
use crate::error::{InvarianceError, Result};
use crate::physics::FieldHistory;
use crate::runtime::{deterministic_rng, DEFAULT_SEED};

/// How many sensors to draw and how noisy they are
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticSensorPlan {
    /// Number of observations
    pub count: usize,
    /// Standard deviation of the additive noise (0 gives exact samples)
    pub noise_std: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for SyntheticSensorPlan {
    fn default() -> Self {
        Self { count: 50, noise_std: 0.0, seed: DEFAULT_SEED }
    }
}

/// Draw `plan.count` noisy observations from `history`
///
/// Sensor times are exact multiples of `dt`, so sampling the same history
/// back with [`sample_at_sensors`](crate::analysis::sample_at_sensors) finds
/// the originating slice. With `noise_std == 0` every residual is zero.
///
/// # Errors
///
/// [`InvarianceError::InvalidInput`] when `count` is zero, `dt` is not
/// strictly positive, or `noise_std` is negative or not finite.
pub fn generate_synthetic_sensors(
    history: &FieldHistory,
    dt: f64,
    plan: &SyntheticSensorPlan,
) -> Result<Vec<SensorObservation>> {
    if plan.count == 0 {
        return Err(InvarianceError::InvalidInput("sensor count must be at least 1".to_string()));
    }
    if !(dt.is_finite() && dt > 0.0) {
        return Err(InvarianceError::InvalidInput(format!("dt must be strictly positive, got {dt}")));
    }
    let noise = Normal::new(0.0, plan.noise_std).map_err(|e| {
        InvarianceError::InvalidInput(format!("noise standard deviation {}: {e}", plan.noise_std))
    })?;

    let (n_slices, nx, ny) = history.shape();
    let mut rng = deterministic_rng(plan.seed);

    let sensors = (0..plan.count)
        .map(|_| {
            let step = rng.gen_range(0..n_slices);
            let i = rng.gen_range(0..nx);
            let j = rng.gen_range(0..ny);
            let exact = history.slice(step)[[i, j]];
            SensorObservation::new(i, j, step as f64 * dt, exact + noise.sample(&mut rng))
        })
        .collect();

    Ok(sensors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::residuals::sample_at_sensors;
    use crate::solver::simulate_heat_2d;

    fn history() -> FieldHistory {
        simulate_heat_2d(8, 6, 1.0, 1.0, 0.1, 20, 1.0, 50.0, 0.0).unwrap()
    }

    #[test]
    fn test_noise_free_sensors_match_history() {
        let history = history();
        let plan = SyntheticSensorPlan { count: 40, noise_std: 0.0, seed: 7 };

        let sensors = generate_synthetic_sensors(&history, 0.1, &plan).unwrap();
        assert_eq!(sensors.len(), 40);

        let records = sample_at_sensors(&history, &sensors, 0.1).unwrap();
        assert!(records.iter().all(|r| r.residual == 0.0));
    }

    #[test]
    fn test_seed_is_deterministic() {
        let history = history();
        let plan = SyntheticSensorPlan { count: 10, noise_std: 0.5, seed: 3 };

        let a = generate_synthetic_sensors(&history, 0.1, &plan).unwrap();
        let b = generate_synthetic_sensors(&history, 0.1, &plan).unwrap();
        assert_eq!(a, b);

        let other = SyntheticSensorPlan { seed: 4, ..plan };
        assert_ne!(a, generate_synthetic_sensors(&history, 0.1, &other).unwrap());
    }

    #[test]
    fn test_sensors_stay_inside_grid_and_horizon() {
        let history = history();
        let sensors = generate_synthetic_sensors(&history, 0.1, &SyntheticSensorPlan::default()).unwrap();

        for sensor in &sensors {
            assert!(sensor.i < 8 && sensor.j < 6);
            assert!(sensor.t >= 0.0 && sensor.t <= 20.0 * 0.1 + 1e-12);
        }
    }

    #[test]
    fn test_invalid_plan() {
        let history = history();
        let zero = SyntheticSensorPlan { count: 0, ..Default::default() };
        let negative_noise = SyntheticSensorPlan { noise_std: -1.0, ..Default::default() };

        assert!(generate_synthetic_sensors(&history, 0.1, &zero).is_err());
        assert!(generate_synthetic_sensors(&history, 0.1, &negative_noise).is_err());
        assert!(generate_synthetic_sensors(&history, 0.0, &SyntheticSensorPlan::default()).is_err());
    }
}
