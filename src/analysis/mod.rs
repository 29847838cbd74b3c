//! Comparing simulations with measurements
//!
//! # Pipeline
//!
//! ```text
//! sensors.csv ──► load_sensor_csv ──► [SensorObservation]
//!                                            │
//! FieldHistory, dt ──────────────► sample_at_sensors ──► [ResidualRecord]
//!                                                               │
//!                                              compute_error_metrics ──► ErrorMetrics
//! ```
//!
//! [`evaluate`] runs the last two stages at once.
//!
//! # Example
//!
//! ```rust
//! use invariance::analysis::{evaluate, SensorObservation};
//! use invariance::solver::simulate_heat_2d;
//!
//! let history = simulate_heat_2d(10, 10, 1.0, 1.0, 0.1, 10, 1.0, 100.0, 0.0).unwrap();
//! let sensors = vec![SensorObservation::new(5, 5, 0.5, 99.0)];
//!
//! let evaluation = evaluate(&history, &sensors, 0.1).unwrap();
//! assert_eq!(evaluation.metrics.n_measurements, 1);
//! ```

pub mod metrics;
pub mod residuals;
pub mod sensors;
pub mod synthetic;

pub use metrics::{compute_error_metrics, ErrorMetrics, FieldMetrics};
pub use residuals::{evaluate, sample_at_sensors, step_index, Evaluation, ResidualRecord};
pub use sensors::{load_sensor_csv, write_sensor_csv, SensorObservation};
pub use synthetic::{generate_synthetic_sensors, SyntheticSensorPlan};
