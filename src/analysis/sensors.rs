//! Sensor observations
//!
//! A sensor dataset is a CSV table with one row per measurement:
//!
//! ```csv
//! i,j,t,temperature
//! 4,5,0.10,97.3
//! 4,5,0.20,95.8
//! ```
//!
//! `(i, j)` is the grid cell, `t` the time in seconds since the start of the
//! simulation and `temperature` the measured value. Row order is preserved
//! through every downstream computation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{InvarianceError, Result};

/// One temperature measurement at a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorObservation {
    /// Row index
    pub i: usize,
    /// Column index
    pub j: usize,
    /// Measurement time (s)
    pub t: f64,
    /// Measured temperature
    pub temperature: f64,
}

impl SensorObservation {
    /// Create an observation
    pub fn new(i: usize, j: usize, t: f64, temperature: f64) -> Self {
        Self { i, j, t, temperature }
    }
}

/// Read a sensor dataset
///
/// # Errors
///
/// [`InvarianceError::Csv`] when the file is missing or a row does not parse
/// (negative indices, missing columns, non-numeric values).
pub fn load_sensor_csv(path: impl AsRef<Path>) -> Result<Vec<SensorObservation>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|e| InvarianceError::csv(path, e))?;

    let sensors = reader
        .deserialize()
        .collect::<std::result::Result<Vec<SensorObservation>, _>>()
        .map_err(|e| InvarianceError::csv(path, e))?;

    log::debug!("loaded {} sensor observations from {}", sensors.len(), path.display());
    Ok(sensors)
}

/// Write a sensor dataset (header `i,j,t,temperature`)
pub fn write_sensor_csv(path: impl AsRef<Path>, sensors: &[SensorObservation]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| InvarianceError::csv(path, e))?;

    for sensor in sensors {
        writer.serialize(sensor).map_err(|e| InvarianceError::csv(path, e))?;
    }
    writer.flush().map_err(|e| InvarianceError::io(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_sensor_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sensors.csv");
        fs::write(&path, "i,j,t,temperature\n# comment line\n1, 2, 0.5, 20.25\n3,4,1.0,19.0\n").unwrap();

        let sensors = load_sensor_csv(&path).unwrap();

        assert_eq!(sensors, vec![
            SensorObservation::new(1, 2, 0.5, 20.25),
            SensorObservation::new(3, 4, 1.0, 19.0),
        ]);
    }

    #[test]
    fn test_write_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let sensors = vec![
            SensorObservation::new(5, 5, 2.0, 1.0),
            SensorObservation::new(1, 1, 0.0, 3.5),
        ];

        write_sensor_csv(&path, &sensors).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("i,j,t,temperature"));

        assert_eq!(load_sensor_csv(&path).unwrap(), sensors);
    }

    #[test]
    fn test_negative_index_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "i,j,t,temperature\n-1,2,0.5,20.0\n").unwrap();

        assert!(matches!(load_sensor_csv(&path), Err(InvarianceError::Csv { .. })));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_sensor_csv("/definitely/not/here.csv").is_err());
    }
}
