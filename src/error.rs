//! Error types
//!
//! Every fallible operation in the library returns [`Result<T>`], an alias over
//! [`InvarianceError`]. The numerical core only produces the first four
//! variants; the remaining ones come from configuration loading and artifact
//! persistence.

use std::path::PathBuf;

/// Errors raised by the simulation, analysis and persistence layers
#[derive(Debug, thiserror::Error)]
pub enum InvarianceError {
    /// A precondition on an argument was violated (empty input, bad shape, ...)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A parameter lies outside the domain where a formula is defined
    #[error("{name} must be finite and strictly positive, got {value}")]
    Domain {
        /// Name of the offending parameter
        name: &'static str,
        /// Value that was supplied
        value: f64,
    },

    /// Time step exceeds the von Neumann bound of the explicit scheme
    #[error("unstable time step: dt = {dt} exceeds the stability limit dt_max = {dt_max}")]
    Unstable {
        /// Configured time step
        dt: f64,
        /// Largest stable time step
        dt_max: f64,
    },

    /// A sensor references a cell outside the simulated grid
    #[error("sensor #{position} at cell ({i}, {j}) is outside the {nx} x {ny} grid")]
    SensorOutOfRange {
        /// Position of the record in the input dataset
        position: usize,
        /// Row index of the sensor
        i: usize,
        /// Column index of the sensor
        j: usize,
        /// Number of rows in the grid
        nx: usize,
        /// Number of columns in the grid
        ny: usize,
    },

    /// Configuration file parsed but holds meaningless values
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem failure
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failure
    #[error("JSON error on {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// CSV (de)serialization failure
    #[error("CSV error on {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Refusing to overwrite an existing run directory
    #[error("run directory {0:?} already exists")]
    RunExists(PathBuf),

    /// Plot rendering failure
    #[error("plot error: {0}")]
    Plot(String),
}

impl InvarianceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, InvarianceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unstable_message_reports_both_values() {
        let err = InvarianceError::Unstable { dt: 0.5, dt_max: 0.25 };
        let message = err.to_string();

        assert!(message.contains("0.5"));
        assert!(message.contains("0.25"));
    }

    #[test]
    fn test_domain_message_names_parameter() {
        let err = InvarianceError::Domain { name: "alpha", value: -1.0 };
        assert_eq!(err.to_string(), "alpha must be finite and strictly positive, got -1");
    }

    #[test]
    fn test_sensor_out_of_range_message() {
        let err = InvarianceError::SensorOutOfRange { position: 3, i: 12, j: 0, nx: 10, ny: 10 };
        assert!(err.to_string().contains("sensor #3 at cell (12, 0)"));
    }
}
