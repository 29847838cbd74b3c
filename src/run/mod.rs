//! Run directories
//!
//! Every `simulate` invocation writes its artifacts into a fresh directory:
//!
//! ```text
//! runs/plate-01/
//! ├── config.json        ← exact configuration used
//! ├── metadata.json      ← created_at, invariance_version
//! ├── metrics.json       ← field metrics, later merged with error metrics
//! ├── manifest.json      ← command and arguments that produced the run
//! ├── history.json       ← full (n_steps + 1, nx, ny) history
//! ├── field_final.csv    ← last slice
//! ├── probe_center.csv   ← temperature of the centre cell over time
//! ├── *.png              ← optional plots
//! └── residuals.csv      ← written by `evaluate`
//! ```
//!
//! A run directory is never overwritten: [`RunDirectory::create`] fails when
//! the target already exists.

use chrono::{SecondsFormat, Utc};
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::ResidualRecord;
use crate::config::SimulationConfig;
use crate::error::{InvarianceError, Result};
use crate::output::export::export_field_csv;
use crate::physics::FieldHistory;

pub const CONFIG_FILE: &str = "config.json";
pub const METADATA_FILE: &str = "metadata.json";
pub const METRICS_FILE: &str = "metrics.json";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const HISTORY_FILE: &str = "history.json";
pub const FINAL_FIELD_FILE: &str = "field_final.csv";
pub const RESIDUALS_FILE: &str = "residuals.csv";
pub const PROBE_FILE: &str = "probe_center.csv";
pub const FIELD_PLOT_FILE: &str = "field_final.png";
pub const PROBE_PLOT_FILE: &str = "probe_center.png";

/// Contents of `metadata.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Creation time, RFC 3339 in UTC
    pub created_at: String,
    /// Crate version that created the run
    pub invariance_version: String,
}

/// Contents of `manifest.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub command: String,
    pub args: Value,
    pub created_at: String,
}

/// Contents of `history.json`: the array flattened in row-major order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryArchive {
    pub dt: f64,
    pub shape: [usize; 3],
    pub data: Vec<f64>,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Handle on an existing run directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    root: PathBuf,
}

impl RunDirectory {
    /// Create a new run directory and write its initial artifacts
    ///
    /// Parent directories are created as needed. `metrics.json` starts as an
    /// empty object.
    ///
    /// # Errors
    ///
    /// - [`InvarianceError::RunExists`] when `path` already exists
    /// - [`InvarianceError::Io`] / [`InvarianceError::Json`] on write failures
    pub fn create(path: impl AsRef<Path>, config: &SimulationConfig) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        if root.exists() {
            return Err(InvarianceError::RunExists(root));
        }
        if let Some(parent) = root.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| InvarianceError::io(parent, e))?;
        }
        fs::create_dir(&root).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => InvarianceError::RunExists(root.clone()),
            _ => InvarianceError::io(&root, e),
        })?;

        let run = Self { root };
        run.write_json(CONFIG_FILE, config)?;
        run.write_json(
            METADATA_FILE,
            &RunMetadata {
                created_at: timestamp(),
                invariance_version: crate::VERSION.to_string(),
            },
        )?;
        run.write_json(METRICS_FILE, &Map::new())?;

        log::info!("created run directory {}", run.root.display());
        Ok(run)
    }

    /// Open an existing run directory
    ///
    /// # Errors
    ///
    /// [`InvarianceError::InvalidInput`] when `path` is not a directory
    /// holding a `config.json`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        if !root.join(CONFIG_FILE).is_file() {
            return Err(InvarianceError::InvalidInput(format!(
                "{} is not a run directory (no {})",
                root.display(),
                CONFIG_FILE
            )));
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of an artifact inside the run
    pub fn artifact(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    // =============================================================================================
    // JSON helpers
    // =============================================================================================

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.artifact(name);
        let text = serde_json::to_string_pretty(value).map_err(|e| InvarianceError::json(&path, e))?;
        fs::write(&path, text).map_err(|e| InvarianceError::io(&path, e))
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Result<T> {
        let path = self.artifact(name);
        let text = fs::read_to_string(&path).map_err(|e| InvarianceError::io(&path, e))?;
        serde_json::from_str(&text).map_err(|e| InvarianceError::json(&path, e))
    }

    // =============================================================================================
    // Artifacts
    // =============================================================================================

    /// Configuration the run was created with
    pub fn load_config(&self) -> Result<SimulationConfig> {
        let config: SimulationConfig = self.read_json(CONFIG_FILE)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_metadata(&self) -> Result<RunMetadata> {
        self.read_json(METADATA_FILE)
    }

    /// Persist the full history together with its time step
    pub fn write_history(&self, history: &FieldHistory, dt: f64) -> Result<()> {
        let (slices, nx, ny) = history.shape();
        let archive = HistoryArchive {
            dt,
            shape: [slices, nx, ny],
            data: history.iter().copied().collect(),
        };
        self.write_json(HISTORY_FILE, &archive)?;
        log::debug!("wrote {} ({})", HISTORY_FILE, history);
        Ok(())
    }

    /// Load the history written by [`Self::write_history`], with its `dt`
    ///
    /// Non-finite values do not survive JSON (they are stored as `null`), so
    /// loading the history of a diverged run fails with a JSON error.
    pub fn load_history(&self) -> Result<(FieldHistory, f64)> {
        let archive: HistoryArchive = self.read_json(HISTORY_FILE)?;
        let [slices, nx, ny] = archive.shape;

        let data = Array3::from_shape_vec((slices, nx, ny), archive.data).map_err(|e| {
            InvarianceError::InvalidInput(format!(
                "{} does not match its declared shape {:?}: {}",
                HISTORY_FILE, archive.shape, e
            ))
        })?;

        Ok((FieldHistory::from_array(data)?, archive.dt))
    }

    /// Last slice as `field_final.csv`
    pub fn write_final_field(&self, history: &FieldHistory) -> Result<()> {
        export_field_csv(history.final_slice(), self.artifact(FINAL_FIELD_FILE), None)
    }

    /// Current contents of `metrics.json`
    pub fn load_metrics(&self) -> Result<Map<String, Value>> {
        self.read_json(METRICS_FILE)
    }

    /// Merge the keys of `metrics` into `metrics.json`
    ///
    /// Existing keys are overwritten, others are kept.
    ///
    /// # Errors
    ///
    /// [`InvarianceError::InvalidInput`] when `metrics` does not serialize to
    /// a JSON object.
    pub fn update_metrics<T: Serialize>(&self, metrics: &T) -> Result<()> {
        let path = self.artifact(METRICS_FILE);
        let update = serde_json::to_value(metrics).map_err(|e| InvarianceError::json(&path, e))?;
        let Value::Object(update) = update else {
            return Err(InvarianceError::InvalidInput("metrics must serialize to a JSON object".to_string()));
        };

        let mut current = self.load_metrics()?;
        current.extend(update);
        self.write_json(METRICS_FILE, &current)
    }

    /// Residual table as `residuals.csv`
    pub fn write_residuals(&self, records: &[ResidualRecord]) -> Result<()> {
        let path = self.artifact(RESIDUALS_FILE);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| InvarianceError::csv(&path, e))?;
        for record in records {
            writer.serialize(record).map_err(|e| InvarianceError::csv(&path, e))?;
        }
        writer.flush().map_err(|e| InvarianceError::io(&path, e))
    }

    /// Record the command that produced (or last touched) this run
    pub fn write_manifest(&self, command: &str, args: Value) -> Result<()> {
        self.write_json(
            MANIFEST_FILE,
            &Manifest { command: command.to_string(), args, created_at: timestamp() },
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ErrorMetrics, SensorObservation};
    use crate::solver::simulate_heat_2d;
    use serde_json::json;
    use tempfile::tempdir;

    fn config() -> SimulationConfig {
        r#"{
            "grid": {"nx": 10, "ny": 10, "dx": 1.0, "dy": 1.0},
            "time": {"dt": 0.1, "n_steps": 10},
            "material": {"alpha": 1.0},
            "boundary": {"type": "dirichlet", "value": 0.0},
            "initial_temperature": 0.0
        }"#
        .parse()
        .unwrap()
    }

    #[test]
    fn test_create_run_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("run");

        let run = RunDirectory::create(&out, &config()).unwrap();

        assert!(out.join(CONFIG_FILE).exists());
        assert!(out.join(METADATA_FILE).exists());
        assert_eq!(run.load_config().unwrap(), config());
        assert!(run.load_metrics().unwrap().is_empty());

        let metadata = run.load_metadata().unwrap();
        assert_eq!(metadata.invariance_version, crate::VERSION);
        assert!(chrono::DateTime::parse_from_rfc3339(&metadata.created_at).is_ok());
    }

    #[test]
    fn test_create_refuses_existing_directory() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("run");
        RunDirectory::create(&out, &config()).unwrap();

        assert!(matches!(RunDirectory::create(&out, &config()), Err(InvarianceError::RunExists(_))));
    }

    #[test]
    fn test_open_requires_config() {
        let dir = tempdir().unwrap();
        assert!(RunDirectory::open(dir.path()).is_err());

        let out = dir.path().join("run");
        RunDirectory::create(&out, &config()).unwrap();
        assert_eq!(RunDirectory::open(&out).unwrap().path(), out.as_path());
    }

    #[test]
    fn test_history_round_trip() {
        let dir = tempdir().unwrap();
        let run = RunDirectory::create(dir.path().join("run"), &config()).unwrap();
        let history = simulate_heat_2d(5, 4, 1.0, 1.0, 0.1, 3, 1.0, 50.0, 0.0).unwrap();

        run.write_history(&history, 0.1).unwrap();
        let (loaded, dt) = run.load_history().unwrap();

        assert_eq!(dt, 0.1);
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_final_field_csv() {
        let dir = tempdir().unwrap();
        let run = RunDirectory::create(dir.path().join("run"), &config()).unwrap();
        let history = simulate_heat_2d(4, 3, 1.0, 1.0, 0.1, 2, 1.0, 50.0, 0.0).unwrap();

        run.write_final_field(&history).unwrap();

        let content = fs::read_to_string(run.artifact(FINAL_FIELD_FILE)).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.split(',').count() == 3));
    }

    #[test]
    fn test_update_metrics_merges() {
        let dir = tempdir().unwrap();
        let run = RunDirectory::create(dir.path().join("run"), &config()).unwrap();

        run.update_metrics(&json!({"t_final": 1.0, "rmse": 9.0})).unwrap();
        run.update_metrics(&ErrorMetrics { rmse: 0.5, mae: 0.25, max_error: 1.0, n_measurements: 3 })
            .unwrap();

        let metrics = run.load_metrics().unwrap();
        assert_eq!(metrics["t_final"], json!(1.0));
        assert_eq!(metrics["rmse"], json!(0.5));
        assert_eq!(metrics["n_measurements"], json!(3));

        assert!(run.update_metrics(&vec![1, 2]).is_err());
    }

    #[test]
    fn test_residuals_and_manifest() {
        let dir = tempdir().unwrap();
        let run = RunDirectory::create(dir.path().join("run"), &config()).unwrap();
        let sensor = SensorObservation::new(1, 2, 0.5, 20.0);

        run.write_residuals(&[ResidualRecord::new(&sensor, 21.5)]).unwrap();
        let residuals = fs::read_to_string(run.artifact(RESIDUALS_FILE)).unwrap();
        assert!(residuals.starts_with("i,j,t,temperature,predicted_temperature,residual"));
        assert!(residuals.contains("1,2,0.5,20.0,21.5,1.5"));

        run.write_manifest("simulate", json!({"config": "sim.json"})).unwrap();
        let manifest: Manifest = run.read_json(MANIFEST_FILE).unwrap();
        assert_eq!(manifest.command, "simulate");
        assert_eq!(manifest.args["config"], "sim.json");
    }
}
