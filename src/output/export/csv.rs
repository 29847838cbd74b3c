//! CSV export of temperature fields and probe series
//!
//! Files are hand-formatted so that delimiter, precision and decimal
//! separator can be tuned for the target tool (pandas, Excel, gnuplot).
//!
//! # Quick Examples
//!
//! ## Final Field
//!
//! ```rust,ignore
//! use invariance::output::export::export_field_csv;
//!
//! export_field_csv(history.final_slice(), "field_final.csv", None)?;
//! ```
//!
//! **Output** (`field_final.csv`, one line per row `i`, one column per `j`):
//! ```csv
//! 0.000000,0.000000,0.000000
//! 0.000000,97.500000,0.000000
//! 0.000000,0.000000,0.000000
//! ```
//!
//! ## Probe With Metadata
//!
//! ```rust,ignore
//! use invariance::output::export::{export_time_series_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_simulation("Explicit FTCS", 0.1, 100);
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_time_series_csv(&times, &values, "probe.csv", Some(&config))?;
//! ```
//!
//! **Output** (`probe.csv`):
//! ```csv
//! # Heat Diffusion Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Solver: Explicit FTCS
//! # dt: 0.1 s
//! # Time Steps: 100
//! #
//! Time (s),Temperature
//! 0.000000,100.000000
//! ...
//! ```

use ndarray::ArrayView2;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{InvarianceError, Result};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use invariance::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in the header
    pub metadata: Option<CsvMetadata>,

    /// Header of the time column (default: "Time (s)")
    pub time_header: String,

    /// Header of the value column (default: "Temperature")
    pub value_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (s)".to_string(),
            value_header: "Temperature".to_string(),
        }
    }
}

impl CsvConfig {
    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only the fields that are set are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Solver name (e.g. "Explicit FTCS")
    pub solver_name: Option<String>,

    /// Grid size `(nx, ny)`
    pub grid: Option<(usize, usize)>,

    /// Time step (s)
    pub dt: Option<f64>,

    /// Number of time steps
    pub time_steps: Option<usize>,

    /// Thermal diffusivity
    pub alpha: Option<f64>,

    /// Free-form `key: value` lines
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata describing a finished simulation
    pub fn from_simulation(solver: &str, dt: f64, time_steps: usize) -> Self {
        Self {
            solver_name: Some(solver.to_string()),
            dt: Some(dt),
            time_steps: Some(time_steps),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header(out: &mut impl Write, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(out, "# Heat Diffusion Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some((nx, ny)) = metadata.grid {
        writeln!(out, "# Grid: {} x {}", nx, ny)?;
    }
    if let Some(dt) = metadata.dt {
        writeln!(out, "# dt: {} s", dt)?;
    }
    if let Some(time_steps) = metadata.time_steps {
        writeln!(out, "# Time Steps: {}", time_steps)?;
    }
    if let Some(alpha) = metadata.alpha {
        writeln!(out, "# Alpha: {} m2/s", alpha)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

fn write_header_comments(out: &mut impl Write, config: &CsvConfig) -> io::Result<()> {
    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(out, metadata)?;
        }
    }
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new).map_err(|e| InvarianceError::io(path, e))
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export one 2D field, one line per row `i`
///
/// Non-finite values are written as-is (`NaN`, `inf`) so that a diverged run
/// can still be inspected.
///
/// # Errors
///
/// [`InvarianceError::Io`] when the file cannot be created or written.
pub fn export_field_csv(
    field: ArrayView2<'_, f64>,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    let path = output_path.as_ref();
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut out = create(path)?;
    write_field_rows(&mut out, field, configuration).map_err(|e| InvarianceError::io(path, e))
}

fn write_field_rows(
    out: &mut impl Write,
    field: ArrayView2<'_, f64>,
    configuration: &CsvConfig,
) -> io::Result<()> {
    let delimiter = configuration.delimiter.to_string();

    write_header_comments(out, configuration)?;
    for row in field.rows() {
        let line: Vec<String> = row.iter().map(|&v| format_number(v, configuration)).collect();
        writeln!(out, "{}", line.join(&delimiter))?;
    }
    out.flush()
}

/// Export a `(time, value)` series with a header line
///
/// # Errors
///
/// - [`InvarianceError::InvalidInput`] for empty or mismatched series
/// - [`InvarianceError::Io`] when the file cannot be created or written
///
/// # Example
///
/// ```rust,ignore
/// let probe = history.probe(5, 5).unwrap();
/// export_time_series_csv(result.time_points.as_slice(), probe.to_vec().as_slice(), "probe.csv", None)?;
/// ```
pub fn export_time_series_csv(
    time_serie: &[f64],
    value_serie: &[f64],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    // ============================= Validation =============================

    if time_serie.is_empty() || value_serie.is_empty() {
        return Err(InvarianceError::InvalidInput(
            "empty data: time and value series must not be empty".to_string(),
        ));
    }

    if time_serie.len() != value_serie.len() {
        return Err(InvarianceError::InvalidInput(format!(
            "data length mismatch: {} time points versus {} values",
            time_serie.len(),
            value_serie.len()
        )));
    }

    // ============================= Configuration ==========================

    let path = output_path.as_ref();
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Write ==================================

    let mut out = create(path)?;
    write_series_rows(&mut out, time_serie, value_serie, configuration)
        .map_err(|e| InvarianceError::io(path, e))
}

fn write_series_rows(
    out: &mut impl Write,
    time_serie: &[f64],
    value_serie: &[f64],
    configuration: &CsvConfig,
) -> io::Result<()> {
    write_header_comments(out, configuration)?;
    writeln!(
        out,
        "{}{}{}",
        configuration.time_header, configuration.delimiter, configuration.value_header
    )?;
    for (time, value) in time_serie.iter().zip(value_serie) {
        writeln!(
            out,
            "{}{}{}",
            format_number(*time, configuration),
            configuration.delimiter,
            format_number(*value, configuration)
        )?;
    }
    out.flush()
}

// =================================================================================================
// Tests
// =================================================================================================
