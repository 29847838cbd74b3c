//! Temperature field and probe plotting
//!
//! # Usage
//!
//! ```rust,ignore
//! use invariance::output::visualization::{plot_field_heatmap, plot_probe};
//!
//! let result = solver.solve(&scenario, &config)?;
//! plot_field_heatmap(result.final_slice(), &scenario.grid, "field_final.png", None)?;
//!
//! let probe = result.history.probe(25, 25).unwrap().to_vec();
//! plot_probe(&result.time_points, &probe, "probe.svg", None)?;
//! ```
//!
//! The backend is chosen from the file extension: `.svg` gives an SVG,
//! anything else a bitmap.

use ndarray::ArrayView2;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::config::{PlotConfig, NO_TITLE};
use crate::error::{InvarianceError, Result};
use crate::physics::{slice_extrema, Grid};

fn is_svg(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("svg")
}

fn plot_error(path: &Path, e: Box<dyn Error>) -> InvarianceError {
    InvarianceError::Plot(format!("{}: {}", path.display(), e))
}

/// Blue (cold) to red (hot); non-finite cells are drawn black
fn temperature_color(value: f64, min: f64, max: f64) -> RGBColor {
    if !value.is_finite() {
        return BLACK;
    }
    let span = max - min;
    let t = if span > 0.0 { ((value - min) / span).clamp(0.0, 1.0) } else { 0.5 };
    let (r, g, b) = HSLColor((1.0 - t) * 240.0 / 360.0, 0.9, 0.5).rgb();
    RGBColor(r, g, b)
}

// =================================================================================================
// Heatmap
// =================================================================================================

/// Plot one 2D slice as a heatmap over the physical domain
///
/// Cell `(i, j)` is drawn centred on `(x(i), y(j))`. The color scale spans
/// the finite min/max of the slice.
///
/// # Errors
///
/// - [`InvarianceError::InvalidInput`] when the slice shape differs from the grid
/// - [`InvarianceError::Plot`] when rendering fails
pub fn plot_field_heatmap(
    field: ArrayView2<'_, f64>,
    grid: &Grid,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    if field.dim() != grid.shape() {
        return Err(InvarianceError::InvalidInput(format!(
            "field shape {:?} does not match grid shape {:?}",
            field.dim(),
            grid.shape()
        )));
    }

    let default_config = PlotConfig::heatmap(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    let path = output_path.as_ref();

    let drawn = if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        plot_heatmap_impl(backend, field, grid, config)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        plot_heatmap_impl(backend, field, grid, config)
    };

    drawn.map_err(|e| plot_error(path, e))
}

fn plot_heatmap_impl<DB: DrawingBackend>(
    backend: DB,
    field: ArrayView2<'_, f64>,
    grid: &Grid,
    config: &PlotConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (min, max) = slice_extrema(field);
    let (half_dx, half_dy) = (grid.dx() / 2.0, grid.dy() / 2.0);

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if !config.title.is_empty() {
        builder.caption(&config.title, ("sans-serif", 40).into_font());
    }
    if config.show_grid {
        builder.x_label_area_size(45).y_label_area_size(60);
    }
    let mut chart = builder.build_cartesian_2d(
        -half_dx..(grid.width() + half_dx),
        -half_dy..(grid.height() + half_dy),
    )?;

    if config.show_grid {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;
    }

    chart.draw_series(field.indexed_iter().map(|((i, j), &value)| {
        let (x, y) = (grid.x(i), grid.y(j));
        Rectangle::new(
            [(x - half_dx, y - half_dy), (x + half_dx, y + half_dy)],
            temperature_color(value, min, max).filled(),
        )
    }))?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Probe
// =================================================================================================

/// Plot a temperature time series
///
/// # Errors
///
/// - [`InvarianceError::InvalidInput`] for empty or mismatched series
/// - [`InvarianceError::Plot`] when rendering fails
pub fn plot_probe(
    time_points: &[f64],
    values: &[f64],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    if time_points.is_empty() || time_points.len() != values.len() {
        return Err(InvarianceError::InvalidInput(format!(
            "probe needs matching non-empty series, got {} times and {} values",
            time_points.len(),
            values.len()
        )));
    }

    let default_config = PlotConfig::probe(NO_TITLE);
    let config = config.unwrap_or(&default_config);
    let path = output_path.as_ref();

    let drawn = if is_svg(path) {
        let backend = SVGBackend::new(path, (config.width, config.height));
        plot_probe_impl(backend, time_points, values, config)
    } else {
        let backend = BitMapBackend::new(path, (config.width, config.height));
        plot_probe_impl(backend, time_points, values, config)
    };

    drawn.map_err(|e| plot_error(path, e))
}

fn plot_probe_impl<DB: DrawingBackend>(
    backend: DB,
    time_points: &[f64],
    values: &[f64],
    config: &PlotConfig,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let t_max = time_points.iter().cloned().fold(f64::NEG_INFINITY, f64::max).max(1e-10);
    let finite = || values.iter().cloned().filter(|v| v.is_finite());
    let lo = finite().fold(f64::INFINITY, f64::min);
    let hi = finite().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (0.0, 1.0) };
    let pad = ((hi - lo) * 0.05).max(1e-10);

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if !config.title.is_empty() {
        builder.caption(&config.title, ("sans-serif", 40).into_font());
    }
    if config.show_grid {
        builder.x_label_area_size(45).y_label_area_size(60);
    }
    let mut chart = builder.build_cartesian_2d(0.0..t_max, (lo - pad)..(hi + pad))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.3}", x))
            .y_label_formatter(&|y| format!("{:.3}", y))
            .draw()?;
    }

    chart.draw_series(LineSeries::new(
        time_points
            .iter()
            .zip(values)
            .filter(|(_, v)| v.is_finite())
            .map(|(t, v)| (*t, *v)),
        ShapeStyle::from(&config.line_color).stroke_width(config.line_width),
    ))?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use tempfile::tempdir;

    #[test]
    fn test_temperature_color_scale() {
        assert_eq!(temperature_color(f64::NAN, 0.0, 1.0), BLACK);

        let cold = temperature_color(0.0, 0.0, 100.0);
        let hot = temperature_color(100.0, 0.0, 100.0);
        assert!(cold.2 > cold.0, "cold end should be blue");
        assert!(hot.0 > hot.2, "hot end should be red");

        // flat field does not divide by zero
        let _ = temperature_color(5.0, 5.0, 5.0);
    }

    #[test]
    fn test_plot_field_heatmap_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("field.svg");
        let grid = Grid::new(6, 4, 0.5, 0.5).unwrap();
        let field = Array2::from_shape_fn((6, 4), |(i, j)| (i * j) as f64);
        let config = PlotConfig::heatmap(NO_TITLE).bare();

        plot_field_heatmap(field.view(), &grid, &path, Some(&config)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_field_heatmap_shape_mismatch() {
        let grid = Grid::new(6, 4, 0.5, 0.5).unwrap();
        let field = Array2::<f64>::zeros((4, 6));

        let result = plot_field_heatmap(field.view(), &grid, "unused.svg", None);
        assert!(matches!(result, Err(InvarianceError::InvalidInput(_))));
    }

    #[test]
    fn test_plot_probe_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("probe.svg");
        let times = [0.0, 0.1, 0.2, 0.3];
        let values = [100.0, 80.0, 70.0, f64::NAN];
        let config = PlotConfig::probe(NO_TITLE).bare();

        plot_probe(&times, &values, &path, Some(&config)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_probe_validation() {
        assert!(plot_probe(&[], &[], "unused.svg", None).is_err());
        assert!(plot_probe(&[0.0], &[1.0, 2.0], "unused.svg", None).is_err());
    }
}
