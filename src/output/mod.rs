//! Output of simulation results
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← heatmaps and probes
//! │   ├── config.rs
//! │   └── field.rs
//! └── export/             ← data export
//!     └── csv.rs
//! ```
//!
//! Both sub-modules take plain `ndarray` views or `&[f64]` slices, so they
//! work on any slice of a [`FieldHistory`](crate::physics::FieldHistory).

pub mod export;
pub mod visualization;

pub use export::{export_field_csv, export_time_series_csv, CsvConfig, CsvMetadata};
pub use visualization::{plot_field_heatmap, plot_probe, PlotConfig};
