//! Data export for external analysis
//!
//! # Available formats
//!
//! | Format  | Module   | Content                         |
//! |---------|----------|---------------------------------|
//! | CSV     | [`csv`]  | 2D fields, `(time, value)` probes |
//!
//! JSON artifacts (configuration, metrics, history) are written by
//! [`crate::run::RunDirectory`], not here.

pub mod csv;

pub use csv::{export_field_csv, export_time_series_csv, CsvConfig, CsvMetadata};
