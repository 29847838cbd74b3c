//! Visualization of simulation results using `plotters`
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **field**: Heatmap of one 2D slice, temperature-vs-time probes
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use invariance::output::visualization::{plot_field_heatmap, PlotConfig};
//!
//! let config = PlotConfig::heatmap("t = 10 s");
//! plot_field_heatmap(history.final_slice(), &grid, "field.png", Some(&config))?;
//! ```
//!
//! | Use Case | Function |
//! |----------|----------|
//! | Spatial field at one time step | `plot_field_heatmap` |
//! | Temperature of one cell over time | `plot_probe` |

pub mod config;
pub mod field;

pub use config::{PlotConfig, NO_TITLE};
pub use field::{plot_field_heatmap, plot_probe};
