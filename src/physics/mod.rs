//! Physical description of the problem
//!
//! This module provides the domain types of 2D transient heat conduction
//! and the stability analysis of its explicit discretisation.
//!
//! # Core Concepts
//!
//! - **Grid**: uniform rectangular grid, `nx × ny` cells spaced `dx`, `dy`
//! - **Material**: thermal diffusivity α
//! - **Field history**: temperature at every cell and every time step
//! - **Stability bound**: largest `dt` the explicit scheme tolerates
//!
//! # Architecture
//!
//! Physics is **separate from numerics**:
//! - This module says *what* the system is (grid, material, admissible `dt`)
//! - [`crate::solver`] says *how* to advance it in time
//!
//! # Example
//!
//! ```rust
//! use invariance::physics::{Grid, Material, compute_stability_dt, check_stability};
//!
//! let grid = Grid::new(50, 50, 0.01, 0.01).unwrap();
//! let material = Material::new(1e-4).unwrap();
//!
//! let dt_max = compute_stability_dt(material.alpha(), grid.dx(), grid.dy()).unwrap();
//! assert!(check_stability(0.1, dt_max).is_ok());
//! assert!(check_stability(1.0, dt_max).is_err());
//! ```

pub mod field;
pub mod grid;
pub mod material;
pub mod stability;

pub use field::{slice_extrema, FieldHistory};
pub use grid::Grid;
pub use material::Material;
pub use stability::{check_stability, compute_stability_dt, stability_ratio};
