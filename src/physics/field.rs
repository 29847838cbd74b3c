//! Temperature field history
//!
//! The history is a dense `(n_steps + 1) × nx × ny` array of `f64`, indexed by
//! `(step, i, j)` in row-major (step-major) order. It is produced once by the
//! solver and only read afterwards, so [`FieldHistory`] exposes read-only views.
//!
//! # Memory Layout
//!
//! `8 × (n_steps + 1) × nx × ny` bytes, all kept in memory.

use ndarray::{Array3, ArrayView1, ArrayView2, Axis};
use std::fmt;

use crate::error::{InvarianceError, Result};
use crate::physics::grid::MIN_CELLS;

/// Full time history of a 2D temperature field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldHistory {
    data: Array3<f64>,
}

impl FieldHistory {
    /// Wrap a solver-built array; shape is trusted
    pub(crate) fn new(data: Array3<f64>) -> Self {
        Self { data }
    }

    /// Wrap an externally produced array (e.g. loaded from disk)
    ///
    /// # Errors
    ///
    /// [`InvarianceError::InvalidInput`] when the array has no time slice or a
    /// spatial axis shorter than 3 cells.
    pub fn from_array(data: Array3<f64>) -> Result<Self> {
        let (slices, nx, ny) = data.dim();
        if slices == 0 {
            return Err(InvarianceError::InvalidInput(
                "field history must contain at least one time slice".to_string(),
            ));
        }
        if nx < MIN_CELLS || ny < MIN_CELLS {
            return Err(InvarianceError::InvalidInput(format!(
                "field history slices must be at least {MIN_CELLS} x {MIN_CELLS}, got {nx} x {ny}"
            )));
        }
        Ok(Self { data })
    }

    // ========================================== Queries ==========================================

    /// `(n_steps + 1, nx, ny)`
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Number of stored time slices (`n_steps + 1`)
    pub fn n_slices(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Number of time steps taken
    pub fn n_steps(&self) -> usize {
        self.n_slices() - 1
    }

    /// Number of rows
    pub fn nx(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Number of columns
    pub fn ny(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    // ======================================== Extractions ========================================

    /// Field at time step `step`
    ///
    /// # Panics
    ///
    /// Panics when `step > n_steps`.
    pub fn slice(&self, step: usize) -> ArrayView2<'_, f64> {
        self.data.index_axis(Axis(0), step)
    }

    /// Field at t = 0
    pub fn initial_slice(&self) -> ArrayView2<'_, f64> {
        self.slice(0)
    }

    /// Field at the last simulated time
    pub fn final_slice(&self) -> ArrayView2<'_, f64> {
        self.slice(self.n_steps())
    }

    /// Value at `(step, i, j)`, `None` when out of range
    pub fn value(&self, step: usize, i: usize, j: usize) -> Option<f64> {
        self.data.get((step, i, j)).copied()
    }

    /// Temperature of cell `(i, j)` at every time step
    pub fn probe(&self, i: usize, j: usize) -> Option<ArrayView1<'_, f64>> {
        if i >= self.nx() || j >= self.ny() {
            return None;
        }
        Some(self.data.slice(ndarray::s![.., i, j]))
    }

    /// Minimum over the whole history (NaN values are skipped)
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Maximum over the whole history (NaN values are skipped)
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// `true` when no value is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Row-major values, step-major
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }
}

/// Min / max of a single slice (NaN values are skipped)
pub fn slice_extrema(slice: ArrayView2<'_, f64>) -> (f64, f64) {
    slice.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

impl fmt::Display for FieldHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slices, nx, ny) = self.shape();
        write!(f, "FieldHistory [{} * {} * {}]", slices, nx, ny)
    }
}

// ==================== Tests ====================
