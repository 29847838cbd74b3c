//! Uniform rectangular grid
//!
//! Cells are addressed by `(i, j)` where `i` is the row index along x
//! (`0..nx`) and `j` the column index along y (`0..ny`). Cell `(i, j)` sits at
//! physical position `(i * dx, j * dy)`.

use crate::error::{InvarianceError, Result};

/// Smallest number of cells per axis: two boundary cells and one interior cell
pub const MIN_CELLS: usize = 3;

/// Uniform 2D grid
///
/// # Invariants
///
/// - `nx >= 3` and `ny >= 3`
/// - `dx > 0` and `dy > 0`, both finite
///
/// # Example
///
/// ```rust
/// use invariance::physics::Grid;
///
/// let grid = Grid::new(10, 20, 0.5, 0.25).unwrap();
/// assert_eq!(grid.cells(), 200);
/// assert_eq!(grid.interior_cells(), 8 * 18);
/// assert!(grid.is_edge(0, 5));
/// assert!(!grid.is_edge(4, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
}

impl Grid {
    /// Create a grid, checking the invariants
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Result<Self> {
        if nx < MIN_CELLS || ny < MIN_CELLS {
            return Err(InvarianceError::InvalidInput(format!(
                "grid must have at least {MIN_CELLS} cells per axis, got {nx} x {ny}"
            )));
        }
        if !(dx.is_finite() && dx > 0.0) {
            return Err(InvarianceError::Domain { name: "dx", value: dx });
        }
        if !(dy.is_finite() && dy > 0.0) {
            return Err(InvarianceError::Domain { name: "dy", value: dy });
        }

        Ok(Self { nx, ny, dx, dy })
    }

    /// Number of rows (x direction)
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of columns (y direction)
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Spacing along x
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Spacing along y
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// `(nx, ny)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.nx * self.ny
    }

    /// Number of cells updated by the stencil
    pub fn interior_cells(&self) -> usize {
        (self.nx - 2) * (self.ny - 2)
    }

    /// Check that `(i, j)` addresses a cell of this grid
    pub fn contains(&self, i: usize, j: usize) -> bool {
        i < self.nx && j < self.ny
    }

    /// Check that `(i, j)` lies on one of the four edges
    pub fn is_edge(&self, i: usize, j: usize) -> bool {
        self.contains(i, j) && (i == 0 || j == 0 || i == self.nx - 1 || j == self.ny - 1)
    }

    /// Physical x coordinate of row `i`
    pub fn x(&self, i: usize) -> f64 {
        self.dx * i as f64
    }

    /// Physical y coordinate of column `j`
    pub fn y(&self, j: usize) -> f64 {
        self.dy * j as f64
    }

    /// Extent of the domain along x
    pub fn width(&self) -> f64 {
        (self.nx - 1) as f64 * self.dx
    }

    /// Extent of the domain along y
    pub fn height(&self) -> f64 {
        (self.ny - 1) as f64 * self.dy
    }

    /// Cell closest to the geometric centre
    pub fn center(&self) -> (usize, usize) {
        (self.nx / 2, self.ny / 2)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
