//! Forward-time centred-space (FTCS) solver for the 2D heat equation
//!
//! # Mathematical Background
//!
//! The heat equation on a rectangle
//!
//! ```text
//! ∂T/∂t = α (∂²T/∂x² + ∂²T/∂y²)
//! ```
//!
//! is discretised with a forward difference in time and second-order central
//! differences in space. With `cx = α dt / dx²` and `cy = α dt / dy²`, every
//! interior cell is advanced by the 5-point stencil
//!
//! ```text
//! Tⁿ⁺¹[r,c] = Tⁿ[r,c]
//!           + cx (Tⁿ[r+1,c] - 2 Tⁿ[r,c] + Tⁿ[r-1,c])
//!           + cy (Tⁿ[r,c+1] - 2 Tⁿ[r,c] + Tⁿ[r,c-1])
//! ```
//!
//! and the edges are reset to the Dirichlet value after each step.
//!
//! # Characteristics
//!
//! - **Order**: first order in time, second order in space
//! - **Stability**: conditional, `dt <= 1 / (2α (1/dx² + 1/dy²))`
//! - **Memory**: the whole history, `O(n_steps · nx · ny)`
//!
//! # Stability
//!
//! The solver executes whatever `dt` it is given. Call
//! [`crate::physics::check_stability`] first: an unstable `dt` shows up as
//! growing or NaN values, not as an error.
//!
//! # Example
//!
//! ```rust
//! use invariance::solver::simulate_heat_2d;
//!
//! let history = simulate_heat_2d(10, 10, 1.0, 1.0, 0.01, 10, 1.0, 100.0, 0.0).unwrap();
//! assert_eq!(history.shape(), (11, 10, 10));
//! assert!(history.final_slice().iter().all(|&t| t < 100.0));
//! ```

use ndarray::{s, Array3, ArrayView2, ArrayViewMut2, Axis, Zip};

use crate::error::Result;
use crate::physics::{FieldHistory, Grid, Material};
use crate::solver::boundary::{BoundaryCondition, InitialCondition};
use crate::solver::scenario::Scenario;
use crate::solver::{SimulationResult, Solver, SolverConfiguration};

// =================================================================================================
// FTCS Solver
// =================================================================================================

/// Explicit FTCS time-stepping solver
///
/// # Algorithm
///
/// 1. Allocate the `(n_steps + 1, nx, ny)` history
/// 2. Write the initial condition into slice 0, then impose the boundary
/// 3. For each step `n`, read slice `n` and write slice `n + 1`:
///    - stencil on every interior cell
///    - boundary on the four edges
///
/// Slices `n` and `n + 1` are distinct memory, so no cell ever reads an
/// already-updated neighbour.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitSolver;

impl ExplicitSolver {
    /// Create a new FTCS solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use invariance::solver::{ExplicitSolver, Solver};
    ///
    /// let solver = ExplicitSolver::new();
    /// assert_eq!(solver.name(), "Explicit FTCS");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for ExplicitSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult> {
        // ====== Step 1: Validation ======

        config.validate()?;
        scenario.validate()?;

        let grid = scenario.grid;
        let dt = config.dt;
        let n_steps = config.n_steps;

        // ====== Step 2: Setup ======

        let (cx, cy) = coefficients(&grid, &scenario.material, dt);

        let mut history = match &scenario.initial {
            InitialCondition::Uniform(value) => Array3::from_elem((n_steps + 1, grid.nx(), grid.ny()), *value),
            InitialCondition::Field(_) => {
                let mut history = Array3::zeros((n_steps + 1, grid.nx(), grid.ny()));
                scenario.initial.fill(history.index_axis_mut(Axis(0), 0));
                history
            }
        };
        scenario.boundary.apply(history.index_axis_mut(Axis(0), 0));

        // ====== Step 3: Time Integration ======

        for n in 0..n_steps {
            let (done, todo) = history.view_mut().split_at(Axis(0), n + 1);
            let current = done.index_axis(Axis(0), n);
            let mut next = todo.index_axis_move(Axis(0), 0);

            advance_interior(current, next.view_mut(), cx, cy);
            scenario.boundary.apply(next);
        }

        // ====== Step 4: Build Result ======

        let mut result = SimulationResult::new(FieldHistory::new(history), dt);

        result.add_metadata("solver", self.name());
        result.add_metadata("time steps", &n_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("cx", &cx.to_string());
        result.add_metadata("cy", &cy.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Explicit FTCS"
    }
}

/// Diffusion numbers `(α dt / dx², α dt / dy²)`
pub fn coefficients(grid: &Grid, material: &Material, dt: f64) -> (f64, f64) {
    let alpha = material.alpha();
    (alpha * dt / (grid.dx() * grid.dx()), alpha * dt / (grid.dy() * grid.dy()))
}

/// One stencil application: read `current`, write the interior of `next`
///
/// Edge cells of `next` are left untouched.
///
/// # Panics
///
/// Panics when `current` and `next` differ in shape.
pub fn advance_interior(
    current: ArrayView2<'_, f64>,
    mut next: ArrayViewMut2<'_, f64>,
    cx: f64,
    cy: f64,
) {
    assert_eq!(current.dim(), next.dim(), "stencil views must have the same shape");
    let interior = next.slice_mut(s![1..-1, 1..-1]);

    // Zip indices are relative to the interior window, hence the +1 shift
    let stencil = |(r, c): (usize, usize), out: &mut f64| {
        let (r, c) = (r + 1, c + 1);
        let centre = current[[r, c]];
        *out = centre
            + cx * (current[[r + 1, c]] - 2.0 * centre + current[[r - 1, c]])
            + cy * (current[[r, c + 1]] - 2.0 * centre + current[[r, c - 1]]);
    };

    run_stencil(interior, stencil);
}

#[cfg(feature = "parallel")]
fn run_stencil<F>(interior: ArrayViewMut2<'_, f64>, stencil: F)
where
    F: Fn((usize, usize), &mut f64) + Sync + Send,
{
    if interior.len() > crate::solver::parallel_threshold() {
        Zip::indexed(interior).par_for_each(stencil);
    } else {
        Zip::indexed(interior).for_each(stencil);
    }
}

#[cfg(not(feature = "parallel"))]
fn run_stencil<F>(interior: ArrayViewMut2<'_, f64>, stencil: F)
where
    F: Fn((usize, usize), &mut f64),
{
    Zip::indexed(interior).for_each(stencil);
}

// =================================================================================================
// Functional entry point
// =================================================================================================

/// Run the explicit scheme on a uniform rectangle and return the full history
///
/// Thin wrapper over [`ExplicitSolver`] for a uniform initial temperature
/// and a Dirichlet boundary.
///
/// # Errors
///
/// - `nx < 3` or `ny < 3`: [`crate::InvarianceError::InvalidInput`]
/// - non-positive `dx`, `dy`, `alpha` or `dt`: [`crate::InvarianceError::Domain`]
///
/// No stability check is made.
#[allow(clippy::too_many_arguments)]
pub fn simulate_heat_2d(
    nx: usize,
    ny: usize,
    dx: f64,
    dy: f64,
    dt: f64,
    n_steps: usize,
    alpha: f64,
    initial_temperature: f64,
    boundary_value: f64,
) -> Result<FieldHistory> {
    let scenario = Scenario::new(
        Grid::new(nx, ny, dx, dy)?,
        Material::new(alpha)?,
        BoundaryCondition::Dirichlet(boundary_value),
        InitialCondition::Uniform(initial_temperature),
    );
    let config = SolverConfiguration::new(dt, n_steps);

    Ok(ExplicitSolver::new().solve(&scenario, &config)?.history)
}

// =================================================================================================
// Tests
// =================================================================================================
