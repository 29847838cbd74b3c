//! Numerical solvers
//!
//! This module advances a heat-conduction [`Scenario`] in time.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Grid and material
//!    - Boundary condition (Dirichlet edges)
//!    - Initial condition
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Time step `dt`
//!    - Number of steps
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the scheme, returns the full history
//!    - Does not decide whether `dt` is acceptable
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverConfiguration`, `SimulationResult`
//! - **`boundary`**: `BoundaryCondition`, `InitialCondition`
//! - **`scenario`**: `Scenario`
//! - **`methods`**: `ExplicitSolver` (FTCS) and the `simulate_heat_2d` entry point
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐
//! │ Grid/Material│   │ compute_stability_dt │ ← caller gate
//! └──────┬───────┘   └──────────┬───────────┘
//!        │                      │ dt <= dt_max ?
//! ┌──────▼───────┐   ┌──────────▼───────────┐
//! │ Scenario     │──►│ ExplicitSolver       │
//! └──────────────┘   └──────────┬───────────┘
//!                               │
//!                    ┌──────────▼───────────┐
//!                    │ SimulationResult     │ ← (n_steps+1, nx, ny)
//!                    └──────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! All solver methods return [`crate::Result`]. Common errors:
//! - Invalid configuration (non-positive `dt`)
//! - Invalid scenario (initial field shape does not match the grid)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod boundary;
mod methods;
mod scenario;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand the interior update to Rayon is an execution
// concern, so it lives here rather than in the stencil.
//
// Stored in an AtomicUsize so it can be changed at runtime (benchmarks, tests)
// without a lock per step. Relaxed ordering is enough: it is a performance
// hint, not a synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of interior cells above which one step is updated in parallel
const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The FTCS step updates the interior sequentially when it holds at most
/// this many cells, and with Rayon otherwise (only with the `parallel`
/// feature). Both paths give bitwise identical results.
///
/// # Example
///
/// ```rust
/// use invariance::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use invariance::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// Serialises tests that change the threshold.
#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Saves the threshold on construction and restores it on drop.
///
/// Holds [`THRESHOLD_LOCK`] for its whole lifetime, so two guards never overlap.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value`; the previous value comes back on drop
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{SimulationResult, Solver, SolverConfiguration};

pub use boundary::{BoundaryCondition, InitialCondition};
pub use scenario::Scenario;

pub use methods::ftcs::{advance_interior, coefficients};
pub use methods::{simulate_heat_2d, ExplicitSolver};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::physics::FieldHistory;

/// First time step holding a NaN or infinite value, if any
///
/// The solver never checks this itself; callers use it to diagnose a run
/// that slipped past the stability gate.
///
/// # Example
///
/// ```rust
/// use invariance::solver::{first_non_finite, simulate_heat_2d};
///
/// let history = simulate_heat_2d(5, 5, 1.0, 1.0, 0.1, 5, 1.0, 1.0, 0.0).unwrap();
/// assert_eq!(first_non_finite(&history), None);
/// ```
pub fn first_non_finite(history: &FieldHistory) -> Option<usize> {
    (0..history.n_slices()).find(|&step| history.slice(step).iter().any(|v| !v.is_finite()))
}

// =================================================================================================
// Tests
// =================================================================================================
