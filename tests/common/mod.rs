//! Common utilities for integration tests

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{
    config_json,
    relative_error,
    sine_mode_field,
    sine_mode_growth_factor,
    write_config,
};
