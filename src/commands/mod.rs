//! Subcommands of the `invariance` binary
//!
//! Each module exposes an `Args` struct (clap) and an `execute` function
//! returning `anyhow::Result<()>`.

pub mod evaluate;
pub mod messages;
pub mod simulate;
pub mod synth_sensors;
pub mod validate;
pub mod version;
