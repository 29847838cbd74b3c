//! `invariance validate`: check a configuration without running it

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use invariance::config::load_simulation_config;
use invariance::physics::stability_ratio;

use super::messages;

#[derive(Args)]
pub struct ValidateArgs {
    /// Simulation configuration (JSON)
    #[arg(short, long)]
    pub config: PathBuf,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let config = load_simulation_config(&args.config)
        .with_context(|| format!("cannot load {}", args.config.display()))?;
    let dt_max = config.dt_max()?;
    let dt = config.time.dt;

    messages::info(format!(
        "{}: {} x {} grid, {} steps, alpha = {}",
        args.config.display(),
        config.grid.nx,
        config.grid.ny,
        config.time.n_steps,
        config.material.alpha
    ));

    if let Err(e) = config.check_stability() {
        bail!("{e} (ratio {:.3})", stability_ratio(dt, dt_max));
    }

    messages::info(format!("dt = {dt} <= dt_max = {dt_max} (ratio {:.3})", stability_ratio(dt, dt_max)));
    Ok(())
}
