//! `invariance synth-sensors`: sample a noisy sensor dataset from a run

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use invariance::analysis::{generate_synthetic_sensors, write_sensor_csv, SyntheticSensorPlan};
use invariance::run::RunDirectory;
use invariance::runtime::DEFAULT_SEED;

use super::messages;

#[derive(Args)]
pub struct SynthSensorsArgs {
    /// Run directory produced by `simulate`
    #[arg(short, long)]
    pub run: PathBuf,

    /// Number of observations
    #[arg(long, default_value_t = 50)]
    pub count: usize,

    /// Standard deviation of the Gaussian noise
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// RNG seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output CSV
    #[arg(short, long)]
    pub out: PathBuf,
}

pub fn execute(args: SynthSensorsArgs) -> Result<()> {
    let run = RunDirectory::open(&args.run)?;
    let (history, dt) = run
        .load_history()
        .with_context(|| format!("cannot load the history of {}", args.run.display()))?;

    let plan = SyntheticSensorPlan { count: args.count, noise_std: args.noise, seed: args.seed };
    let sensors = generate_synthetic_sensors(&history, dt, &plan)?;
    write_sensor_csv(&args.out, &sensors)?;

    messages::info(format!(
        "{} synthetic sensors (noise {}, seed {}) written to {}",
        sensors.len(),
        plan.noise_std,
        plan.seed,
        args.out.display()
    ));
    Ok(())
}
