//! `invariance evaluate`: compare a run with sensor data

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use invariance::analysis::{evaluate, load_sensor_csv};
use invariance::run::{RunDirectory, RESIDUALS_FILE};

use super::messages;

#[derive(Args)]
pub struct EvaluateArgs {
    /// Run directory produced by `simulate`
    #[arg(short, long)]
    pub run: PathBuf,

    /// Sensor dataset (CSV with columns i,j,t,temperature)
    #[arg(short, long)]
    pub sensors: PathBuf,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let run = RunDirectory::open(&args.run)?;
    let (history, dt) = run
        .load_history()
        .with_context(|| format!("cannot load the history of {}", args.run.display()))?;
    let sensors = load_sensor_csv(&args.sensors)
        .with_context(|| format!("cannot load sensors from {}", args.sensors.display()))?;

    let evaluation = evaluate(&history, &sensors, dt)?;

    run.write_residuals(&evaluation.residuals)?;
    run.update_metrics(&evaluation.metrics)?;

    let metrics = evaluation.metrics;
    messages::info(format!(
        "{} measurements: rmse = {:.6}, mae = {:.6}, max_error = {:.6}",
        metrics.n_measurements, metrics.rmse, metrics.mae, metrics.max_error
    ));
    messages::info(format!("residuals written to {}", run.artifact(RESIDUALS_FILE).display()));
    Ok(())
}
