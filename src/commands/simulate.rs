//! `invariance simulate`: gate, solve and persist one run

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use invariance::config::load_simulation_config;
use invariance::output::export::{export_time_series_csv, CsvConfig, CsvMetadata};
use invariance::output::visualization::{plot_field_heatmap, plot_probe, PlotConfig};
use invariance::run::{RunDirectory, FIELD_PLOT_FILE, PROBE_FILE, PROBE_PLOT_FILE};
use invariance::solver::{first_non_finite, ExplicitSolver, Solver};

use super::messages;

#[derive(Args)]
pub struct SimulateArgs {
    /// Simulation configuration (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Run directory to create (must not exist)
    #[arg(short, long)]
    pub out: PathBuf,

    /// Also render the final field and the centre probe as PNG
    #[arg(long)]
    pub plot: bool,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let config = load_simulation_config(&args.config)
        .with_context(|| format!("cannot load {}", args.config.display()))?;

    // Gate before anything touches the filesystem
    let dt_max = config.dt_max()?;
    if let Err(e) = config.check_stability() {
        bail!("{e}; refusing to simulate");
    }

    let run = RunDirectory::create(&args.out, &config)
        .with_context(|| format!("cannot create run directory {}", args.out.display()))?;

    let scenario = config.to_scenario()?;
    let solver = ExplicitSolver::new();
    log::info!("solving {:?} with {}", scenario, solver.name());
    let result = solver.solve(&scenario, &config.solver_configuration())?;

    if let Some(step) = first_non_finite(&result.history) {
        messages::warn(format!("non-finite temperatures from step {step} on"));
    }

    run.write_history(&result.history, result.dt)?;
    run.write_final_field(&result.history)?;

    let (ci, cj) = scenario.grid.center();
    let probe: Vec<f64> = result
        .history
        .probe(ci, cj)
        .context("centre cell outside the grid")?
        .to_vec();
    let mut metadata = CsvMetadata::from_simulation(solver.name(), result.dt, config.time.n_steps);
    metadata.grid = Some(scenario.grid.shape());
    metadata.alpha = Some(config.material.alpha);
    metadata.add_custom("Probe", &format!("({ci}, {cj})"));
    export_time_series_csv(
        &result.time_points,
        &probe,
        run.artifact(PROBE_FILE),
        Some(&CsvConfig::default().with_metadata(metadata)),
    )?;

    let summary = result.summary(dt_max);
    run.update_metrics(&summary)?;
    run.write_manifest(
        "simulate",
        json!({
            "config": args.config.display().to_string(),
            "out": args.out.display().to_string(),
            "plot": args.plot,
        }),
    )?;

    if args.plot {
        let title = format!("t = {} s", summary.t_final);
        plot_field_heatmap(
            result.final_slice(),
            &scenario.grid,
            run.artifact(FIELD_PLOT_FILE),
            Some(&PlotConfig::heatmap(title)),
        )?;
        plot_probe(
            &result.time_points,
            &probe,
            run.artifact(PROBE_PLOT_FILE),
            Some(&PlotConfig::probe(format!("Cell ({ci}, {cj})"))),
        )?;
    }

    messages::info(format!(
        "t_final = {}, T in [{}, {}], dt = {} <= dt_max = {}",
        summary.t_final, summary.min_temperature, summary.max_temperature, result.dt, dt_max
    ));
    messages::info(format!("run written to {}", run.path().display()));
    Ok(())
}
