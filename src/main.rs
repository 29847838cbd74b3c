//! invariance command-line interface
//!
//! ```text
//! invariance validate --config sim.json
//! invariance simulate --config sim.json --out runs/plate-01 --plot
//! invariance synth-sensors --run runs/plate-01 --noise 0.5 --out sensors.csv
//! invariance evaluate --run runs/plate-01 --sensors sensors.csv
//! ```

mod commands;

use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::process::ExitCode;

use commands::messages;

/// 2D heat diffusion with a stability gate and sensor residuals
#[derive(Parser)]
#[command(name = "invariance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Auto-calibrated physics, starting with thermal diffusion", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error); falls back to RUST_LOG
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the installed version
    Version(commands::version::VersionArgs),
    /// Check a configuration and its stability
    Validate(commands::validate::ValidateArgs),
    /// Run a simulation into a new run directory
    Simulate(commands::simulate::SimulateArgs),
    /// Compare a run with sensor measurements
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Sample a synthetic sensor dataset from a run
    SynthSensors(commands::synth_sensors::SynthSensorsArgs),
}

fn init_logging(level: Option<&str>) {
    let level = level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse::<LevelFilter>().ok()))
        .unwrap_or(LevelFilter::Warn);

    Builder::new().filter_level(level).target(Target::Stderr).format_timestamp_millis().init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let outcome = match cli.command {
        Commands::Version(args) => commands::version::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Simulate(args) => commands::simulate::execute(args),
        Commands::Evaluate(args) => commands::evaluate::execute(args),
        Commands::SynthSensors(args) => commands::synth_sensors::execute(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            messages::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
