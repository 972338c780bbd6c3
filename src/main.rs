//! WellGeo - borehole geometry and synthetic geophysics from well logs
//!
//! # Usage
//!
//! ```bash
//! # Everything: trajectory, DLS risk report, synthetic seismogram
//! wellgeo analyze logs/15_9-F-11.las --pretty
//!
//! # Only one branch
//! wellgeo trajectory survey.csv
//! wellgeo synthetic logs/15_9-F-11.las --seed 42 --max-points 500
//!
//! # Print or save the effective configuration
//! wellgeo config --output wellgeo.toml
//! ```
//!
//! # Environment Variables
//!
//! - `WELLGEO_CONFIG`: Path to a TOML config (default: ./wellgeo.toml, then built-ins)
//! - `RUST_LOG`: Logging level (default: info)
//!
//! Products are written to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use wellgeo::config::{self, defaults, EngineConfig};
use wellgeo::curves::ResolvedCurves;
use wellgeo::logs;
use wellgeo::pipeline::{self, compute_products};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "wellgeo")]
#[command(about = "Well trajectory DLS risk and synthetic seismograms from LAS/CSV logs")]
#[command(version)]
struct CliArgs {
    /// Engine config TOML (overrides WELLGEO_CONFIG and ./wellgeo.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for the schematic section jitter (reproducible output)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Decimate seismic series to about this many samples for display
    #[arg(long, global = true, default_value_t = defaults::DISPLAY_MAX_POINTS)]
    max_points: usize,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute every product for one well
    Analyze {
        /// LAS (.las) or CSV log file
        file: PathBuf,
    },

    /// Trajectory and drilling-risk report only
    Trajectory {
        /// LAS (.las) or CSV log file
        file: PathBuf,
    },

    /// Synthetic seismogram and schematic section only
    Synthetic {
        /// LAS (.las) or CSV log file
        file: PathBuf,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

// ============================================================================
// Helpers
// ============================================================================

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(args: &CliArgs) -> Result<EngineConfig> {
    let mut engine_config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::load(),
    };
    if let Some(seed) = args.seed {
        engine_config.section.seed = Some(seed);
    }
    Ok(engine_config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

fn load_curves(path: &Path) -> Result<wellgeo::CurveSet> {
    logs::load_log(path).with_context(|| format!("Failed to load log {}", path.display()))
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    config::init(load_config(&args)?);
    let engine_config = config::get();

    match &args.command {
        Command::Analyze { file } => {
            let curves = load_curves(file)?;
            let products = compute_products(&curves, engine_config).decimated(args.max_points);
            print_json(&products, args.pretty)?;
        }
        Command::Trajectory { file } => {
            let curves = load_curves(file)?;
            let resolved = ResolvedCurves::resolve(&curves, &engine_config.curves);
            let products = pipeline::trajectory_branch(&resolved, &curves, engine_config);
            print_json(&products, args.pretty)?;
        }
        Command::Synthetic { file } => {
            let curves = load_curves(file)?;
            let resolved = ResolvedCurves::resolve(&curves, &engine_config.curves);
            let products = pipeline::seismic_branch(&resolved, engine_config)
                .map(|p| p.decimated(args.max_points));
            print_json(&products, args.pretty)?;
        }
        Command::Config { output } => match output {
            Some(path) => {
                engine_config
                    .save_to_file(path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "Config written");
            }
            None => print!("{}", engine_config.to_toml()?),
        },
    }

    Ok(())
}
