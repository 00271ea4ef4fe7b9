use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use u_vrptw::io::{init_logging, read_solomon_file, render_summary, write_json, LogFormat};
use u_vrptw::separation::CutPolicy;
use u_vrptw::solver::{HighsDriver, SolveSession, SolverConfig};

/// Exact VRPTW branch-and-cut on Solomon instances.
#[derive(Parser, Debug)]
#[command(name = "vrptw", version, about)]
struct Cli {
    /// Solomon instance file
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
    /// Keep only the first N customers
    #[arg(short, long, value_name = "N")]
    customers: Option<usize>,
    /// Override the fleet bound read from the instance
    #[arg(short, long, value_name = "K")]
    fleet: Option<usize>,
    /// Wall-clock limit in seconds
    #[arg(long, value_name = "SECONDS")]
    time_limit: Option<f64>,
    /// Relative MIP gap
    #[arg(long, value_name = "GAP")]
    mip_gap: Option<f64>,
    #[arg(long, value_name = "N")]
    threads: Option<u32>,
    /// Add at most one sub-tour cut per separation pass
    #[arg(long)]
    single_cut: bool,
    /// JSON solver configuration; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Write the result record as JSON
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Log filter, e.g. "info" or "u_vrptw=debug"
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let format = if args.log_json { LogFormat::Json } else { LogFormat::Pretty };
    init_logging(Some(&args.log_level), format)?;

    let mut config = match &args.config {
        None => SolverConfig::default(),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file)).context("incorrect config file format")?
        }
    };
    if let Some(limit) = args.time_limit {
        config = config.with_time_limit(limit);
    }
    if let Some(gap) = args.mip_gap {
        config = config.with_mip_gap(gap);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if args.single_cut {
        config = config.with_cut_policy(CutPolicy::FirstComponent);
    }
    info!(component = "main", ?config, "Solver configuration");

    let mut instance = read_solomon_file(&args.input, args.customers)
        .with_context(|| format!("cannot read instance {}", args.input.display()))?;
    if instance.name().is_empty() {
        let stem = args
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        instance = instance.with_name(stem);
    }
    if let Some(k) = args.fleet {
        instance = instance.with_fleet_size(k)?;
    }
    if instance.fleet_size().is_none() {
        warn!(component = "main", "No fleet bound; routes are limited by capacity only");
    }

    let session = SolveSession::new(&instance, config)?;
    let result = session.solve(&mut HighsDriver::new())?;
    print!("{}", render_summary(&result));

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        write_json(&result, BufWriter::new(file))?;
        info!(component = "main", path = %path.display(), "Wrote result");
    }
    Ok(())
}
