use gravsim::{Dimension, SimulationConfig, SimulationState};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Runs an N-body system headless and prints the final positions, one body per line.
#[derive(Parser, Debug)]
#[command(name = "gravsim", version)]
struct Args {
    /// YAML scenario file; the bounded 2D reference setup when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of steps to run.
    #[arg(short, long, default_value_t = 1000)]
    steps: usize,

    /// Log diagnostics every this many steps (0 disables).
    #[arg(short, long, default_value_t = 100)]
    report_every: usize,

    /// Override the dimension (2 or 3). Every other setting is kept.
    #[arg(short, long)]
    dimension: Option<u8>,

    /// Override the body count.
    #[arg(short = 'n', long)]
    bodies: Option<usize>,

    /// Override the sampling seed.
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(dimension) = args.dimension {
        config.dimension = Dimension::try_from(dimension)?;
    }
    if let Some(n) = args.bodies {
        config.body_count = n;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    Ok(config)
}

fn report(state: &SimulationState) {
    tracing::info!(
        frame = state.frame(),
        kinetic_energy = state.kinetic_energy(),
        momentum = state.momentum_magnitude(),
        "diagnostics"
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gravsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut state = gravsim::initialize(config)?;

    report(&state);
    for _ in 0..args.steps {
        state.step();
        if args.report_every > 0 && state.frame() % args.report_every == 0 {
            report(&state);
        }
    }

    let dim = state.dimension();
    let positions = state.positions_flat();
    let mut out = BufWriter::new(std::io::stdout().lock());
    for body in positions.chunks(dim) {
        let line = body
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    Ok(())
}
