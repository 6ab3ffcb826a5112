//! Command line runner: read a scenario, simulate it, print the final grid.

mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ecosim_core::{RenderConfig, RunConfig, SimulationConfig};
use ecosim_world::{DensityGrid, Scenario};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Predator-prey simulation on a toroidal grid
#[derive(Parser, Debug)]
#[command(name = "ecosim")]
#[command(about = "Run a predator-prey scenario and print the final density grid")]
struct Args {
    /// Scenario file (reads stdin when omitted)
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Output format for the final state
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(long)]
    log_filter: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Log a population snapshot every N ticks (0 disables)
    #[arg(long, default_value_t = 0)]
    summary_interval: u64,

    /// Mark cells with equal prey and predator counts with this symbol
    #[arg(long)]
    contested_symbol: Option<char>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per grid row
    Text,
    /// Full simulation result as JSON
    Json,
}

impl Args {
    fn run_config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            simulation: SimulationConfig {
                summary_interval: self.summary_interval,
            },
            render: RenderConfig {
                contested_symbol: self.contested_symbol,
                ..defaults.render
            },
            log_filter: self.log_filter.clone().unwrap_or(defaults.log_filter),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.run_config();

    telemetry::init_telemetry(&config.log_filter, args.json_logs)?;

    let scenario = load_scenario(args.input.as_deref())?;
    info!(
        rows = scenario.rows,
        cols = scenario.cols,
        steps = scenario.steps,
        prey = scenario.prey.len(),
        predators = scenario.predators.len(),
        "Scenario loaded"
    );

    let result = scenario
        .execute(config.simulation.clone())
        .context("invalid scenario")?;

    let output = match args.format {
        OutputFormat::Text => DensityGrid::from_world(&result.world).render(&config.render),
        OutputFormat::Json => {
            let mut json = result
                .to_json()
                .context("failed to serialize simulation result")?;
            json.push('\n');
            json
        }
    };

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to write output")?;

    Ok(())
}

fn load_scenario(path: Option<&Path>) -> Result<Scenario> {
    match path {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("failed to load scenario from {}", path.display())),
        None => Scenario::from_reader(io::stdin().lock())
            .context("failed to load scenario from stdin"),
    }
}
