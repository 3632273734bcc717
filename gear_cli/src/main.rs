//! gearcalc - find gear loadouts that meet a build's stat requirements

mod input;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use gear_core::config::load_game_data;
use gear_core::{GameData, GearSolver};
use report::{MaxStatsReport, SolutionReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Find gear loadouts that meet a build's stat requirements
#[derive(Parser)]
#[command(name = "gearcalc")]
#[command(about = "Gear loadout solver", long_about = None)]
#[command(version)]
struct Cli {
    /// Build file (.toml) or saved preset (.json)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Alternative game data tables (TOML)
    #[arg(short, long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Stop after this many solutions, overriding the build's cap
    #[arg(short, long, value_name = "N", conflicts_with = "all")]
    max: Option<usize>,

    /// Enumerate every solution
    #[arg(long)]
    all: bool,

    /// Print the theoretical maximum of each stat instead of solving
    #[arg(long)]
    max_stats: bool,
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let data = match &cli.rules {
        Some(path) => load_game_data(path)
            .with_context(|| format!("Failed to load game data from {}", path.display()))?,
        None => GameData::standard(),
    };

    let build = input::load(&cli.input)?;
    let solver = GearSolver::new(&data.rules, &data.values, &build.config, &build.locked)
        .context("Build cannot be solved")?;

    if let Some(name) = &build.name {
        println!("Preset: {name}");
    }

    if cli.max_stats {
        print!("{}", MaxStatsReport { solver: &solver });
        return Ok(());
    }

    let solutions = if cli.all {
        solver.solve_with_cap(None)
    } else if let Some(max) = cli.max {
        solver.solve_with_cap(Some(max))
    } else {
        solver.solve()
    };
    tracing::info!(solutions = solutions.len(), "search complete");

    if solutions.is_empty() {
        println!("No solutions found. Try lowering the requirements or unlocking gear.");
        return Ok(());
    }

    for (i, solution) in solutions.iter().enumerate() {
        println!(
            "{}",
            SolutionReport {
                solver: &solver,
                solution,
                number: i + 1,
            }
        );
    }
    Ok(())
}

/// Log to stderr, `info` unless `RUST_LOG` says otherwise
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
