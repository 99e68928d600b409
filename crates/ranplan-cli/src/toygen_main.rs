//! `ranplan-toygen`: sample a toy user-equipment layout from the demo
//! density grid and write it as an equipments JSON file.

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ranplan_cli::{loader, toygen};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ranplan-toygen")]
#[command(version, about = "Generate a toy equipments file from a density grid")]
struct Args {
    /// Output equipments JSON file
    #[arg(long, default_value = "toy_equipments.json")]
    out: PathBuf,

    /// Tile edge length in meters
    #[arg(long, default_value_t = 200.0)]
    tile: f64,

    /// Per-user throughput demand in bit/s
    #[arg(long, default_value_t = 1.0e6)]
    demand: f64,

    /// RNG seed for reproducible layouts
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let rows = toygen::grid_rows(&toygen::DEMO_DENSITY_GRID);
    let mut rng = StdRng::seed_from_u64(args.seed);
    let users =
        toygen::sample_grid_equipments(&rows, (args.tile, args.tile), args.demand, &mut rng);

    loader::save_equipments(&args.out, &users)?;
    tracing::info!(users = users.len(), file = %args.out.display(), "toy equipments written");
    Ok(())
}
