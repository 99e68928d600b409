//! `ranplan`: load a topology from JSON files, run the greedy bandwidth
//! allocation and write the per-pylon report.

use anyhow::{Context, Result};
use clap::Parser;
use ranplan_cli::{loader, report};
use ranplan_core::{GreedyAllocator, PathlossModel, Topology};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ranplan")]
#[command(version, about = "Greedy bandwidth allocation over a pylon/user topology")]
struct Args {
    /// JSON user equipments file to read
    #[arg(long, value_name = "FILE")]
    equipments: PathBuf,

    /// JSON towers file to read
    #[arg(long, value_name = "FILE")]
    towers: PathBuf,

    /// JSON antenna models file to read
    #[arg(long, value_name = "FILE")]
    antennas: PathBuf,

    /// Pathloss model to use: oh, fs or simple
    #[arg(long, default_value = "oh")]
    pathloss: String,

    /// Output directory for the allocation report
    #[arg(long, default_value = "output")]
    out: PathBuf,

    /// Verbose (debug-level) logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            // The report carries the partial allocation; the exit code is
            // the unambiguous failure signal.
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the allocation served every user.
fn run(args: &Args) -> Result<bool> {
    // Configuration errors fail before any allocation work starts.
    let pathloss: PathlossModel = args.pathloss.parse()?;

    tracing::info!(file = %args.antennas.display(), "loading antenna models");
    let antennas = loader::load_antennas(&args.antennas)?;
    tracing::info!(file = %args.towers.display(), "loading towers");
    let towers = loader::load_towers(&args.towers)?;
    tracing::info!(file = %args.equipments.display(), "loading user equipments");
    let equipments = loader::load_equipments(&args.equipments)?;

    let mut topology = Topology::build(antennas, towers, equipments)
        .context("cannot build the topology")?;

    tracing::info!(%pathloss, "running greedy allocation");
    let outcome = GreedyAllocator::new(pathloss).run(&mut topology)?;

    report::reset_output_files(&args.out, &["allocation.txt"])?;
    let report_path = args.out.join("allocation.txt");
    report::write_allocation(&report_path, &outcome)?;
    tracing::info!(file = %report_path.display(), complete = outcome.is_complete(),
        "allocation report written");

    Ok(outcome.is_complete())
}
