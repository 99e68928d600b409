//! `ranplan-stations`: convert an ANFR base-station CSV export into a
//! towers JSON file in the local planar frame.

use anyhow::Result;
use clap::Parser;
use ranplan_cli::{loader, stations};
use ranplan_core::geo::{GpsCoord, LocalFrame};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ranplan-stations")]
#[command(version, about = "Import pylon sites from an ANFR station CSV")]
struct Args {
    /// Station CSV file (`;`-separated, DMS `coord` column)
    csv: PathBuf,

    /// Output towers JSON file
    #[arg(long, default_value = "towers.json")]
    out: PathBuf,

    /// Latitude of the local frame's southwest origin, decimal degrees
    #[arg(long, default_value_t = 45.69)]
    origin_lat: f64,

    /// Longitude of the local frame's southwest origin, decimal degrees
    #[arg(long, default_value_t = 4.79)]
    origin_lon: f64,
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
    let frame = LocalFrame::new(GpsCoord::new(args.origin_lat, args.origin_lon));
    let pylons = stations::import_stations(&args.csv, &frame)?;

    loader::save_towers(&args.out, &pylons)?;
    tracing::info!(pylons = pylons.len(), file = %args.out.display(), "towers file written");
    Ok(())
}
