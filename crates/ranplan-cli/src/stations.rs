//! ANFR base-station CSV importer.
//!
//! Reads the `;`-separated station export (one row per antenna, DMS GPS
//! coordinates in a `coord` column), deduplicates rows that share a mast,
//! projects the coordinates into the local planar frame and produces pylon
//! sites with a default mount height.

use anyhow::{Context, Result};
use ranplan_core::geo::{parse_dms, GpsCoord, LocalFrame};
use ranplan_core::topology::Pylon;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Mount height assigned to imported stations; the export has no height
/// column.
pub const DEFAULT_HEIGHT_M: f64 = 30.0;

#[derive(Debug, Deserialize)]
struct StationRecord {
    /// DMS coordinate pair, e.g. `45°45'36"N 4°51'00"E`.
    coord: String,
}

/// Parse a `lat lon` DMS pair into a GPS coordinate.
fn parse_coord(coord: &str) -> Result<GpsCoord> {
    let mut parts = coord.split_whitespace();
    let lat = parts
        .next()
        .context("empty coord field")
        .and_then(|s| parse_dms(s).map_err(Into::into))?;
    let lon = parts
        .next()
        .context("coord field has no longitude")
        .and_then(|s| parse_dms(s).map_err(Into::into))?;
    Ok(GpsCoord::new(lat, lon))
}

/// Import pylon sites from an ANFR-style CSV reader.
///
/// Rows sharing the same `coord` value (several antennas on one mast)
/// collapse to a single pylon.
pub fn import_stations_from<R: Read>(reader: R, frame: &LocalFrame) -> Result<Vec<Pylon>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut pylons = Vec::new();
    let mut rows = 0usize;
    for (i, record) in csv_reader.deserialize::<StationRecord>().enumerate() {
        let record = record.with_context(|| format!("bad station row {}", i + 1))?;
        rows += 1;
        if !seen.insert(record.coord.clone()) {
            continue;
        }
        let gps = parse_coord(&record.coord)
            .with_context(|| format!("bad coordinate in station row {}", i + 1))?;
        pylons.push(Pylon::new(frame.to_local(&gps), DEFAULT_HEIGHT_M));
    }

    tracing::info!(
        stations = pylons.len(),
        duplicates = rows - pylons.len(),
        "imported station sites"
    );
    Ok(pylons)
}

/// Import pylon sites from an ANFR-style CSV file.
pub fn import_stations(path: &Path, frame: &LocalFrame) -> Result<Vec<Pylon>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open stations file {}", path.display()))?;
    import_stations_from(file, frame)
}
