//! JSON input files: antenna catalogue, towers, user equipments.
//!
//! Schemas match the planning datasets:
//!
//! - antennas: `[{"name", "power", "gain", "bandwidth", "frequency", "range"}]`
//! - towers: `[{"pos": {"x", "y", "h"}}]`
//! - equipments: `[{"pos": {"x", "y"}, "demand"}]`

use anyhow::{Context, Result};
use ranplan_core::{AntennaModel, Point, Pylon, User};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntennaRecord {
    pub name: String,
    /// Transmit power in dBm.
    pub power: f64,
    /// Antenna gain in dBi.
    pub gain: f64,
    /// Bandwidth capacity in Hz.
    pub bandwidth: f64,
    /// Carrier frequency in Hz.
    pub frequency: f64,
    /// Maximum reach in meters.
    pub range: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TowerPos {
    pub x: f64,
    pub y: f64,
    /// Mount height in meters.
    pub h: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TowerRecord {
    pub pos: TowerPos,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlanarPos {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub pos: PlanarPos,
    /// Throughput demand in bit/s.
    pub demand: f64,
}

impl From<AntennaRecord> for AntennaModel {
    fn from(r: AntennaRecord) -> Self {
        AntennaModel {
            name: r.name,
            power_dbm: r.power,
            gain_dbi: r.gain,
            bandwidth_hz: r.bandwidth,
            frequency_hz: r.frequency,
            reach_m: r.range,
        }
    }
}

impl From<TowerRecord> for Pylon {
    fn from(r: TowerRecord) -> Self {
        Pylon::new(Point::new(r.pos.x, r.pos.y), r.pos.h)
    }
}

impl From<EquipmentRecord> for User {
    fn from(r: EquipmentRecord) -> Self {
        User::new(Point::new(r.pos.x, r.pos.y), r.demand)
    }
}

fn load_records<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("cannot open {} file {}", what, path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("cannot parse {} file {}", what, path.display()))
}

/// Load the antenna catalogue.
pub fn load_antennas(path: &Path) -> Result<Vec<AntennaModel>> {
    let records: Vec<AntennaRecord> = load_records(path, "antenna models")?;
    Ok(records.into_iter().map(Into::into).collect())
}

/// Load the tower (pylon site) layout.
pub fn load_towers(path: &Path) -> Result<Vec<Pylon>> {
    let records: Vec<TowerRecord> = load_records(path, "towers")?;
    Ok(records.into_iter().map(Into::into).collect())
}

/// Load the user equipment layout and demands.
pub fn load_equipments(path: &Path) -> Result<Vec<User>> {
    let records: Vec<EquipmentRecord> = load_records(path, "equipments")?;
    Ok(records.into_iter().map(Into::into).collect())
}

/// Write an equipments JSON file usable as `ranplan --equipments` input.
pub fn save_equipments(path: &Path, users: &[User]) -> Result<()> {
    let records: Vec<EquipmentRecord> = users
        .iter()
        .map(|u| EquipmentRecord {
            pos: PlanarPos { x: u.position.x, y: u.position.y },
            demand: u.demand_bps,
        })
        .collect();
    let file = File::create(path)
        .with_context(|| format!("cannot create equipments file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records)
        .with_context(|| format!("cannot write equipments file {}", path.display()))
}

/// Write a towers JSON file usable as `ranplan --towers` input.
pub fn save_towers(path: &Path, pylons: &[Pylon]) -> Result<()> {
    let records: Vec<TowerRecord> = pylons
        .iter()
        .map(|p| TowerRecord {
            pos: TowerPos { x: p.position.x, y: p.position.y, h: p.height_m },
        })
        .collect();
    let file = File::create(path)
        .with_context(|| format!("cannot create towers file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &records)
        .with_context(|| format!("cannot write towers file {}", path.display()))
}
