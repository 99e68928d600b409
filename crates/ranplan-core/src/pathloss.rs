//! Signal attenuation models mapping link geometry to a loss in dB.
//!
//! Three interchangeable models, selected by one configuration surface and
//! consumed by both the capacity solver and the greedy engine:
//!
//! - **Okumura-Hata** (`"oh"`, the default): empirical macro-cell model.
//! - **Free-space** (`"fs"`): Friis-style loss scaled by an urban exponent.
//! - **Simple** (`"simple"`): Okumura-Hata baseline at a 1 km reference
//!   distance plus a log-distance term.
//!
//! All three are pure functions of the antenna, the pylon mount height and
//! the link distance.

use crate::topology::AntennaModel;
use crate::types::PlanError;
use std::f64::consts::PI;
use std::str::FromStr;

/// Speed of light in m/s.
const C: f64 = 299_792_458.0;

/// Empirical urban exponent applied to the free-space model.
const FREE_SPACE_ALPHA: f64 = 3.0;

/// Distance loss factor of the simple model, in dB per decade / 10.
const SIMPLE_ETA: f64 = 3.0;

/// Reference distance of the simple model's Okumura-Hata baseline.
const SIMPLE_REFERENCE_M: f64 = 1000.0;

/// Links shorter than this are evaluated at 1 m: every model here is a
/// log-distance law and must not see a zero distance.
const MIN_DISTANCE_M: f64 = 1.0;

/// Propagation model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathlossModel {
    /// Okumura-Hata macro-cell model.
    #[default]
    OkumuraHata,
    /// Free-space loss with an empirical urban exponent.
    FreeSpace,
    /// Okumura-Hata reference baseline plus a log-distance term.
    Simple,
}

impl FromStr for PathlossModel {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oh" => Ok(PathlossModel::OkumuraHata),
            "fs" => Ok(PathlossModel::FreeSpace),
            "simple" => Ok(PathlossModel::Simple),
            other => Err(PlanError::UnknownPathlossModel(other.to_string())),
        }
    }
}

impl std::fmt::Display for PathlossModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathlossModel::OkumuraHata => write!(f, "oh"),
            PathlossModel::FreeSpace => write!(f, "fs"),
            PathlossModel::Simple => write!(f, "simple"),
        }
    }
}

impl PathlossModel {
    /// Attenuation in dB for a link from a pylon to a user.
    pub fn path_loss_db(&self, antenna: &AntennaModel, pylon_height_m: f64, distance_m: f64) -> f64 {
        let d = distance_m.max(MIN_DISTANCE_M);
        match self {
            PathlossModel::OkumuraHata => okumura_hata_db(antenna.frequency_hz, pylon_height_m, d),
            PathlossModel::FreeSpace => free_space_db(antenna.frequency_hz, d),
            PathlossModel::Simple => simple_db(antenna.frequency_hz, pylon_height_m, d),
        }
    }
}

/// Okumura-Hata path loss.
///
/// L = 69.55 + 26.16*log10(f_MHz) - 13.82*log10(H)
///     + (44.9 - 6.55*log10(H)) * log10(d_km)
///
/// Empirical macro-cell model, calibrated for carriers between 150 MHz and
/// 1.5 GHz and base-station heights of 30-200 m; outside that regime the
/// prediction is an extrapolation.
///
/// # Arguments
/// * `frequency_hz` - Carrier frequency in Hz.
/// * `height_m` - Base-station mount height in meters.
/// * `distance_m` - Link distance in meters.
pub fn okumura_hata_db(frequency_hz: f64, height_m: f64, distance_m: f64) -> f64 {
    let f_mhz = frequency_hz / 1e6;
    let d_km = distance_m / 1000.0;

    69.55 + 26.16 * f_mhz.log10() - 13.82 * height_m.log10()
        + (44.9 - 6.55 * height_m.log10()) * d_km.log10()
}

/// Free-space path loss scaled by the urban exponent.
///
/// L = alpha * (10*log10(4*pi*f/c) + 10*log10(d)), alpha = 3
///
/// # Arguments
/// * `frequency_hz` - Carrier frequency in Hz.
/// * `distance_m` - Link distance in meters.
pub fn free_space_db(frequency_hz: f64, distance_m: f64) -> f64 {
    FREE_SPACE_ALPHA
        * (10.0 * (4.0 * PI * frequency_hz / C).log10() + 10.0 * distance_m.log10())
}

/// Simple empirical model: Okumura-Hata at a fixed 1 km reference distance
/// as the baseline loss, plus `eta * log10(d)` for the distance term.
///
/// # Arguments
/// * `frequency_hz` - Carrier frequency in Hz.
/// * `height_m` - Base-station mount height in meters.
/// * `distance_m` - Link distance in meters.
pub fn simple_db(frequency_hz: f64, height_m: f64, distance_m: f64) -> f64 {
    okumura_hata_db(frequency_hz, height_m, SIMPLE_REFERENCE_M)
        + SIMPLE_ETA * distance_m.log10()
}
