//! Geodetic helpers: haversine distance, DMS parsing, INSPIRE grid IDs,
//! and a local planar frame anchored at a map corner.
//!
//! The planner itself works in local meters; these helpers are what the
//! importers use to get real-world station and census data into that frame.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (spherical model, good enough at city scale).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsCoord {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GpsCoord {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Errors raised while parsing geographic input formats.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeoError {
    #[error("malformed DMS coordinate '{0}'")]
    MalformedDms(String),

    #[error("malformed INSPIRE grid id '{0}'")]
    MalformedInspireId(String),
}

/// Great-circle distance between two GPS coordinates, haversine formula.
///
/// Returns meters.
pub fn gps_dist(a: &GpsCoord, b: &GpsCoord) -> f64 {
    let lat_diff = (b.lat_deg - a.lat_deg).to_radians();
    let lon_diff = (b.lon_deg - a.lon_deg).to_radians();
    let lat1 = a.lat_deg.to_radians();
    let lat2 = b.lat_deg.to_radians();

    let h = (lat_diff / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (lon_diff / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Local planar frame anchored at the map's southwest corner.
///
/// `x` is the northward travel from the origin, `y` the eastward travel,
/// both along great circles through the origin. This matches how the
/// station and census importers project their datasets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    pub origin: GpsCoord,
}

impl LocalFrame {
    pub fn new(origin: GpsCoord) -> Self {
        Self { origin }
    }

    /// Project a GPS coordinate into local meters.
    pub fn to_local(&self, p: &GpsCoord) -> Point {
        let x = gps_dist(
            &self.origin,
            &GpsCoord::new(p.lat_deg, self.origin.lon_deg),
        );
        let y = gps_dist(
            &self.origin,
            &GpsCoord::new(self.origin.lat_deg, p.lon_deg),
        );
        Point::new(x, y)
    }
}

/// Parse a degrees-minutes-seconds coordinate like `45°45'36"N`.
///
/// Southern latitudes and western longitudes come back negative.
pub fn parse_dms(dms: &str) -> Result<f64, GeoError> {
    let err = || GeoError::MalformedDms(dms.to_string());

    let direction = dms.chars().last().ok_or_else(err)?;
    let sign = match direction {
        'N' | 'E' => 1.0,
        'S' | 'W' => -1.0,
        _ => return Err(err()),
    };

    let (degrees, rest) = dms.split_once('°').ok_or_else(err)?;
    let (minutes, rest) = rest.split_once('\'').ok_or_else(err)?;
    let seconds = rest.strip_suffix(direction).and_then(|s| s.strip_suffix('"')).ok_or_else(err)?;

    let degrees: f64 = degrees.trim().parse().map_err(|_| err())?;
    let minutes: f64 = minutes.trim().parse().map_err(|_| err())?;
    let seconds: f64 = seconds.trim().parse().map_err(|_| err())?;

    Ok(sign * (degrees + (minutes + seconds / 60.0) / 60.0))
}

/// Decode an INSPIRE grid-square id into `(northing, easting)` floats.
///
/// Example id: `CRS3035RES200mN2029800E4254200`: EPSG:3035 CRS, 200 m
/// resolution squares, then the north and east coordinates of the square's
/// bottom-left corner.
pub fn parse_inspire_id(id: &str) -> Result<(f64, f64), GeoError> {
    let err = || GeoError::MalformedInspireId(id.to_string());

    // Skip the "CRS3035RES200m" prefix; the remainder is N<meters>E<meters>.
    let coords = id.get(14..).ok_or_else(err)?;

    let north_sign = match coords.chars().next() {
        Some('N') => 1.0,
        Some('S') => -1.0,
        _ => return Err(err()),
    };
    let rest = &coords[1..];
    let split = rest.find(['E', 'W']).ok_or_else(err)?;
    let east_sign = if rest.as_bytes()[split] == b'E' { 1.0 } else { -1.0 };

    let northing: f64 = rest[..split].parse().map_err(|_| err())?;
    let easting: f64 = rest[split + 1..].parse().map_err(|_| err())?;

    Ok((north_sign * northing, east_sign * easting))
}
