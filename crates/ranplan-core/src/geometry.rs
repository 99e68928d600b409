//! Planar geometry: positions, Euclidean distance, tile sampling.
//!
//! Positions double as the identity keys of the pylon and user registries,
//! so [`Point`] implements `Eq`/`Hash` over its coordinate bit patterns.
//! Loaders reject non-finite coordinates before a point ever becomes a key,
//! which keeps bitwise identity well-defined (no NaN keys).

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A planar position in meters.
///
/// Two entities at the same coordinates are indistinguishable; the
/// registries enforce uniqueness at build time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point in meters.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both coordinates are finite (usable as a registry key).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Sample `count` user positions uniformly within a tile.
///
/// The tile spans `[0, tile_size.0) x [0, tile_size.1)` in meters; callers
/// offset the samples to the tile's corner. Used by the toy generator and
/// the census-square importer.
pub fn sample_users<R: Rng>(tile_size: (f64, f64), count: usize, rng: &mut R) -> Vec<Point> {
    (0..count)
        .map(|_| {
            Point::new(
                rng.gen_range(0.0..tile_size.0),
                rng.gen_range(0.0..tile_size.1),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12, "distance is symmetric");
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_point_as_map_key() {
        let mut map: HashMap<Point, f64> = HashMap::new();
        map.insert(Point::new(1.5, -2.5), 7.0);
        assert_eq!(map.get(&Point::new(1.5, -2.5)), Some(&7.0));
        assert_eq!(map.get(&Point::new(1.5, -2.4)), None);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_sample_users_within_tile() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = sample_users((200.0, 100.0), 500, &mut rng);
        assert_eq!(samples.len(), 500);
        for p in &samples {
            assert!(p.x >= 0.0 && p.x < 200.0, "x out of tile: {}", p.x);
            assert!(p.y >= 0.0 && p.y < 100.0, "y out of tile: {}", p.y);
        }
    }

    #[test]
    fn test_sample_users_reproducible() {
        let a = sample_users((50.0, 50.0), 10, &mut StdRng::seed_from_u64(42));
        let b = sample_users((50.0, 50.0), 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b, "same seed must give the same samples");
    }
}
