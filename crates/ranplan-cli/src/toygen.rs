//! Toy scenario generation: a density grid of users-per-tile sampled into
//! concrete user equipment positions.

use rand::Rng;
use ranplan_core::geometry::{sample_users, Point};
use ranplan_core::topology::User;

/// Demo population-density grid, users per 200 m tile. A small city center
/// in the lower-left, a couple of satellite clusters elsewhere.
pub const DEMO_DENSITY_GRID: [[u32; 15]; 10] = [
    [0, 0, 2, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 5, 20, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0],
    [0, 0, 0, 2, 18, 0, 0, 9, 0, 0, 0, 0, 0, 0, 0],
    [0, 3, 30, 21, 35, 25, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 20, 13, 16, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [2, 10, 4, 0, 0, 6, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 0, 0, 0, 0],
    [0, 0, 1, 0, 0, 0, 0, 0, 0, 7, 0, 20, 0, 0, 0],
    [0, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0],
];

/// Sample user equipments from a density grid.
///
/// Grid rows advance along y, columns along x; each cell holds the number
/// of users to sample uniformly within its `tile_size`-meter tile. Every
/// sampled user gets the same `demand_bps`.
pub fn sample_grid_equipments<R: Rng>(
    grid: &[&[u32]],
    tile_size: (f64, f64),
    demand_bps: f64,
    rng: &mut R,
) -> Vec<User> {
    let mut users = Vec::new();
    for (row, cells) in grid.iter().enumerate() {
        for (col, &count) in cells.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let corner = Point::new(col as f64 * tile_size.0, row as f64 * tile_size.1);
            for sample in sample_users(tile_size, count as usize, rng) {
                users.push(User::new(
                    Point::new(corner.x + sample.x, corner.y + sample.y),
                    demand_bps,
                ));
            }
        }
    }
    users
}

/// Borrow a fixed-size grid as row slices for [`sample_grid_equipments`].
pub fn grid_rows<const W: usize, const H: usize>(grid: &[[u32; W]; H]) -> Vec<&[u32]> {
    grid.iter().map(|row| row.as_slice()).collect()
}
