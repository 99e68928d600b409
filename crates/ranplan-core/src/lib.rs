//! # RAN Capacity Planning Core
//!
//! Greedy bandwidth allocation for radio-access-network planning: given
//! candidate base-station (pylon) sites, an antenna hardware catalogue and
//! a spatial distribution of user-equipment demand, decide which antenna
//! each pylon installs and how much spectrum each served user gets, such
//! that every demand is met when physically possible.
//!
//! ## Pipeline
//!
//! ```text
//! catalogue + sites + demands
//!         -> Topology (reachability graph, reach-pruned)
//!         -> density scoring & pylon ordering
//!         -> per-pylon greedy loop (pathloss -> signal -> cost root -> commit)
//!         -> AllocationOutcome (per-pylon reports, complete or incomplete)
//! ```
//!
//! The engine is a deliberate greedy heuristic: pylons are visited once in
//! descending demand-density order, each consuming its bandwidth budget on
//! its nearest unserved users, with no backtracking and no optimality
//! claim. Inter-cell interference is not modeled.
//!
//! ## Example
//!
//! ```rust
//! use ranplan_core::allocation::GreedyAllocator;
//! use ranplan_core::geometry::Point;
//! use ranplan_core::pathloss::PathlossModel;
//! use ranplan_core::topology::{AntennaModel, Pylon, Topology, User};
//!
//! let catalogue = vec![AntennaModel {
//!     name: "macro-700".to_string(),
//!     power_dbm: 43.0,
//!     gain_dbi: 15.0,
//!     bandwidth_hz: 10.0e6,
//!     frequency_hz: 700.0e6,
//!     reach_m: 5_000.0,
//! }];
//! let pylons = vec![Pylon::new(Point::new(0.0, 0.0), 30.0)];
//! let users = vec![
//!     User::new(Point::new(120.0, 40.0), 1.0e6),
//!     User::new(Point::new(300.0, -80.0), 1.0e6),
//! ];
//!
//! let mut topology = Topology::build(catalogue, pylons, users).unwrap();
//! let outcome = GreedyAllocator::new(PathlossModel::OkumuraHata)
//!     .run(&mut topology)
//!     .unwrap();
//!
//! assert!(outcome.is_complete());
//! let report = &outcome.reports()[&Point::new(0.0, 0.0)];
//! assert_eq!(report.served_users, 2);
//! assert!(report.leftover_bandwidth_hz < report.total_bandwidth_hz);
//! ```

pub mod allocation;
pub mod capacity;
pub mod geo;
pub mod geometry;
pub mod graph;
pub mod pathloss;
pub mod topology;
pub mod types;

pub use allocation::{AllocationOutcome, AntennaSelector, DefaultModel, GreedyAllocator, PylonReport};
pub use geometry::Point;
pub use pathloss::PathlossModel;
pub use topology::{AntennaModel, Pylon, Topology, User};
pub use types::{PlanError, PlanResult};
