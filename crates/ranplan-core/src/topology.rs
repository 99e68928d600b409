//! Topology data model: antenna catalogue, pylon and user registries, and
//! the reachability graph connecting them.
//!
//! The topology is built once from static inputs, mutated in place by the
//! allocation engine, then read back by reporting collaborators. Positions
//! are the identity keys of both registries; registries keep insertion
//! order so downstream tie-breaking is deterministic.

use crate::geometry::Point;
use crate::graph::{ReachabilityGraph, WeightedEdge};
use crate::types::{PlanError, PlanResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable antenna hardware descriptor, shared by catalogue index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntennaModel {
    /// Display name, e.g. "macro-700".
    pub name: String,
    /// Transmit power in dBm.
    pub power_dbm: f64,
    /// Antenna gain in dBi.
    pub gain_dbi: f64,
    /// Bandwidth capacity in Hz.
    pub bandwidth_hz: f64,
    /// Carrier frequency in Hz.
    pub frequency_hz: f64,
    /// Maximum reach in meters, used to prune the graph.
    pub reach_m: f64,
}

/// A candidate base-station site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pylon {
    pub position: Point,
    /// Physical mount height in meters.
    pub height_m: f64,
    /// Catalogue index of the installed antenna; `None` until the engine
    /// visits this pylon, assigned exactly once.
    pub antenna: Option<usize>,
}

impl Pylon {
    pub fn new(position: Point, height_m: f64) -> Self {
        Self { position, height_m, antenna: None }
    }
}

/// An end-user demand point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub position: Point,
    /// Position of the serving pylon; `None` until served, written once.
    pub pylon: Option<Point>,
    /// Throughput demand in bit/s.
    pub demand_bps: f64,
}

impl User {
    pub fn new(position: Point, demand_bps: f64) -> Self {
        Self { position, pylon: None, demand_bps }
    }
}

/// The aggregate data model handed to the allocation engine.
#[derive(Debug, Clone)]
pub struct Topology {
    antennas: Vec<AntennaModel>,
    pylons: Vec<Pylon>,
    pylon_index: HashMap<Point, usize>,
    users: Vec<User>,
    user_index: HashMap<Point, usize>,
    graph: ReachabilityGraph,
    max_reach_m: f64,
}

impl Topology {
    /// Assemble the registries and the reachability graph.
    ///
    /// Users become graph vertices first (value 0.0 = nothing allocated),
    /// then each pylon becomes a vertex with an edge to every user within
    /// the maximum reach of the catalogue. O(P*U), with the reach filter
    /// keeping adjacency lists short for the greedy scans.
    ///
    /// Fails fast on an empty catalogue, non-finite coordinates, or a
    /// duplicate position within either registry.
    pub fn build(
        antennas: Vec<AntennaModel>,
        pylons: Vec<Pylon>,
        users: Vec<User>,
    ) -> PlanResult<Self> {
        let max_reach_m = antennas
            .iter()
            .map(|a| a.reach_m)
            .fold(f64::NEG_INFINITY, f64::max);
        if antennas.is_empty() {
            return Err(PlanError::EmptyCatalogue);
        }

        let mut graph = ReachabilityGraph::new();

        let mut user_index = HashMap::with_capacity(users.len());
        for (i, user) in users.iter().enumerate() {
            let pos = user.position;
            if !pos.is_finite() {
                return Err(PlanError::NonFiniteCoordinate { kind: "user", x: pos.x, y: pos.y });
            }
            // A served user is recognizable by its nonzero vertex value, so
            // demands must be strictly positive.
            if !(user.demand_bps > 0.0) {
                return Err(PlanError::NonPositiveDemand {
                    x: pos.x,
                    y: pos.y,
                    demand_bps: user.demand_bps,
                });
            }
            if user_index.insert(pos, i).is_some() {
                return Err(PlanError::DuplicatePosition { kind: "user", x: pos.x, y: pos.y });
            }
            graph.add_vertex(pos, 0.0);
        }

        let mut pylon_index = HashMap::with_capacity(pylons.len());
        let mut edges = 0usize;
        for (i, pylon) in pylons.iter().enumerate() {
            let pos = pylon.position;
            if !pos.is_finite() {
                return Err(PlanError::NonFiniteCoordinate { kind: "pylon", x: pos.x, y: pos.y });
            }
            if pylon_index.insert(pos, i).is_some() {
                return Err(PlanError::DuplicatePosition { kind: "pylon", x: pos.x, y: pos.y });
            }
            graph.add_vertex(pos, 0.0);
            for user in &users {
                let d = pos.distance_to(&user.position);
                if d <= max_reach_m {
                    graph.add_edge(pos, user.position, d);
                    edges += 1;
                }
            }
        }

        tracing::debug!(
            pylons = pylons.len(),
            users = users.len(),
            edges,
            max_reach_m,
            "reachability graph built"
        );

        Ok(Self { antennas, pylons, pylon_index, users, user_index, graph, max_reach_m })
    }

    pub fn antennas(&self) -> &[AntennaModel] {
        &self.antennas
    }

    pub fn antenna(&self, index: usize) -> Option<&AntennaModel> {
        self.antennas.get(index)
    }

    pub fn pylons(&self) -> &[Pylon] {
        &self.pylons
    }

    pub fn pylon(&self, position: &Point) -> Option<&Pylon> {
        self.pylon_index.get(position).map(|&i| &self.pylons[i])
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, position: &Point) -> Option<&User> {
        self.user_index.get(position).map(|&i| &self.users[i])
    }

    pub fn graph(&self) -> &ReachabilityGraph {
        &self.graph
    }

    /// Maximum reach across the catalogue, the graph's pruning radius.
    pub fn max_reach_m(&self) -> f64 {
        self.max_reach_m
    }

    /// True once the engine has committed an allocation for this user.
    pub fn is_user_served(&self, position: &Point) -> bool {
        self.user(position).is_some_and(|u| u.pylon.is_some())
    }

    /// Users that ended the run without a serving pylon.
    pub fn unserved_count(&self) -> usize {
        self.users.iter().filter(|u| u.pylon.is_none()).count()
    }

    /// Install an antenna model on a pylon (once, when the engine visits
    /// it) and hand back the installed model's parameters.
    pub fn install_antenna(&mut self, position: &Point, index: usize) -> PlanResult<AntennaModel> {
        let model = self
            .antennas
            .get(index)
            .cloned()
            .ok_or(PlanError::BadAntennaIndex { index, len: self.antennas.len() })?;
        let i = *self
            .pylon_index
            .get(position)
            .ok_or(PlanError::UnknownPylon { x: position.x, y: position.y })?;
        self.pylons[i].antenna = Some(index);
        Ok(model)
    }

    /// Nearest user of `source` that no pylon has served yet.
    ///
    /// Delegates to the graph's destructive front-scan, with served-ness
    /// answered from the user registry.
    pub fn nearest_unserved(&mut self, source: &Point) -> Option<WeightedEdge> {
        let users = &self.users;
        let user_index = &self.user_index;
        self.graph.nearest_unserved_neighbor(source, |target| {
            user_index
                .get(target)
                .is_some_and(|&i| users[i].pylon.is_some())
        })
    }

    /// Commit an allocation: the single write path that marks the user
    /// served and records its allocated bandwidth, as a unit.
    pub fn commit_allocation(
        &mut self,
        user_position: &Point,
        pylon_position: Point,
        bandwidth_hz: f64,
    ) -> PlanResult<()> {
        let i = *self
            .user_index
            .get(user_position)
            .ok_or(PlanError::UnknownUser { x: user_position.x, y: user_position.y })?;
        debug_assert!(self.users[i].pylon.is_none(), "user allocated twice");
        self.users[i].pylon = Some(pylon_position);
        self.graph.set_vertex_value(user_position, bandwidth_hz);
        // The committed edge is at the front of the pylon's adjacency.
        self.graph.pop_nearest(&pylon_position);
        Ok(())
    }

    /// Saturate a pylon: drop its remaining adjacency and record leftover
    /// bandwidth in its vertex value.
    pub fn saturate_pylon(&mut self, position: &Point, leftover_hz: f64) {
        self.graph.drop_adjacency(position);
        self.graph.set_vertex_value(position, leftover_hz);
    }
}
