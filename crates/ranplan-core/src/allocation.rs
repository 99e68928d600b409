//! Greedy bandwidth-allocation engine.
//!
//! Pylons are scored by QoS demand density, processed in descending order,
//! and each one greedily serves its nearest still-unserved users until its
//! antenna's bandwidth budget or its reachable users run out. A final pass
//! checks that every user found a pylon; if not, the run is reported as
//! incomplete while the partial allocation stays in the topology for
//! inspection. Failure means incomplete, not reverted.

use crate::capacity::{required_bandwidth, signal_level_dbm};
use crate::geometry::Point;
use crate::pathloss::PathlossModel;
use crate::topology::Topology;
use crate::types::PlanResult;
use std::collections::HashMap;

/// Strategy choosing which catalogue model a pylon installs.
///
/// The seam for smarter policies (e.g. cheapest model covering the local
/// density); the shipped default reproduces the fixed choice of model 0.
pub trait AntennaSelector {
    fn select(&self, topology: &Topology, pylon: &Point) -> usize;
}

/// Always installs catalogue index 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultModel;

impl AntennaSelector for DefaultModel {
    fn select(&self, _topology: &Topology, _pylon: &Point) -> usize {
        0
    }
}

/// Human-readable per-pylon summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct PylonReport {
    /// Name of the installed antenna model.
    pub antenna: String,
    /// Users this pylon serves.
    pub served_users: usize,
    /// Bandwidth left unallocated, in Hz. Never negative.
    pub leftover_bandwidth_hz: f64,
    /// The antenna's total bandwidth capacity in Hz.
    pub total_bandwidth_hz: f64,
}

/// Outcome of an allocation run.
///
/// Both variants carry the per-pylon reports: an incomplete run has still
/// mutated the topology, and downstream rendering wants to see how far it
/// got.
#[derive(Debug, Clone, PartialEq)]
pub enum AllocationOutcome {
    /// Every user is served.
    Complete(HashMap<Point, PylonReport>),
    /// At least one user ended the run without a pylon.
    Incomplete {
        reports: HashMap<Point, PylonReport>,
        unserved: usize,
    },
}

impl AllocationOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, AllocationOutcome::Complete(_))
    }

    pub fn reports(&self) -> &HashMap<Point, PylonReport> {
        match self {
            AllocationOutcome::Complete(reports) => reports,
            AllocationOutcome::Incomplete { reports, .. } => reports,
        }
    }
}

/// QoS demand density of a pylon: mean over its adjacency of
/// `neighbor demand / edge distance`. Zero for a pylon with no reachable
/// users (it sorts last and allocates nothing).
pub fn qos_density(topology: &Topology, pylon: &Point) -> f64 {
    let len = topology.graph().adjacency_len(pylon);
    if len == 0 {
        return 0.0;
    }
    let sum: f64 = topology
        .graph()
        .edges(pylon)
        .iter()
        .map(|e| {
            let demand = topology.user(&e.target).map_or(0.0, |u| u.demand_bps);
            demand / e.weight
        })
        .sum();
    sum / len as f64
}

/// The greedy allocation engine.
///
/// Sequential and single-visit: pylons are processed exactly once, in
/// descending density order, with no backtracking. Work is bounded by
/// construction, since every inner iteration removes at least one edge
/// from the graph: the whole run does O(P*U) link evaluations at most.
#[derive(Debug, Clone)]
pub struct GreedyAllocator<S = DefaultModel> {
    pathloss: PathlossModel,
    selector: S,
}

impl GreedyAllocator<DefaultModel> {
    pub fn new(pathloss: PathlossModel) -> Self {
        Self { pathloss, selector: DefaultModel }
    }
}

impl<S: AntennaSelector> GreedyAllocator<S> {
    pub fn with_selector(pathloss: PathlossModel, selector: S) -> Self {
        Self { pathloss, selector }
    }

    /// Run the allocation over a freshly built topology, mutating it in
    /// place.
    pub fn run(&self, topology: &mut Topology) -> PlanResult<AllocationOutcome> {
        // Score and order pylons: density descending, insertion index
        // ascending as the tie-break.
        let mut ordered: Vec<(usize, Point, f64)> = topology
            .pylons()
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.position, qos_density(topology, &p.position)))
            .collect();
        ordered.sort_by(|a, b| b.2.total_cmp(&a.2).then(a.0.cmp(&b.0)));

        let mut reports = HashMap::with_capacity(ordered.len());
        for (_, position, density) in ordered {
            tracing::debug!(pylon = %position, density, "processing pylon");
            let report = self.allocate_pylon(topology, position)?;
            reports.insert(position, report);
        }

        let unserved = topology.unserved_count();
        if unserved == 0 {
            tracing::info!(pylons = reports.len(), "allocation complete, all users served");
            Ok(AllocationOutcome::Complete(reports))
        } else {
            tracing::warn!(unserved, "allocation incomplete, users left without a pylon");
            Ok(AllocationOutcome::Incomplete { reports, unserved })
        }
    }

    /// Consume one pylon's budget over its nearest unserved users.
    fn allocate_pylon(&self, topology: &mut Topology, position: Point) -> PlanResult<PylonReport> {
        let model = self.selector.select(topology, &position);
        let antenna = topology.install_antenna(&position, model)?;
        let height_m = topology.pylon(&position).map_or(0.0, |p| p.height_m);

        let mut budget_hz = antenna.bandwidth_hz;
        let mut served = 0usize;

        while let Some(edge) = topology.nearest_unserved(&position) {
            let pathloss_db = self.pathloss.path_loss_db(&antenna, height_m, edge.weight);
            let signal_dbm = signal_level_dbm(antenna.power_dbm, antenna.gain_dbi, pathloss_db);
            let demand_bps = topology.user(&edge.target).map_or(0.0, |u| u.demand_bps);
            let required_hz = required_bandwidth(demand_bps, signal_dbm, antenna.bandwidth_hz);

            if budget_hz > required_hz {
                budget_hz -= required_hz;
                served += 1;
                topology.commit_allocation(&edge.target, position, required_hz)?;
                tracing::debug!(
                    user = %edge.target,
                    distance_m = edge.weight,
                    required_hz,
                    budget_hz,
                    "user served"
                );
            } else {
                // Saturated (or the link is unallocatable): the remaining,
                // farther users cannot be reached from this pylon anymore.
                tracing::debug!(
                    pylon = %position,
                    required_hz,
                    budget_hz,
                    "budget exhausted, dropping remaining adjacency"
                );
                break;
            }
        }

        topology.saturate_pylon(&position, budget_hz);

        Ok(PylonReport {
            antenna: antenna.name,
            served_users: served,
            leftover_bandwidth_hz: budget_hz,
            total_bandwidth_hz: antenna.bandwidth_hz,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{AntennaModel, Pylon, User};

    fn antenna(bandwidth_hz: f64) -> AntennaModel {
        AntennaModel {
            name: "macro-700".to_string(),
            power_dbm: 43.0,
            gain_dbi: 15.0,
            bandwidth_hz,
            frequency_hz: 700.0e6,
            reach_m: 1.0e6,
        }
    }

    fn line_topology(user_count: usize, demand_bps: f64, bandwidth_hz: f64) -> Topology {
        let pylons = vec![Pylon::new(Point::new(0.0, 0.0), 30.0)];
        // Users linearly spaced between 10 m and ~1000 m from the pylon.
        let users = (0..user_count)
            .map(|i| {
                let d = 10.0 + 990.0 * i as f64 / user_count.max(1) as f64;
                User::new(Point::new(d, 0.0), demand_bps)
            })
            .collect();
        Topology::build(vec![antenna(bandwidth_hz)], pylons, users).unwrap()
    }

    #[test]
    fn test_density_prefers_close_heavy_demand() {
        let pylons = vec![
            Pylon::new(Point::new(0.0, 0.0), 30.0),
            Pylon::new(Point::new(10_000.0, 0.0), 30.0),
        ];
        let users = vec![
            User::new(Point::new(100.0, 0.0), 1.0e6),
            User::new(Point::new(200.0, 0.0), 1.0e6),
        ];
        let topo = Topology::build(vec![antenna(10.0e6)], pylons, users).unwrap();

        let near = qos_density(&topo, &Point::new(0.0, 0.0));
        let far = qos_density(&topo, &Point::new(10_000.0, 0.0));
        assert!(near > far, "clustered demand scores higher: {} !> {}", near, far);
    }

    #[test]
    fn test_density_of_isolated_pylon_is_zero() {
        let pylons = vec![Pylon::new(Point::new(0.0, 0.0), 30.0)];
        let topo = Topology::build(vec![antenna(10.0e6)], pylons, vec![]).unwrap();
        assert_eq!(qos_density(&topo, &Point::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_zero_pylons_is_empty_no_op() {
        let users = vec![User::new(Point::new(10.0, 0.0), 1.0e6)];
        let mut topo = Topology::build(vec![antenna(10.0e6)], vec![], users).unwrap();
        let outcome = GreedyAllocator::new(PathlossModel::OkumuraHata)
            .run(&mut topo)
            .unwrap();
        match outcome {
            AllocationOutcome::Incomplete { reports, unserved } => {
                assert!(reports.is_empty());
                assert_eq!(unserved, 1);
            }
            AllocationOutcome::Complete(_) => panic!("a user with no pylons cannot be served"),
        }
    }

    #[test]
    fn test_zero_users_completes_with_full_budgets() {
        let pylons = vec![Pylon::new(Point::new(0.0, 0.0), 30.0)];
        let mut topo = Topology::build(vec![antenna(10.0e6)], pylons, vec![]).unwrap();
        let outcome = GreedyAllocator::new(PathlossModel::OkumuraHata)
            .run(&mut topo)
            .unwrap();
        assert!(outcome.is_complete());
        let report = &outcome.reports()[&Point::new(0.0, 0.0)];
        assert_eq!(report.served_users, 0);
        assert_eq!(report.leftover_bandwidth_hz, report.total_bandwidth_hz);
    }

    #[test]
    fn test_small_scenario_completes() {
        // Three users well within the budget of one strong pylon.
        let mut topo = line_topology(3, 1.0e6, 10.0e6);
        let outcome = GreedyAllocator::new(PathlossModel::OkumuraHata)
            .run(&mut topo)
            .unwrap();
        assert!(outcome.is_complete(), "3 users fit in 10 MHz");

        let report = &outcome.reports()[&Point::new(0.0, 0.0)];
        assert_eq!(report.served_users, 3);
        assert!(report.leftover_bandwidth_hz > 0.0);
        assert!(report.leftover_bandwidth_hz < report.total_bandwidth_hz);
        assert_eq!(topo.unserved_count(), 0);
        assert_eq!(topo.pylon(&Point::new(0.0, 0.0)).unwrap().antenna, Some(0));
    }

    #[test]
    fn test_budget_conservation() {
        let mut topo = line_topology(20, 1.0e6, 10.0e6);
        let outcome = GreedyAllocator::new(PathlossModel::OkumuraHata)
            .run(&mut topo)
            .unwrap();
        let report = &outcome.reports()[&Point::new(0.0, 0.0)];

        // Sum the committed per-user bandwidths back out of the graph.
        let committed: f64 = topo
            .users()
            .iter()
            .filter(|u| u.pylon.is_some())
            .map(|u| topo.graph().vertex_value(&u.position).unwrap())
            .sum();
        let expected = report.total_bandwidth_hz - committed;
        assert!(
            (report.leftover_bandwidth_hz - expected).abs() < 1e-6,
            "leftover {} != capacity - committed {}",
            report.leftover_bandwidth_hz,
            expected
        );
        assert!(report.leftover_bandwidth_hz >= 0.0, "leftover never goes negative");
    }

    #[test]
    fn test_saturation_serves_nearest_first_and_reports_failure() {
        // 1000 users at 1 Mbit/s each against a single 10 MHz budget:
        // the nearest users are served until the budget runs out, the rest
        // stay unassigned, and the run reports global failure.
        let mut topo = line_topology(1000, 1.0e6, 10.0e6);
        let outcome = GreedyAllocator::new(PathlossModel::OkumuraHata)
            .run(&mut topo)
            .unwrap();

        let report = &outcome.reports()[&Point::new(0.0, 0.0)];
        assert!(!outcome.is_complete(), "10 MHz cannot carry 1000 Mbit/s");
        assert!(report.served_users > 0, "the nearest users must be served");
        assert!(report.served_users < 1000);

        // Served users form a prefix of the distance-ordered line.
        let mut users: Vec<_> = topo.users().to_vec();
        users.sort_by(|a, b| a.position.x.total_cmp(&b.position.x));
        let first_unserved = users.iter().position(|u| u.pylon.is_none()).unwrap();
        assert!(
            users[first_unserved..].iter().all(|u| u.pylon.is_none()),
            "service must stop at a distance cutoff, not skip around"
        );
        assert_eq!(first_unserved, report.served_users);

        // Required bandwidth grows with distance along the served prefix.
        let mut prev = 0.0;
        for u in &users[..first_unserved] {
            let w = topo.graph().vertex_value(&u.position).unwrap();
            assert!(
                w > prev,
                "required bandwidth must grow with distance: {} !> {} at x = {}",
                w,
                prev,
                u.position.x
            );
            prev = w;
        }

        // The saturated pylon dropped its remaining adjacency.
        assert_eq!(topo.graph().adjacency_len(&Point::new(0.0, 0.0)), 0);
    }

    #[test]
    fn test_shared_user_served_once() {
        // Two pylons can both reach the same user; pylon A has a second,
        // closer user which lifts its density, so A is processed first and
        // serves both. B must then skip the shared user.
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1000.0, 0.0);
        let shared = Point::new(400.0, 0.0);
        let near = Point::new(50.0, 0.0);
        let pylons = vec![Pylon::new(a, 30.0), Pylon::new(b, 30.0)];
        let users = vec![User::new(near, 1.0e6), User::new(shared, 1.0e6)];
        let mut topo = Topology::build(vec![antenna(10.0e6)], pylons, users).unwrap();

        assert!(qos_density(&topo, &a) > qos_density(&topo, &b));

        let outcome = GreedyAllocator::new(PathlossModel::OkumuraHata)
            .run(&mut topo)
            .unwrap();
        assert!(outcome.is_complete());

        assert_eq!(topo.user(&shared).unwrap().pylon, Some(a));
        assert_eq!(outcome.reports()[&a].served_users, 2);
        assert_eq!(outcome.reports()[&b].served_users, 0);
    }

    #[test]
    fn test_pylon_order_is_deterministic_on_ties() {
        // Two pylons with identical densities: insertion order wins, so
        // the first pylon serves the user both could reach.
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 200.0);
        let u = Point::new(100.0, 100.0);
        // Equidistant from both pylons: identical densities.
        let pylons = vec![Pylon::new(a, 30.0), Pylon::new(b, 30.0)];
        let users = vec![User::new(u, 1.0e6)];
        let mut topo = Topology::build(vec![antenna(10.0e6)], pylons, users).unwrap();

        assert_eq!(qos_density(&topo, &a), qos_density(&topo, &b));

        let outcome = GreedyAllocator::new(PathlossModel::OkumuraHata)
            .run(&mut topo)
            .unwrap();
        assert!(outcome.is_complete());
        assert_eq!(topo.user(&u).unwrap().pylon, Some(a), "tie breaks to first-registered pylon");
    }

    #[test]
    fn test_custom_selector_is_honored() {
        struct SecondModel;
        impl AntennaSelector for SecondModel {
            fn select(&self, _t: &Topology, _p: &Point) -> usize {
                1
            }
        }

        let pylons = vec![Pylon::new(Point::new(0.0, 0.0), 30.0)];
        let users = vec![User::new(Point::new(100.0, 0.0), 1.0e6)];
        let mut wide = antenna(20.0e6);
        wide.name = "macro-700-wide".to_string();
        let mut topo = Topology::build(vec![antenna(10.0e6), wide], pylons, users).unwrap();

        let outcome = GreedyAllocator::with_selector(PathlossModel::OkumuraHata, SecondModel)
            .run(&mut topo)
            .unwrap();
        let report = &outcome.reports()[&Point::new(0.0, 0.0)];
        assert_eq!(report.antenna, "macro-700-wide");
        assert_eq!(report.total_bandwidth_hz, 20.0e6);
        assert_eq!(topo.pylon(&Point::new(0.0, 0.0)).unwrap().antenna, Some(1));
    }
}
