//! Weighted reachability graph between pylons and user equipments.
//!
//! Each vertex carries a scalar: for a user it is the bandwidth actually
//! allocated to it (0.0 until served), for a pylon the bandwidth left over
//! once the engine is done with it. Adjacency lists are kept sorted
//! ascending by weight so the nearest candidate is always at the front.
//!
//! Whether a user is *served* is decided by the topology, not by this
//! graph: [`ReachabilityGraph::nearest_unserved_neighbor`] takes the
//! served-ness test as a closure, so the vertex scalar stays a pure
//! bandwidth record instead of doubling as a served flag.

use crate::geometry::Point;
use std::collections::HashMap;

/// Directed edge to `target`, weighted by Euclidean distance in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEdge {
    pub target: Point,
    pub weight: f64,
}

impl std::fmt::Display for WeightedEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "-> {} : {}", self.target, self.weight)
    }
}

/// Adjacency-list graph with per-vertex scalar state.
#[derive(Debug, Clone, Default)]
pub struct ReachabilityGraph {
    vertices: HashMap<Point, f64>,
    adjacency: HashMap<Point, Vec<WeightedEdge>>,
}

impl ReachabilityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vertex with the given scalar value and empty adjacency.
    ///
    /// Re-registering an existing point overwrites its prior value and
    /// adjacency; callers must not double-register live vertices.
    pub fn add_vertex(&mut self, point: Point, value: f64) {
        self.vertices.insert(point, value);
        self.adjacency.insert(point, Vec::new());
    }

    /// Insert a directed edge keeping `source`'s adjacency sorted ascending
    /// by weight. Equal weights keep their insertion order.
    ///
    /// O(n) per insertion; edges are only added at build time and read or
    /// pruned afterwards.
    ///
    /// # Panics
    /// Panics if `source` has not been registered.
    pub fn add_edge(&mut self, source: Point, target: Point, weight: f64) {
        let adjacency = self
            .adjacency
            .get_mut(&source)
            .unwrap_or_else(|| panic!("edge from unregistered vertex {}", source));
        let at = adjacency.partition_point(|e| e.weight <= weight);
        adjacency.insert(at, WeightedEdge { target, weight });
    }

    /// Scalar value of a vertex, if registered.
    pub fn vertex_value(&self, point: &Point) -> Option<f64> {
        self.vertices.get(point).copied()
    }

    /// Overwrite a vertex's scalar value. No-op for unregistered points.
    pub fn set_vertex_value(&mut self, point: &Point, value: f64) {
        if let Some(v) = self.vertices.get_mut(point) {
            *v = value;
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Remaining adjacency length of a vertex (0 if unregistered).
    pub fn adjacency_len(&self, point: &Point) -> usize {
        self.adjacency.get(point).map_or(0, Vec::len)
    }

    /// Remaining edges of a vertex, nearest first.
    pub fn edges(&self, point: &Point) -> &[WeightedEdge] {
        self.adjacency.get(point).map_or(&[], Vec::as_slice)
    }

    /// Nearest neighbor of `source` whose target is not yet served.
    ///
    /// Scans the adjacency list from the front, permanently discarding
    /// every edge whose target `is_served`, and returns the first survivor.
    /// This is NOT a pure query: the adjacency list only ever shrinks, so
    /// a served user is never offered to this source again.
    pub fn nearest_unserved_neighbor<F>(&mut self, source: &Point, is_served: F) -> Option<WeightedEdge>
    where
        F: Fn(&Point) -> bool,
    {
        let adjacency = self.adjacency.get_mut(source)?;
        while let Some(edge) = adjacency.first().copied() {
            if is_served(&edge.target) {
                adjacency.remove(0);
            } else {
                return Some(edge);
            }
        }
        None
    }

    /// Remove the front (nearest) edge of `source` after a commit.
    pub fn pop_nearest(&mut self, source: &Point) {
        if let Some(adjacency) = self.adjacency.get_mut(source) {
            if !adjacency.is_empty() {
                adjacency.remove(0);
            }
        }
    }

    /// Drop every remaining edge of a saturated source.
    pub fn drop_adjacency(&mut self, source: &Point) {
        if let Some(adjacency) = self.adjacency.get_mut(source) {
            adjacency.clear();
        }
    }
}

impl std::fmt::Display for ReachabilityGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (vertex, value) in &self.vertices {
            writeln!(f, "{} ({}):", vertex, value)?;
            if let Some(adjacency) = self.adjacency.get(vertex) {
                for edge in adjacency {
                    writeln!(f, "  {}", edge)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_add_edge_keeps_sorted_order() {
        let mut g = ReachabilityGraph::new();
        g.add_vertex(p(0.0, 0.0), 0.0);
        g.add_edge(p(0.0, 0.0), p(3.0, 0.0), 3.0);
        g.add_edge(p(0.0, 0.0), p(1.0, 0.0), 1.0);
        g.add_edge(p(0.0, 0.0), p(2.0, 0.0), 2.0);

        let nearest = g.nearest_unserved_neighbor(&p(0.0, 0.0), |_| false).unwrap();
        assert_eq!(nearest.target, p(1.0, 0.0));
        assert_eq!(nearest.weight, 1.0);
    }

    #[test]
    fn test_equal_weights_keep_insertion_order() {
        let mut g = ReachabilityGraph::new();
        g.add_vertex(p(0.0, 0.0), 0.0);
        g.add_edge(p(0.0, 0.0), p(0.0, 5.0), 5.0);
        g.add_edge(p(0.0, 0.0), p(5.0, 0.0), 5.0);
        g.add_edge(p(0.0, 0.0), p(-5.0, 0.0), 5.0);

        // First inserted edge of equal weight stays at the front.
        let nearest = g.nearest_unserved_neighbor(&p(0.0, 0.0), |_| false).unwrap();
        assert_eq!(nearest.target, p(0.0, 5.0));
    }

    #[test]
    fn test_nearest_unserved_prunes_permanently() {
        let mut g = ReachabilityGraph::new();
        let src = p(0.0, 0.0);
        g.add_vertex(src, 0.0);
        g.add_edge(src, p(1.0, 0.0), 1.0);
        g.add_edge(src, p(2.0, 0.0), 2.0);
        g.add_edge(src, p(3.0, 0.0), 3.0);

        // The two nearest targets are already served: both get discarded.
        let served = [p(1.0, 0.0), p(2.0, 0.0)];
        let e = g
            .nearest_unserved_neighbor(&src, |q| served.contains(q))
            .unwrap();
        assert_eq!(e.target, p(3.0, 0.0));
        assert_eq!(g.adjacency_len(&src), 1, "served edges are gone for good");

        // Adjacency length never grows across repeated calls.
        let before = g.adjacency_len(&src);
        let _ = g.nearest_unserved_neighbor(&src, |_| false);
        assert!(g.adjacency_len(&src) <= before);
    }

    #[test]
    fn test_nearest_unserved_exhausted() {
        let mut g = ReachabilityGraph::new();
        let src = p(0.0, 0.0);
        g.add_vertex(src, 0.0);
        g.add_edge(src, p(1.0, 0.0), 1.0);

        assert!(g.nearest_unserved_neighbor(&src, |_| true).is_none());
        assert_eq!(g.adjacency_len(&src), 0);
        // Subsequent calls stay empty without panicking.
        assert!(g.nearest_unserved_neighbor(&src, |_| false).is_none());
    }

    #[test]
    fn test_pop_and_drop() {
        let mut g = ReachabilityGraph::new();
        let src = p(0.0, 0.0);
        g.add_vertex(src, 0.0);
        g.add_edge(src, p(1.0, 0.0), 1.0);
        g.add_edge(src, p(2.0, 0.0), 2.0);

        g.pop_nearest(&src);
        assert_eq!(g.adjacency_len(&src), 1);
        let e = g.nearest_unserved_neighbor(&src, |_| false).unwrap();
        assert_eq!(e.target, p(2.0, 0.0));

        g.drop_adjacency(&src);
        assert_eq!(g.adjacency_len(&src), 0);
    }

    #[test]
    fn test_vertex_values() {
        let mut g = ReachabilityGraph::new();
        g.add_vertex(p(1.0, 1.0), 0.0);
        assert_eq!(g.vertex_value(&p(1.0, 1.0)), Some(0.0));
        g.set_vertex_value(&p(1.0, 1.0), 2.5e4);
        assert_eq!(g.vertex_value(&p(1.0, 1.0)), Some(2.5e4));
        assert_eq!(g.vertex_value(&p(9.0, 9.0)), None);
    }

    #[test]
    #[should_panic(expected = "edge from unregistered vertex")]
    fn test_edge_from_unregistered_vertex_panics() {
        let mut g = ReachabilityGraph::new();
        g.add_edge(p(0.0, 0.0), p(1.0, 0.0), 1.0);
    }
}
