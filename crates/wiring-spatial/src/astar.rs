//! Pathfinding (S5, §4.5): a direct fast-track segment, or A* over the road
//! graph with a Euclidean heuristic.
//!
//! A standard `BinaryHeap<Reverse<(cost, NodeId)>>` search with a
//! "skip stale heap entries" guard and a reconstruct-by-walking-`prev`
//! finish, extended with a heuristic term (nodes are positioned in a
//! Euclidean plane, so a straight-line lower bound is cheap and admissible)
//! and a `MAX_DISTANCE` cutoff.
//!
//! Cancellation/timeout checks are intentionally *not* threaded into this
//! function — §10.6 only requires them at stage boundaries, and adding a
//! polling callback to the hot loop here would cost more than it buys at this
//! graph scale.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use wiring_core::{NodeId, Point};

use crate::graph::RoadGraph;

/// One routed path: either the fast-track direct segment, or a walk through
/// the road graph.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub polyline: Vec<Point>,
    pub total_length_m: f64,
    pub total_weight: f64,
    pub reachable: bool,
    pub fast_track: bool,
}

impl PathResult {
    fn unreachable() -> Self {
        Self { polyline: Vec::new(), total_length_m: 0.0, total_weight: 0.0, reachable: false, fast_track: false }
    }
}

/// Finer-grained outcome of an A* search than [`PathResult`] alone
/// distinguishes — the orchestrator needs to tell a candidate that was
/// abandoned for exceeding `MAX_DISTANCE` (→ `OverDistance`) apart from one
/// with no path at all in the graph (→ `NoRoute`), which `astar`'s plain
/// `PathResult` collapses into the same "unreachable" case.
#[derive(Clone, Debug, PartialEq)]
pub enum ReachOutcome {
    Reached(PathResult),
    /// The best-known path length exceeded `max_distance_m` before the goal
    /// was reached.
    ExceededMaxDistance,
    /// The open set was exhausted without ever reaching the goal.
    Unreachable,
}

/// A direct consumer → candidate segment, bypassing the road graph
/// entirely (§4.5's fast-track branch). Still subject to crossing
/// validation by the caller — this function only builds the geometry.
pub fn fast_track_path(consumer: Point, candidate: Point) -> PathResult {
    let length = consumer.distance_m(candidate);
    PathResult { polyline: vec![consumer, candidate], total_length_m: length, total_weight: length, reachable: true, fast_track: true }
}

/// Reinterpret a non-negative finite `f64` as a `u64` for heap ordering.
///
/// IEEE-754's bit layout is monotonic with value for non-negative floats, so
/// comparing `to_bits()` output gives the same order as comparing the floats
/// — without needing a `NaN`-aware `Ord` wrapper. All costs here are
/// non-negative lengths/weights, so the precondition always holds.
#[inline]
fn cost_key(f: f64) -> u64 {
    debug_assert!(f.is_finite() && f >= 0.0);
    f.to_bits()
}

fn cached_heuristic(cache: &mut HashMap<(NodeId, NodeId), f64>, graph: &RoadGraph, a: NodeId, b: NodeId) -> f64 {
    *cache.entry((a, b)).or_insert_with(|| graph.node_pos(a).distance_m(graph.node_pos(b)))
}

/// A* from `start` to `goal` over `graph`, optimising total edge `weight`.
///
/// Terminates early — returning an unreachable [`PathResult`] — the moment
/// the best-known path to the node just popped off the open set already
/// exceeds `max_distance_m` in physical length, per §4.5's "abandon this
/// candidate" rule. Node-id ties in the open-set ordering break on ascending
/// `NodeId`: ids are assigned in a fixed build order, so this is the same
/// fixed, reproducible total order the spec calls "lexicographic on node id".
pub fn astar(graph: &RoadGraph, start: NodeId, goal: NodeId, max_distance_m: f64) -> PathResult {
    match astar_outcome(graph, start, goal, max_distance_m) {
        ReachOutcome::Reached(result) => result,
        ReachOutcome::ExceededMaxDistance | ReachOutcome::Unreachable => PathResult::unreachable(),
    }
}

/// As [`astar`], but reports *why* the goal wasn't reached rather than
/// collapsing every failure into "unreachable" (see [`ReachOutcome`]).
pub fn astar_outcome(graph: &RoadGraph, start: NodeId, goal: NodeId, max_distance_m: f64) -> ReachOutcome {
    if start == goal {
        return ReachOutcome::Reached(PathResult {
            polyline: vec![graph.node_pos(start)],
            total_length_m: 0.0,
            total_weight: 0.0,
            reachable: true,
            fast_track: false,
        });
    }

    let n = graph.node_count();
    let mut g_score = vec![f64::INFINITY; n];
    let mut length_so_far = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut heuristic_cache: HashMap<(NodeId, NodeId), f64> = HashMap::new();

    g_score[start.index()] = 0.0;
    length_so_far[start.index()] = 0.0;

    let mut heap: BinaryHeap<Reverse<(u64, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((cost_key(cached_heuristic(&mut heuristic_cache, graph, start, goal)), start)));

    while let Some(Reverse((_, node))) = heap.pop() {
        if visited[node.index()] {
            continue;
        }
        visited[node.index()] = true;

        if length_so_far[node.index()] > max_distance_m {
            return ReachOutcome::ExceededMaxDistance;
        }

        if node == goal {
            return ReachOutcome::Reached(reconstruct(graph, &prev, goal, length_so_far[goal.index()], g_score[goal.index()]));
        }

        for (neighbor, length, weight) in graph.out_edges(node) {
            if visited[neighbor.index()] {
                continue;
            }
            let new_g = g_score[node.index()] + weight;
            if new_g < g_score[neighbor.index()] {
                g_score[neighbor.index()] = new_g;
                length_so_far[neighbor.index()] = length_so_far[node.index()] + length;
                prev[neighbor.index()] = Some(node);
                let f = new_g + cached_heuristic(&mut heuristic_cache, graph, neighbor, goal);
                heap.push(Reverse((cost_key(f), neighbor)));
            }
        }
    }

    ReachOutcome::Unreachable
}

fn reconstruct(graph: &RoadGraph, prev: &[Option<NodeId>], goal: NodeId, total_length: f64, total_weight: f64) -> PathResult {
    let mut nodes = vec![goal];
    let mut cur = goal;
    while let Some(from) = prev[cur.index()] {
        nodes.push(from);
        cur = from;
    }
    nodes.reverse();
    let polyline = nodes.iter().map(|&n| graph.node_pos(n)).collect();
    PathResult { polyline, total_length_m: total_length, total_weight, reachable: true, fast_track: false }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::{DesignConfig, RoadId};
    use wiring_features::Road;

    use crate::graph::RoadGraphBuilder;

    fn chain_graph() -> (RoadGraph, NodeId, NodeId) {
        let config = DesignConfig::default();
        let mut builder = RoadGraphBuilder::new(&config);
        builder.add_roads(&[
            Road { id: RoadId::from("R1"), polyline: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)], classification: "residential".into() },
            Road { id: RoadId::from("R2"), polyline: vec![Point::new(50.0, 0.0), Point::new(100.0, 0.0)], classification: "residential".into() },
        ]);
        let start = builder.add_or_get_node(Point::new(0.0, 0.0), crate::graph::NodeOrigin::Consumer);
        let goal = builder.add_or_get_node(Point::new(100.0, 0.0), crate::graph::NodeOrigin::PoleAttach);
        (builder.build(), start, goal)
    }

    #[test]
    fn finds_path_along_chain() {
        let (graph, start, goal) = chain_graph();
        let result = astar(&graph, start, goal, 400.0);
        assert!(result.reachable);
        assert!((result.total_length_m - 100.0).abs() < 1e-6);
        assert_eq!(result.polyline.first().copied().unwrap(), Point::new(0.0, 0.0));
        assert_eq!(result.polyline.last().copied().unwrap(), Point::new(100.0, 0.0));
    }

    #[test]
    fn abandons_when_over_max_distance() {
        let (graph, start, goal) = chain_graph();
        let result = astar(&graph, start, goal, 10.0);
        assert!(!result.reachable);
    }

    #[test]
    fn same_node_is_zero_length() {
        let (graph, start, _goal) = chain_graph();
        let result = astar(&graph, start, start, 400.0);
        assert!(result.reachable);
        assert_eq!(result.total_length_m, 0.0);
    }

    #[test]
    fn outcome_distinguishes_cap_from_no_path() {
        let (graph, start, goal) = chain_graph();
        assert!(matches!(astar_outcome(&graph, start, goal, 10.0), ReachOutcome::ExceededMaxDistance));

        // An isolated goal node with no edges at all: heap empties without
        // ever reaching it.
        let config = DesignConfig::default();
        let mut builder = RoadGraphBuilder::new(&config);
        builder.add_roads(&[Road {
            id: RoadId::from("R1"),
            polyline: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)],
            classification: "residential".into(),
        }]);
        let start = builder.add_or_get_node(Point::new(0.0, 0.0), crate::graph::NodeOrigin::Consumer);
        let isolated_goal = builder.add_or_get_node(Point::new(9_999.0, 9_999.0), crate::graph::NodeOrigin::PoleAttach);
        let graph = builder.build();
        assert!(matches!(astar_outcome(&graph, start, isolated_goal, 400.0), ReachOutcome::Unreachable));
    }

    #[test]
    fn fast_track_builds_direct_segment() {
        let result = fast_track_path(Point::new(0.0, 0.0), Point::new(30.0, 40.0));
        assert!(result.fast_track);
        assert_eq!(result.total_length_m, 50.0);
        assert_eq!(result.polyline.len(), 2);
    }
}
