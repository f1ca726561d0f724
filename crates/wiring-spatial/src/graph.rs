//! Road graph construction and attachment (S4, §4.4).
//!
//! Nodes are quantized coordinates (so nearly-coincident road vertices merge
//! into one node) plus whatever the pathfinder needs attached: the consumer
//! point and every candidate pole. Edges carry both a physical `length_m` and
//! a routing `weight` that folds in the amortised per-pole cost share — A*
//! optimises on `weight`, but `MAX_DISTANCE` is still checked against
//! `length_m`.
//!
//! Built in two phases: a mutable [`RoadGraphBuilder`] accumulates nodes
//! and edges (including mid-build topology repairs and attachments), then
//! [`RoadGraphBuilder::build`] compacts everything into the CSR
//! [`RoadGraph`] the pathfinder queries.

use std::collections::{HashMap, HashSet};

use wiring_core::{DesignConfig, NodeId, Point, RoadId, Segment};
use wiring_features::Road;

use crate::error::SpatialError;

/// Why a node exists, kept for diagnostics and for output's `new_pole`
/// bookkeeping — not used by the pathfinder itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeOrigin {
    /// An original road-polyline vertex.
    RoadVertex,
    /// Inserted by splitting a road edge to attach a consumer or pole.
    RoadSplit,
    /// The request's consumer point.
    Consumer,
    /// A candidate or newly allocated pole.
    PoleAttach,
}

struct RawEdge {
    from: NodeId,
    to: NodeId,
    length_m: f64,
    weight: f64,
    road_id: Option<RoadId>,
}

fn edge_weight(length_m: f64, pole_interval_m: f64, pole_cost_share_m: f64) -> f64 {
    length_m + (length_m / pole_interval_m) * pole_cost_share_m
}

/// Mutable accumulator for road-graph construction. Build order: [`add_roads`],
/// [`stitch_disconnected_roads`], then [`attach_point`] for the consumer and
/// each candidate, finally [`build`].
///
/// [`add_roads`]: RoadGraphBuilder::add_roads
/// [`stitch_disconnected_roads`]: RoadGraphBuilder::stitch_disconnected_roads
/// [`attach_point`]: RoadGraphBuilder::attach_point
/// [`build`]: RoadGraphBuilder::build
pub struct RoadGraphBuilder {
    node_pos: Vec<Point>,
    node_origin: Vec<NodeOrigin>,
    quant_to_node: HashMap<(i64, i64), NodeId>,
    edges: Vec<RawEdge>,
    road_endpoints: Vec<NodeId>,
    epsilon: f64,
    pole_interval_m: f64,
    pole_cost_share_m: f64,
}

impl RoadGraphBuilder {
    pub fn new(config: &DesignConfig) -> Self {
        Self {
            node_pos: Vec::new(),
            node_origin: Vec::new(),
            quant_to_node: HashMap::new(),
            edges: Vec::new(),
            road_endpoints: Vec::new(),
            epsilon: config.node_quant_epsilon_m,
            pole_interval_m: config.pole_interval_m,
            pole_cost_share_m: config.pole_cost_share_m,
        }
    }

    fn quantize(&self, p: Point) -> (i64, i64) {
        ((p.x / self.epsilon).round() as i64, (p.y / self.epsilon).round() as i64)
    }

    /// Get the node at `pos`, merging with any existing node within one
    /// quantization cell, or create one with the given `origin`.
    pub fn add_or_get_node(&mut self, pos: Point, origin: NodeOrigin) -> NodeId {
        let key = self.quantize(pos);
        if let Some(&id) = self.quant_to_node.get(&key) {
            return id;
        }
        let id = NodeId(self.node_pos.len() as u32);
        self.node_pos.push(pos);
        self.node_origin.push(origin);
        self.quant_to_node.insert(key, id);
        id
    }

    fn add_edge_undirected(&mut self, a: NodeId, b: NodeId, length_m: f64, road_id: Option<RoadId>) {
        if a == b || length_m <= 0.0 {
            return;
        }
        let weight = edge_weight(length_m, self.pole_interval_m, self.pole_cost_share_m);
        self.edges.push(RawEdge { from: a, to: b, length_m, weight, road_id: road_id.clone() });
        self.edges.push(RawEdge { from: b, to: a, length_m, weight, road_id });
    }

    /// Populate nodes and edges from road centerlines.
    pub fn add_roads(&mut self, roads: &[Road]) {
        for road in roads {
            if road.polyline.len() < 2 {
                continue;
            }
            let first = self.add_or_get_node(road.polyline[0], NodeOrigin::RoadVertex);
            self.road_endpoints.push(first);

            let mut prev = first;
            for &pt in &road.polyline[1..] {
                let node = self.add_or_get_node(pt, NodeOrigin::RoadVertex);
                let length = self.node_pos[prev.index()].distance_m(self.node_pos[node.index()]);
                self.add_edge_undirected(prev, node, length, Some(road.id.clone()));
                prev = node;
            }
            self.road_endpoints.push(prev);
        }
    }

    /// Connect road-endpoint nodes within `snap_tolerance_m` of each other
    /// that quantized-vertex merging left disjoint — repairs the common GIS
    /// digitizing error of near-miss but unconnected road endpoints.
    pub fn stitch_disconnected_roads(&mut self, snap_tolerance_m: f64) {
        let endpoints = self.road_endpoints.clone();
        let mut connected: HashSet<(u32, u32)> =
            self.edges.iter().map(|e| (e.from.0.min(e.to.0), e.from.0.max(e.to.0))).collect();

        for i in 0..endpoints.len() {
            for j in (i + 1)..endpoints.len() {
                let a = endpoints[i];
                let b = endpoints[j];
                if a == b {
                    continue;
                }
                let key = (a.0.min(b.0), a.0.max(b.0));
                if connected.contains(&key) {
                    continue;
                }
                let dist = self.node_pos[a.index()].distance_m(self.node_pos[b.index()]);
                if dist <= snap_tolerance_m {
                    self.add_edge_undirected(a, b, dist, None);
                    connected.insert(key);
                }
            }
        }
    }

    /// Attach a consumer or candidate-pole point to the nearest road segment
    /// within `max_attach_m`, splitting the segment if the perpendicular foot
    /// lands strictly inside it.
    pub fn attach_point(&mut self, point: Point, origin: NodeOrigin, max_attach_m: f64) -> Result<NodeId, SpatialError> {
        let Some((from, to, road_id)) = self.nearest_road_edge(point) else {
            return Err(SpatialError::NoRoadAccess);
        };

        let seg = Segment::new(self.node_pos[from.index()], self.node_pos[to.index()]);
        let proj = seg.project(point);
        if proj.distance_m > max_attach_m {
            return Err(SpatialError::NoRoadAccess);
        }

        let attach_node = self.add_or_get_node(point, origin);

        if !Segment::is_interior(proj.t) {
            let endpoint = if proj.t <= 0.0 { from } else { to };
            let dist = self.node_pos[attach_node.index()].distance_m(self.node_pos[endpoint.index()]);
            self.add_edge_undirected(attach_node, endpoint, dist, None);
            return Ok(attach_node);
        }

        self.remove_edge_pair(from, to);
        let foot = self.add_or_get_node(proj.point, NodeOrigin::RoadSplit);
        let len_a = self.node_pos[from.index()].distance_m(self.node_pos[foot.index()]);
        let len_b = self.node_pos[foot.index()].distance_m(self.node_pos[to.index()]);
        self.add_edge_undirected(from, foot, len_a, road_id.clone());
        self.add_edge_undirected(foot, to, len_b, road_id);
        self.add_edge_undirected(attach_node, foot, proj.distance_m, None);

        Ok(attach_node)
    }

    fn nearest_road_edge(&self, point: Point) -> Option<(NodeId, NodeId, Option<RoadId>)> {
        let mut best: Option<(NodeId, NodeId, Option<RoadId>, f64)> = None;
        for e in &self.edges {
            if e.road_id.is_none() {
                continue;
            }
            if e.from.0 > e.to.0 {
                continue; // each undirected pair is stored twice; visit once
            }
            let seg = Segment::new(self.node_pos[e.from.index()], self.node_pos[e.to.index()]);
            let proj = seg.project(point);
            let better = best.as_ref().map(|&(_, _, _, d)| proj.distance_m < d).unwrap_or(true);
            if better {
                best = Some((e.from, e.to, e.road_id.clone(), proj.distance_m));
            }
        }
        best.map(|(a, b, r, _)| (a, b, r))
    }

    fn remove_edge_pair(&mut self, a: NodeId, b: NodeId) {
        self.edges.retain(|e| !((e.from == a && e.to == b) || (e.from == b && e.to == a)));
    }

    pub fn node_pos(&self, id: NodeId) -> Point {
        self.node_pos[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Compact into the CSR graph A* queries.
    pub fn build(self) -> RoadGraph {
        let node_count = self.node_pos.len();
        let mut edges = self.edges;
        edges.sort_by_key(|e| e.from.0);

        let edge_to: Vec<NodeId> = edges.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64> = edges.iter().map(|e| e.length_m).collect();
        let edge_weight: Vec<f64> = edges.iter().map(|e| e.weight).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &edges {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }

        RoadGraph {
            node_pos: self.node_pos,
            node_origin: self.node_origin,
            node_out_start,
            edge_to,
            edge_length_m,
            edge_weight,
        }
    }
}

/// Finalized, immutable CSR road graph.
pub struct RoadGraph {
    node_pos: Vec<Point>,
    node_origin: Vec<NodeOrigin>,
    node_out_start: Vec<u32>,
    edge_to: Vec<NodeId>,
    edge_length_m: Vec<f64>,
    edge_weight: Vec<f64>,
}

impl RoadGraph {
    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn node_pos(&self, node: NodeId) -> Point {
        self.node_pos[node.index()]
    }

    pub fn node_origin(&self, node: NodeId) -> NodeOrigin {
        self.node_origin[node.index()]
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    /// Outgoing `(neighbor, length_m, weight)` triples for `node`.
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = (NodeId, f64, f64)> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(move |i| (self.edge_to[i], self.edge_length_m[i], self.edge_weight[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::RoadId as CoreRoadId;

    fn straight_road(id: &str, from: Point, to: Point) -> Road {
        Road { id: CoreRoadId::from(id), polyline: vec![from, to], classification: "residential".to_string() }
    }

    #[test]
    fn add_roads_merges_coincident_endpoints() {
        let config = DesignConfig::default();
        let mut builder = RoadGraphBuilder::new(&config);
        builder.add_roads(&[
            straight_road("R1", Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
            straight_road("R2", Point::new(100.0, 0.0), Point::new(100.0, 100.0)),
        ]);
        assert_eq!(builder.node_count(), 3);
        let graph = builder.build();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4); // two roads, each stored both directions
    }

    #[test]
    fn stitch_connects_nearby_disjoint_endpoints() {
        let config = DesignConfig::default();
        let mut builder = RoadGraphBuilder::new(&config);
        builder.add_roads(&[
            straight_road("R1", Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
            straight_road("R2", Point::new(105.0, 0.0), Point::new(200.0, 0.0)),
        ]);
        assert_eq!(builder.node_count(), 4); // not merged — 5m apart, beyond quantization grain
        builder.stitch_disconnected_roads(10.0);
        let graph = builder.build();
        assert_eq!(graph.edge_count(), 6); // two road edges + one stitched edge, both directions
    }

    #[test]
    fn attach_point_splits_interior_segment() {
        let config = DesignConfig::default();
        let mut builder = RoadGraphBuilder::new(&config);
        builder.add_roads(&[straight_road("R1", Point::new(0.0, 0.0), Point::new(100.0, 0.0))]);
        let attach = builder
            .attach_point(Point::new(50.0, 10.0), NodeOrigin::Consumer, 100.0)
            .expect("within max_attach_m");
        let graph = builder.build();
        assert_eq!(graph.node_count(), 4); // two road ends + split foot + consumer
        assert_eq!(graph.node_origin(attach), NodeOrigin::Consumer);
    }

    #[test]
    fn attach_point_beyond_max_attach_fails() {
        let config = DesignConfig::default();
        let mut builder = RoadGraphBuilder::new(&config);
        builder.add_roads(&[straight_road("R1", Point::new(0.0, 0.0), Point::new(100.0, 0.0))]);
        let result = builder.attach_point(Point::new(50.0, 200.0), NodeOrigin::Consumer, 50.0);
        assert!(matches!(result, Err(SpatialError::NoRoadAccess)));
    }
}
