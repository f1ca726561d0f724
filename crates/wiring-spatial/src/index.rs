//! Spatial index over normalized features (§4.2).
//!
//! Four parallel R-trees — one per indexable feature kind — each storing the
//! feature's bounding envelope plus its position in the owning
//! `NormalizedFeatures` vector. The envelope type generalizes from "points
//! only" to "points and bounding-boxed polylines/polygons" via a shared
//! `RTreeObject`/`PointDistance` entry pattern.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wiring_core::Point;
use wiring_features::NormalizedFeatures;

/// An axis-aligned rectangle in the projected plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Bounding rectangle of a non-empty point slice.
    ///
    /// # Panics
    ///
    /// Panics if `pts` is empty — callers only ever call this on a feature's
    /// own geometry, which normalization already guarantees is non-empty.
    pub fn from_points(pts: &[Point]) -> Self {
        let mut min = pts[0];
        let mut max = pts[0];
        for &p in &pts[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    /// Grow the rectangle by `margin` metres on every side.
    pub fn expand(self, margin: f64) -> Self {
        Rect::new(
            Point::new(self.min.x - margin, self.min.y - margin),
            Point::new(self.max.x + margin, self.max.y + margin),
        )
    }

    fn to_aabb(self) -> AABB<[f64; 2]> {
        AABB::from_corners([self.min.x, self.min.y], [self.max.x, self.max.y])
    }
}

struct PointEntry {
    point: [f64; 2],
    idx: usize,
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PointEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

struct BboxEntry {
    envelope: AABB<[f64; 2]>,
    idx: usize,
}

impl RTreeObject for BboxEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for BboxEntry {
    /// Distance to the nearest edge of the envelope — zero while `point` is
    /// inside it. Adequate for candidate prefiltering; the caller always
    /// follows up with an exact segment/polygon test.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let lo = self.envelope.lower();
        let hi = self.envelope.upper();
        let dx = if point[0] < lo[0] {
            lo[0] - point[0]
        } else if point[0] > hi[0] {
            point[0] - hi[0]
        } else {
            0.0
        };
        let dy = if point[1] < lo[1] {
            lo[1] - point[1]
        } else if point[1] > hi[1] {
            point[1] - hi[1]
        } else {
            0.0
        };
        dx * dx + dy * dy
    }
}

/// Spatial index over one batch of normalized features.
///
/// Query methods return indices into the corresponding `Vec` on the
/// `NormalizedFeatures` the index was built from — callers already hold
/// that reference and index into it directly.
pub struct SpatialIndex {
    poles: RTree<PointEntry>,
    lines: RTree<BboxEntry>,
    roads: RTree<BboxEntry>,
    buildings: RTree<BboxEntry>,
}

impl SpatialIndex {
    pub fn build(features: &NormalizedFeatures) -> Self {
        let poles = RTree::bulk_load(
            features
                .poles
                .iter()
                .enumerate()
                .map(|(idx, p)| PointEntry { point: [p.position.x, p.position.y], idx })
                .collect(),
        );
        let lines = RTree::bulk_load(
            features
                .lines
                .iter()
                .enumerate()
                .map(|(idx, l)| BboxEntry { envelope: Rect::from_points(&l.polyline).to_aabb(), idx })
                .collect(),
        );
        let roads = RTree::bulk_load(
            features
                .roads
                .iter()
                .enumerate()
                .map(|(idx, r)| BboxEntry { envelope: Rect::from_points(&r.polyline).to_aabb(), idx })
                .collect(),
        );
        let buildings = RTree::bulk_load(
            features
                .buildings
                .iter()
                .enumerate()
                .map(|(idx, b)| BboxEntry { envelope: Rect::from_points(&b.ring).to_aabb(), idx })
                .collect(),
        );
        Self { poles, lines, roads, buildings }
    }

    /// The `k` nearest poles to `p`, nearest first.
    pub fn nearest_poles(&self, p: Point, k: usize) -> Vec<usize> {
        self.poles.nearest_neighbor_iter(&[p.x, p.y]).take(k).map(|e| e.idx).collect()
    }

    /// Poles within `radius_m` of `p`, nearest first.
    pub fn poles_within(&self, p: Point, radius_m: f64) -> Vec<usize> {
        let r2 = radius_m * radius_m;
        self.poles
            .nearest_neighbor_iter(&[p.x, p.y])
            .take_while(|e| e.distance_2(&[p.x, p.y]) <= r2)
            .map(|e| e.idx)
            .collect()
    }

    /// The `k` nearest roads to `p` by envelope distance, nearest first.
    pub fn nearest_roads(&self, p: Point, k: usize) -> Vec<usize> {
        self.roads.nearest_neighbor_iter(&[p.x, p.y]).take(k).map(|e| e.idx).collect()
    }

    pub fn query_lines_bbox(&self, rect: Rect) -> impl Iterator<Item = usize> + '_ {
        self.lines.locate_in_envelope_intersecting(&rect.to_aabb()).map(|e| e.idx)
    }

    /// Buildings whose envelope overlaps `rect` — a cheap prefilter ahead of
    /// an exact ring test (§4.7 building avoidance).
    pub fn query_buildings_bbox(&self, rect: Rect) -> impl Iterator<Item = usize> + '_ {
        self.buildings.locate_in_envelope_intersecting(&rect.to_aabb()).map(|e| e.idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::{PhaseClass, PoleId, RoadId, VoltageClass};
    use wiring_features::{Pole, Road};

    fn road(id: &str, pts: &[(f64, f64)]) -> Road {
        Road {
            id: RoadId::from(id),
            polyline: pts.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            classification: String::new(),
        }
    }

    fn pole(id: &str, x: f64, y: f64) -> Pole {
        Pole {
            id: PoleId::from(id),
            position: Point::new(x, y),
            voltage_class: VoltageClass::Lv,
            phase_class: PhaseClass::Single,
            pole_kind_code: "L".to_string(),
            has_hv: false,
            has_lv: true,
            has_hv_three_phase: false,
        }
    }

    #[test]
    fn nearest_poles_orders_by_distance() {
        let mut features = NormalizedFeatures::default();
        features.poles.push(pole("A", 0.0, 0.0));
        features.poles.push(pole("B", 10.0, 0.0));
        features.poles.push(pole("C", 5.0, 0.0));

        let index = SpatialIndex::build(&features);
        let nearest = index.nearest_poles(Point::new(4.0, 0.0), 2);
        assert_eq!(nearest, vec![2, 0]);
    }

    #[test]
    fn poles_within_radius_excludes_far_ones() {
        let mut features = NormalizedFeatures::default();
        features.poles.push(pole("A", 0.0, 0.0));
        features.poles.push(pole("B", 100.0, 0.0));

        let index = SpatialIndex::build(&features);
        let within = index.poles_within(Point::new(0.0, 0.0), 10.0);
        assert_eq!(within, vec![0]);
    }

    #[test]
    fn nearest_roads_orders_by_envelope_distance() {
        let mut features = NormalizedFeatures::default();
        features.roads.push(road("R1", &[(0.0, 0.0), (1.0, 0.0)]));
        features.roads.push(road("R2", &[(100.0, 0.0), (101.0, 0.0)]));

        let index = SpatialIndex::build(&features);
        let nearest = index.nearest_roads(Point::new(2.0, 0.0), 1);
        assert_eq!(nearest, vec![0]);
    }
}
