//! Projected-plane coordinate type and geometry primitives.
//!
//! Coordinates live on a projected metric plane (Web Mercator / EPSG:3857
//! semantics) rather than a lat/lon sphere, so — unlike a geodetic model —
//! distance between two points is plain Euclidean distance; no haversine
//! correction applies or is needed.

/// A point on the projected metric plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance_m(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Squared Euclidean distance — avoids a `sqrt` when only comparing
    /// distances (e.g. nearest-neighbour ranking).
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Approximate bounding-box check — cheaper than `distance_m` for quick
    /// rejection before an exact geometry test.
    #[inline]
    pub fn within_bbox(self, center: Point, half_extent_m: f64) -> bool {
        (self.x - center.x).abs() <= half_extent_m && (self.y - center.y).abs() <= half_extent_m
    }

    /// Linear interpolation between `self` and `other` at `t` ∈ [0, 1].
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A directed line segment between two points, plus the helpers the road
/// graph builder and crossing validator both need: length, perpendicular
/// projection, and point-on-segment interpolation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

/// Result of projecting a point onto a segment.
pub struct Projection {
    /// The nearest point on the (infinite) line through the segment, clamped
    /// to the segment's extent.
    pub point: Point,
    /// Parametric position along the segment, clamped to `[0, 1]`.
    pub t: f64,
    /// Perpendicular (or endpoint) distance from the query point.
    pub distance_m: f64,
}

impl Segment {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length_m(&self) -> f64 {
        self.a.distance_m(self.b)
    }

    /// Project `p` onto this segment, clamped to the segment's extent.
    ///
    /// Degenerate (zero-length) segments project to `a` with `t = 0.0`.
    pub fn project(&self, p: Point) -> Projection {
        let dx = self.b.x - self.a.x;
        let dy = self.b.y - self.a.y;
        let len_sq = dx * dx + dy * dy;

        if len_sq == 0.0 {
            return Projection { point: self.a, t: 0.0, distance_m: self.a.distance_m(p) };
        }

        let t = ((p.x - self.a.x) * dx + (p.y - self.a.y) * dy) / len_sq;
        let t_clamped = t.clamp(0.0, 1.0);
        let point = self.a.lerp(self.b, t_clamped);
        Projection { point, t: t_clamped, distance_m: point.distance_m(p) }
    }

    /// `true` if `t` (from `project`) lies strictly inside the segment —
    /// i.e. the foot is not at either endpoint.
    #[inline]
    pub fn is_interior(t: f64) -> bool {
        t > 0.0 && t < 1.0
    }

    /// Point at parametric position `t` ∈ [0, 1] along the segment.
    #[inline]
    pub fn at(&self, t: f64) -> Point {
        self.a.lerp(self.b, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance() {
        let p = Point::new(10.0, 20.0);
        assert!(p.distance_m(p) < 1e-9);
    }

    #[test]
    fn pythagorean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(30.0, 40.0);
        assert!((a.distance_m(b) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn bbox_check() {
        let center = Point::new(100.0, 100.0);
        let nearby = Point::new(105.0, 95.0);
        let far = Point::new(500.0, 100.0);
        assert!(nearby.within_bbox(center, 10.0));
        assert!(!far.within_bbox(center, 10.0));
    }

    #[test]
    fn project_onto_interior() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let proj = seg.project(Point::new(50.0, 10.0));
        assert!((proj.point.x - 50.0).abs() < 1e-9);
        assert!((proj.distance_m - 10.0).abs() < 1e-9);
        assert!(Segment::is_interior(proj.t));
    }

    #[test]
    fn project_clamps_to_endpoint() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let proj = seg.project(Point::new(-20.0, 5.0));
        assert_eq!(proj.t, 0.0);
        assert!(!Segment::is_interior(proj.t));
        assert_eq!(proj.point, seg.a);
    }

    #[test]
    fn degenerate_segment_projects_to_a() {
        let seg = Segment::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
        let proj = seg.project(Point::new(8.0, 9.0));
        assert_eq!(proj.point, seg.a);
        assert!((proj.distance_m - 5.0).abs() < 1e-9);
    }
}
