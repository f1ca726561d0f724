//! Raw feature records as delivered by the GIS source.
//!
//! A [`RawRecord`] is deliberately loosely typed — an id, a geometry, and a
//! bag of string-coded attribute fields — mirroring what a WFS/Shapefile/CSV
//! feeder actually hands the ingestion boundary. [`normalize`](crate::normalize)
//! turns these into the typed entities the rest of the pipeline consumes.

use std::collections::HashMap;

use wiring_core::Point;

/// The kind of GIS feature a [`RawRecord`] represents.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FeatureKind {
    Pole,
    Line,
    Transformer,
    Road,
    Building,
    Railway,
    River,
}

impl FeatureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKind::Pole => "pole",
            FeatureKind::Line => "line",
            FeatureKind::Transformer => "transformer",
            FeatureKind::Road => "road",
            FeatureKind::Building => "building",
            FeatureKind::Railway => "railway",
            FeatureKind::River => "river",
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry carried by a raw feature record.
#[derive(Clone, Debug, PartialEq)]
pub enum RawGeometry {
    Point(Point),
    LineString(Vec<Point>),
    /// Closed ring; first and last point need not be repeated.
    Polygon(Vec<Point>),
}

impl RawGeometry {
    /// `true` if this geometry carries at least the minimum number of
    /// distinct vertices for its kind (2 for a line, 3 for a polygon).
    pub fn is_well_formed(&self) -> bool {
        match self {
            RawGeometry::Point(_) => true,
            RawGeometry::LineString(pts) => pts.len() >= 2 && !all_coincident(pts),
            RawGeometry::Polygon(pts) => pts.len() >= 3 && !all_coincident(pts),
        }
    }
}

fn all_coincident(pts: &[Point]) -> bool {
    match pts.split_first() {
        None => true,
        Some((first, rest)) => rest.iter().all(|p| p.distance_m(*first) < 1e-9),
    }
}

/// One raw feature record: a stable id, its geometry, and the coded
/// attribute fields relevant to its kind.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    pub kind: FeatureKind,
    pub id: String,
    pub geometry: RawGeometry,
    /// Coded attribute fields, e.g. `"phase" -> "ABC"`, `"conductor" -> "ACSR"`.
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new(kind: FeatureKind, id: impl Into<String>, geometry: RawGeometry) -> Self {
        Self { kind, id: id.into(), geometry, fields: HashMap::new() }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_linestring_is_not_well_formed() {
        let p = Point::new(1.0, 1.0);
        let geom = RawGeometry::LineString(vec![p, p]);
        assert!(!geom.is_well_formed());
    }

    #[test]
    fn two_distinct_point_linestring_is_well_formed() {
        let geom = RawGeometry::LineString(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        assert!(geom.is_well_formed());
    }

    #[test]
    fn field_lookup() {
        let rec = RawRecord::new(FeatureKind::Pole, "P1", RawGeometry::Point(Point::new(0.0, 0.0)))
            .with_field("phase", "ABC");
        assert_eq!(rec.field("phase"), Some("ABC"));
        assert_eq!(rec.field("missing"), None);
    }
}
