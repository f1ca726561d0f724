//! Strict-crossing validation (S6, §4.6).
//!
//! A candidate route is rejected the moment it *strictly* crosses an
//! existing line: shares an interior point with it, rather than merely
//! touching at a shared endpoint (a pole) or running collinear alongside it
//! for a stretch. `geo::line_intersection` already classifies an
//! intersection as "proper" exactly when it isn't at either segment's
//! endpoint, which is the same distinction — so this module is a thin
//! adapter over that primitive rather than a hand-rolled one.

use geo::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Line as GeoLine};

use wiring_core::{LineType, Point};
use wiring_features::Line;

use crate::index::{Rect, SpatialIndex};

/// The first existing line a candidate path strictly crosses.
#[derive(Clone, Debug, PartialEq)]
pub struct CrossingRejection {
    pub line_id: String,
    pub line_type: LineType,
}

fn to_coord(p: Point) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// `true` if two path segments strictly cross: a single proper intersection
/// point, or any collinear overlap (sharing more than an endpoint is still a
/// crossing even when the two segments run parallel).
fn segments_strictly_cross(a: GeoLine<f64>, b: GeoLine<f64>) -> bool {
    match line_intersection(a, b) {
        Some(LineIntersection::SinglePoint { is_proper, .. }) => is_proper,
        Some(LineIntersection::Collinear { .. }) => true,
        None => false,
    }
}

/// Check `path` against every existing line that could plausibly intersect
/// it, short-circuiting on the first strict crossing found. `index` prefilters
/// by bounding-box overlap so well-separated lines never reach the exact
/// segment test.
pub fn validate_path(path: &[Point], lines: &[Line], index: &SpatialIndex) -> Result<(), CrossingRejection> {
    if path.len() < 2 {
        return Ok(());
    }

    let bbox = Rect::from_points(path).expand(1.0);
    for line_idx in index.query_lines_bbox(bbox) {
        let line = &lines[line_idx];
        for path_seg in path.windows(2) {
            let a = GeoLine::new(to_coord(path_seg[0]), to_coord(path_seg[1]));
            for line_seg in line.polyline.windows(2) {
                let b = GeoLine::new(to_coord(line_seg[0]), to_coord(line_seg[1]));
                if segments_strictly_cross(a, b) {
                    return Err(CrossingRejection { line_id: line.id.as_str().to_string(), line_type: line.line_type });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::{LineId, PhaseClass};
    use wiring_features::NormalizedFeatures;

    fn line(id: &str, a: Point, b: Point) -> Line {
        Line {
            id: LineId::from(id),
            polyline: vec![a, b],
            from_pole: None,
            to_pole: None,
            line_type: LineType::Lv,
            phase_class: PhaseClass::Single,
            wire_spec: "AL-50".to_string(),
            voltage_value_kv: None,
        }
    }

    #[test]
    fn rejects_a_strict_crossing() {
        let lines = vec![line("L1", Point::new(0.0, -10.0), Point::new(0.0, 10.0))];
        let mut features = NormalizedFeatures::default();
        features.lines = lines.clone();
        let index = SpatialIndex::build(&features);

        let path = vec![Point::new(-10.0, 0.0), Point::new(10.0, 0.0)];
        let result = validate_path(&path, &lines, &index);
        assert_eq!(result, Err(CrossingRejection { line_id: "L1".to_string(), line_type: LineType::Lv }));
    }

    #[test]
    fn allows_a_shared_endpoint_touch() {
        let lines = vec![line("L1", Point::new(0.0, 0.0), Point::new(0.0, 10.0))];
        let mut features = NormalizedFeatures::default();
        features.lines = lines.clone();
        let index = SpatialIndex::build(&features);

        // Path ends exactly at the line's start point — a shared pole, not a crossing.
        let path = vec![Point::new(-10.0, 0.0), Point::new(0.0, 0.0)];
        assert_eq!(validate_path(&path, &lines, &index), Ok(()));
    }

    #[test]
    fn allows_well_separated_lines() {
        let lines = vec![line("L1", Point::new(1000.0, 1000.0), Point::new(1000.0, 1010.0))];
        let mut features = NormalizedFeatures::default();
        features.lines = lines.clone();
        let index = SpatialIndex::build(&features);

        let path = vec![Point::new(-10.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(validate_path(&path, &lines, &index), Ok(()));
    }
}
