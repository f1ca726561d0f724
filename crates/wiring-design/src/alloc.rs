//! New-pole placement along an accepted path (S7, §4.7).
//!
//! Walks the accepted polyline by arc length, placing a pole every interval
//! and nudging perpendicular to the path when a placement lands inside a
//! building.

use wiring_core::{DesignConfig, Point};
use wiring_features::Building;
use wiring_spatial::{Rect, SpatialIndex};

use crate::error::DesignError;

/// Point at arc-length `target_m` along `path`, clamped to `[0, total length]`.
///
/// Walks segments accumulating length; interpolates on the segment that
/// contains `target_m`. Assumes `path` has at least two points (every
/// accepted path does).
fn point_at_arc_length(path: &[Point], target_m: f64) -> Point {
    let mut remaining = target_m.max(0.0);
    for seg in path.windows(2) {
        let len = seg[0].distance_m(seg[1]);
        if remaining <= len || len <= 0.0 {
            let t = if len > 0.0 { (remaining / len).clamp(0.0, 1.0) } else { 0.0 };
            return seg[0].lerp(seg[1], t);
        }
        remaining -= len;
    }
    *path.last().unwrap()
}

/// Prefilters candidate buildings by envelope before the exact ring test —
/// cheap when a batch has many buildings far from the path.
fn inside_any_building(p: Point, buildings: &[Building], index: &SpatialIndex) -> bool {
    index
        .query_buildings_bbox(Rect::new(p, p))
        .any(|idx| buildings[idx].strictly_contains(p))
}

/// Slide the arc-length position by increasing increments (both directions)
/// up to `nudge_m` until the resulting point clears every building, or
/// return `None` if nothing within the budget does.
fn resolve_placement(path: &[Point], target_m: f64, total_length_m: f64, buildings: &[Building], index: &SpatialIndex, nudge_m: f64) -> Option<Point> {
    let base = point_at_arc_length(path, target_m);
    if !inside_any_building(base, buildings, index) {
        return Some(base);
    }

    const STEPS: u32 = 10;
    for i in 1..=STEPS {
        let delta = nudge_m * f64::from(i) / f64::from(STEPS);
        for sign in [1.0, -1.0] {
            let candidate_arc = (target_m + sign * delta).clamp(0.0, total_length_m);
            let p = point_at_arc_length(path, candidate_arc);
            if !inside_any_building(p, buildings, index) {
                return Some(p);
            }
        }
    }
    None
}

/// Place new poles at `k * pole_interval_m` along `path` for
/// `k = 1, ..., floor(total_length_m / pole_interval_m)`, nudging around
/// buildings. `path` is the accepted route's polyline (consumer first,
/// candidate pole last); `total_length_m` is its summed segment length.
///
/// A fast-track path at or under `fast_track_limit_m` gets no new poles —
/// the direct segment is short enough to need none (§4.7).
pub fn allocate_new_poles(
    path: &[Point],
    total_length_m: f64,
    fast_track: bool,
    buildings: &[Building],
    index: &SpatialIndex,
    config: &DesignConfig,
) -> Result<Vec<Point>, DesignError> {
    if fast_track && total_length_m <= config.fast_track_limit_m {
        return Ok(Vec::new());
    }

    let count = (total_length_m / config.pole_interval_m).floor() as u64;
    let mut poles = Vec::with_capacity(count as usize);

    for k in 1..=count {
        let target_m = k as f64 * config.pole_interval_m;
        match resolve_placement(path, target_m, total_length_m, buildings, index, config.pole_nudge_m) {
            Some(p) => poles.push(p),
            None => return Err(DesignError::BuildingBlocked { arc_len_m: target_m }),
        }
    }

    Ok(poles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiring_core::BuildingId;
    use wiring_features::NormalizedFeatures;

    fn straight_path() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(205.0, 0.0)]
    }

    fn index_for(buildings: &[Building]) -> SpatialIndex {
        let mut features = NormalizedFeatures::default();
        features.buildings = buildings.to_vec();
        SpatialIndex::build(&features)
    }

    #[test]
    fn places_poles_at_fixed_interval() {
        let config = DesignConfig::default();
        let path = straight_path();
        let index = index_for(&[]);
        let poles = allocate_new_poles(&path, 205.0, false, &[], &index, &config).unwrap();
        assert_eq!(poles.len(), 5); // floor(205/40) = 5
        assert_eq!(poles[0], Point::new(40.0, 0.0));
        assert_eq!(poles[4], Point::new(200.0, 0.0));
    }

    #[test]
    fn fast_track_under_limit_gets_no_poles() {
        let config = DesignConfig::default();
        let path = vec![Point::new(0.0, 0.0), Point::new(30.0, 0.0)];
        let index = index_for(&[]);
        let poles = allocate_new_poles(&path, 30.0, true, &[], &index, &config).unwrap();
        assert!(poles.is_empty());
    }

    #[test]
    fn nudges_around_a_blocking_building() {
        let config = DesignConfig::default();
        let path = straight_path();
        // A building straddling the 40m mark exactly.
        let building = Building {
            id: BuildingId::from("B1"),
            ring: vec![Point::new(38.0, -5.0), Point::new(42.0, -5.0), Point::new(42.0, 5.0), Point::new(38.0, 5.0)],
        };
        let index = index_for(&[building.clone()]);
        let poles = allocate_new_poles(&path, 205.0, false, &[building.clone()], &index, &config).unwrap();
        assert!(!building.strictly_contains(poles[0]));
    }

    #[test]
    fn rejects_when_nudge_budget_cannot_clear_building() {
        let config = DesignConfig::default();
        let path = straight_path();
        // A building wide enough that no nudge within 5m clears it.
        let building = Building {
            id: BuildingId::from("B1"),
            ring: vec![Point::new(20.0, -5.0), Point::new(60.0, -5.0), Point::new(60.0, 5.0), Point::new(20.0, 5.0)],
        };
        let index = index_for(&[building.clone()]);
        let result = allocate_new_poles(&path, 205.0, false, &[building], &index, &config);
        assert!(matches!(result, Err(DesignError::BuildingBlocked { .. })));
    }
}
