//! Typed entities produced by the normalizer. Immutable after construction
//! (§3 Lifecycle): nothing in this module exposes `&mut` accessors.

use wiring_core::{BuildingId, LineId, LineType, PhaseClass, Point, PoleId, RailwayId, RiverId, RoadId, TransformerId, VoltageClass};

/// An existing utility pole.
#[derive(Clone, Debug, PartialEq)]
pub struct Pole {
    pub id: PoleId,
    pub position: Point,
    pub voltage_class: VoltageClass,
    pub phase_class: PhaseClass,
    /// Raw pole-form code, kept for diagnostics and cost lookup.
    pub pole_kind_code: String,
    /// `true` if this pole carries at least one incident high-voltage line.
    pub has_hv: bool,
    /// `true` if this pole carries at least one incident low-voltage line.
    pub has_lv: bool,
    /// `true` if this pole carries at least one incident three-phase
    /// high-voltage line — the gate for three-phase candidacy (§4.3).
    pub has_hv_three_phase: bool,
}

impl Pole {
    /// Derived field required by the data model: a pole is
    /// three-phase-connected iff it has an incident HV three-phase line.
    pub fn is_three_phase_connected(&self) -> bool {
        self.has_hv_three_phase
    }
}

/// A conductor span between two points, optionally terminating at poles.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub polyline: Vec<Point>,
    pub from_pole: Option<PoleId>,
    pub to_pole: Option<PoleId>,
    pub line_type: LineType,
    pub phase_class: PhaseClass,
    pub wire_spec: String,
    pub voltage_value_kv: Option<f64>,
}

impl Line {
    pub fn is_hv(&self) -> bool {
        matches!(self.line_type, LineType::Hv)
    }

    pub fn is_three_phase(&self) -> bool {
        matches!(self.phase_class, PhaseClass::Three)
    }
}

/// A distribution transformer.
#[derive(Clone, Debug, PartialEq)]
pub struct Transformer {
    pub id: TransformerId,
    pub position: Point,
    pub capacity_kva: Option<f64>,
    pub annotation: Option<String>,
    /// Raw pole id the source record names as the transformer's secondary
    /// connection, if any. Used only to synthesize the LV line described by
    /// `annotation` (§4.1) — not a validated reference.
    pub connected_pole_hint: Option<String>,
}

/// A road centerline, used for routing and for display filtering only —
/// `classification` never affects routing weight (§3).
#[derive(Clone, Debug, PartialEq)]
pub struct Road {
    pub id: RoadId,
    pub polyline: Vec<Point>,
    pub classification: String,
}

/// A building polygon — a forbidden zone for new-pole placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub id: BuildingId,
    pub ring: Vec<Point>,
}

impl Building {
    /// Strict point-in-polygon test (boundary does not count as inside).
    /// Ray casting to +x; robust to the polygon being given open or closed.
    pub fn strictly_contains(&self, p: Point) -> bool {
        let ring = &self.ring;
        let n = ring.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = ring[i];
            let vj = ring[j];

            // On-boundary points are not "strictly inside".
            if point_on_segment(p, vi, vj) {
                return false;
            }

            let intersects = (vi.y > p.y) != (vj.y > p.y)
                && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if intersects {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    let cross = (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x);
    if cross.abs() > 1e-9 {
        return false;
    }
    let dot = (p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y);
    let len_sq = (b.x - a.x).powi(2) + (b.y - a.y).powi(2);
    dot >= 0.0 && dot <= len_sq
}

/// A railway feature — informational overlay only (§3); not used for
/// routing or avoidance in this pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Railway {
    pub id: RailwayId,
    pub polyline: Vec<Point>,
}

/// A river feature — informational overlay only (§3).
#[derive(Clone, Debug, PartialEq)]
pub struct River {
    pub id: RiverId,
    pub polyline: Vec<Point>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Building {
        Building {
            id: BuildingId::from("B1"),
            ring: vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
        }
    }

    #[test]
    fn strictly_inside() {
        let b = square();
        assert!(b.strictly_contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn strictly_outside() {
        let b = square();
        assert!(!b.strictly_contains(Point::new(50.0, 50.0)));
    }

    #[test]
    fn boundary_is_not_strictly_inside() {
        let b = square();
        assert!(!b.strictly_contains(Point::new(0.0, 5.0)));
        assert!(!b.strictly_contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn three_phase_connected_requires_hv_three_phase() {
        let pole = Pole {
            id: wiring_core::PoleId::from("P1"),
            position: Point::new(0.0, 0.0),
            voltage_class: VoltageClass::Hv,
            phase_class: PhaseClass::Three,
            pole_kind_code: "H".to_string(),
            has_hv: true,
            has_lv: false,
            has_hv_three_phase: false,
        };
        assert!(!pole.is_three_phase_connected());
    }
}
