//! S1 — raw record ingestion and normalization.
//!
//! A buffer-then-build shape: records are scanned once, validated
//! per-record, and malformed ones are dropped with a counter rather than
//! aborting the whole batch (§4.1, §7). Dropped records are reported at
//! `tracing::debug!` level in addition to the returned [`DropCounters`].
//!
//! Pole-to-line adjacency (`has_hv`, `has_lv`, `has_hv_three_phase`) and the
//! voltage-class inference that depends on it can only be computed once all
//! lines — including lines synthesized from transformer annotations — are
//! known, so normalization runs in two passes: decode everything else first,
//! then finalize poles.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use wiring_core::{BuildingId, LineId, LineType, PhaseClass, Point, PoleId, RailwayId, RiverId, RoadId, TransformerId, VoltageClass};

use crate::entities::{Building, Line, Pole, Railway, River, Road, Transformer};
use crate::raw::{FeatureKind, RawGeometry, RawRecord};
use crate::FeatureError;

/// Token that marks a transformer annotation as carrying a derived
/// low-voltage overhead-wire span. Matches the conductor-kind code used for
/// the same construction type in `Line::wire_spec` (§4.1).
const OVERHEAD_WIRE_MARKER: &str = "OW";

/// Fully normalized, immutable feature set for one request.
#[derive(Clone, Debug, Default)]
pub struct NormalizedFeatures {
    pub poles: Vec<Pole>,
    pub lines: Vec<Line>,
    pub transformers: Vec<Transformer>,
    pub roads: Vec<Road>,
    pub buildings: Vec<Building>,
    pub railways: Vec<Railway>,
    pub rivers: Vec<River>,
}

/// Per-kind counts of records dropped during normalization (§7 data-level
/// errors). Never fatal — a high count simply means a noisy source feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropCounters {
    pub poles: u32,
    pub lines: u32,
    pub transformers: u32,
    pub roads: u32,
    pub buildings: u32,
    pub railways: u32,
    pub rivers: u32,
}

impl DropCounters {
    pub fn total(&self) -> u32 {
        self.poles + self.lines + self.transformers + self.roads + self.buildings + self.railways + self.rivers
    }

    fn increment(&mut self, kind: FeatureKind) {
        match kind {
            FeatureKind::Pole => self.poles += 1,
            FeatureKind::Line => self.lines += 1,
            FeatureKind::Transformer => self.transformers += 1,
            FeatureKind::Road => self.roads += 1,
            FeatureKind::Building => self.buildings += 1,
            FeatureKind::Railway => self.railways += 1,
            FeatureKind::River => self.rivers += 1,
        }
    }

    fn drop_record(&mut self, kind: FeatureKind, reason: FeatureError) {
        debug!(kind = %kind, reason = %reason, "dropping malformed feature record");
        self.increment(kind);
    }
}

// ── Pole pre-pass ───────────────────────────────────────────────────────────

/// Everything about a pole that can be decided before line adjacency is
/// known. Finalized into a [`Pole`] once `has_hv`/`has_lv` are computed.
struct PoleDraft {
    id: PoleId,
    position: Point,
    phase_class: PhaseClass,
    pole_kind_code: String,
    raw_voltage_kv: Option<f64>,
}

/// Normalize a batch of raw records into typed entities plus drop counts.
///
/// Order of operations follows §4.1: poles, lines (including transformer-
/// derived synthetic LV lines), roads, buildings, railways, and rivers are
/// each decoded independently; pole-to-line adjacency and the voltage-class
/// inference that depends on it are computed last.
pub fn normalize_batch(records: &[RawRecord]) -> (NormalizedFeatures, DropCounters) {
    let mut counters = DropCounters::default();

    let pole_drafts = decode_poles(records, &mut counters);
    let known_pole_ids: HashSet<&str> = pole_drafts.iter().map(|p| p.id.as_str()).collect();

    let mut lines = decode_lines(records, &known_pole_ids, &mut counters);
    let transformers = decode_transformers(records, &mut counters);
    lines.extend(synthesize_transformer_lines(&transformers, &pole_drafts));

    let roads = decode_roads(records, &mut counters);
    let buildings = decode_buildings(records, &mut counters);
    let railways = decode_railways(records, &mut counters);
    let rivers = decode_rivers(records, &mut counters);

    let poles = finalize_poles(pole_drafts, &lines);

    let features = NormalizedFeatures { poles, lines, transformers, roads, buildings, railways, rivers };
    (features, counters)
}

// ── Poles ─────────────────────────────────────────────────────────────────────

fn decode_poles(records: &[RawRecord], counters: &mut DropCounters) -> Vec<PoleDraft> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut drafts = Vec::new();

    for rec in records.iter().filter(|r| r.kind == FeatureKind::Pole) {
        let position = match &rec.geometry {
            RawGeometry::Point(p) => *p,
            _ => {
                counters.drop_record(FeatureKind::Pole, FeatureError::MalformedGeometry { kind: FeatureKind::Pole, id: rec.id.clone() });
                continue;
            }
        };

        if !seen_ids.insert(rec.id.clone()) {
            counters.drop_record(FeatureKind::Pole, FeatureError::DuplicateId { kind: FeatureKind::Pole, id: rec.id.clone() });
            continue;
        }

        let raw_phase = rec.field("phase").unwrap_or("");
        let raw_voltage_kv = rec.field("voltage_kv").and_then(|s| s.parse::<f64>().ok()).filter(|v| *v > 0.0);

        drafts.push(PoleDraft {
            id: PoleId::new(rec.id.clone()),
            position,
            phase_class: PhaseClass::decode(raw_phase),
            pole_kind_code: rec.field("pole_form").unwrap_or("").to_string(),
            raw_voltage_kv,
        });
    }

    drafts
}

/// Finalize voltage class using adjacency and emit the immutable [`Pole`]s.
///
/// Per §4.1: a numeric voltage field, if present and positive, is
/// authoritative (HV above 1 kV, LV at or below). Otherwise HV is inferred
/// from a pole-form code marked `"H"` or from an incident HV line.
fn finalize_poles(drafts: Vec<PoleDraft>, lines: &[Line]) -> Vec<Pole> {
    const HV_THRESHOLD_KV: f64 = 1.0;

    let mut has_hv: HashMap<&str, bool> = HashMap::new();
    let mut has_lv: HashMap<&str, bool> = HashMap::new();
    let mut has_hv_three_phase: HashMap<&str, bool> = HashMap::new();

    for line in lines {
        for pole_id in [line.from_pole.as_ref(), line.to_pole.as_ref()].into_iter().flatten() {
            let key = pole_id.as_str();
            match line.line_type {
                LineType::Hv => {
                    has_hv.insert(key, true);
                    if line.is_three_phase() {
                        has_hv_three_phase.insert(key, true);
                    }
                }
                LineType::Lv => {
                    has_lv.insert(key, true);
                }
            }
        }
    }

    drafts
        .into_iter()
        .map(|draft| {
            let key = draft.id.as_str();
            let hv_adjacent = has_hv.get(key).copied().unwrap_or(false);
            let lv_adjacent = has_lv.get(key).copied().unwrap_or(false);
            let hv_three_phase = has_hv_three_phase.get(key).copied().unwrap_or(false);

            let voltage_class = match draft.raw_voltage_kv {
                Some(kv) if kv >= HV_THRESHOLD_KV => VoltageClass::Hv,
                Some(_) => VoltageClass::Lv,
                None if draft.pole_kind_code.eq_ignore_ascii_case("H") => VoltageClass::Hv,
                None if hv_adjacent => VoltageClass::Hv,
                None if lv_adjacent => VoltageClass::Lv,
                None => VoltageClass::Unknown,
            };

            Pole {
                id: draft.id,
                position: draft.position,
                voltage_class,
                phase_class: draft.phase_class,
                pole_kind_code: draft.pole_kind_code,
                has_hv: hv_adjacent,
                has_lv: lv_adjacent,
                has_hv_three_phase: hv_three_phase,
            }
        })
        .collect()
}

// ── Lines ─────────────────────────────────────────────────────────────────────

fn decode_lines(records: &[RawRecord], known_pole_ids: &HashSet<&str>, counters: &mut DropCounters) -> Vec<Line> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut lines = Vec::new();

    for rec in records.iter().filter(|r| r.kind == FeatureKind::Line) {
        let polyline = match &rec.geometry {
            RawGeometry::LineString(pts) if rec.geometry.is_well_formed() => pts.clone(),
            _ => {
                counters.drop_record(FeatureKind::Line, FeatureError::MalformedGeometry { kind: FeatureKind::Line, id: rec.id.clone() });
                continue;
            }
        };

        if !seen_ids.insert(rec.id.clone()) {
            counters.drop_record(FeatureKind::Line, FeatureError::DuplicateId { kind: FeatureKind::Line, id: rec.id.clone() });
            continue;
        }

        let Some(line_type) = decode_line_type(rec.field("line_type")) else {
            counters.drop_record(
                FeatureKind::Line,
                FeatureError::MissingField { kind: FeatureKind::Line, id: rec.id.clone(), field: "line_type" },
            );
            continue;
        };

        let from_pole = match resolve_pole_ref(rec, "from_pole", known_pole_ids) {
            Ok(id) => id,
            Err(e) => {
                counters.drop_record(FeatureKind::Line, e);
                continue;
            }
        };
        let to_pole = match resolve_pole_ref(rec, "to_pole", known_pole_ids) {
            Ok(id) => id,
            Err(e) => {
                counters.drop_record(FeatureKind::Line, e);
                continue;
            }
        };

        let phase_class = PhaseClass::decode(rec.field("phase").unwrap_or(""));
        let wire_spec = decode_wire_spec(rec.field("conductor"), rec.field("cross_section"));
        let voltage_value_kv = rec.field("voltage_kv").and_then(|s| s.parse::<f64>().ok());

        lines.push(Line {
            id: LineId::new(rec.id.clone()),
            polyline,
            from_pole,
            to_pole,
            line_type,
            phase_class,
            wire_spec,
            voltage_value_kv,
        });
    }

    lines
}

fn decode_line_type(raw: Option<&str>) -> Option<LineType> {
    match raw.map(str::to_ascii_uppercase).as_deref() {
        Some("HV") => Some(LineType::Hv),
        Some("LV") => Some(LineType::Lv),
        _ => None,
    }
}

fn resolve_pole_ref(rec: &RawRecord, field: &'static str, known_pole_ids: &HashSet<&str>) -> Result<Option<PoleId>, FeatureError> {
    match rec.field(field) {
        None => Ok(None),
        Some(raw_id) if known_pole_ids.contains(raw_id) => Ok(Some(PoleId::from(raw_id))),
        Some(raw_id) => Err(FeatureError::DanglingPoleRef {
            kind: FeatureKind::Line,
            id: rec.id.clone(),
            pole_id: raw_id.to_string(),
        }),
    }
}

/// Combine a conductor-kind code (`OW`, `ACSR`, `DV`, ...) and a
/// cross-section code (`32`, `58`, `95`, `160`, ...) into the canonical
/// `wire_spec` string used throughout cost and voltage-drop lookups.
///
/// Idempotent: re-decoding an already-canonical `"ACSR-95"` string by
/// splitting on `-` and re-joining yields itself, so calling this function on
/// its own output is a no-op (§4.1 idempotence).
pub fn decode_wire_spec(conductor: Option<&str>, cross_section: Option<&str>) -> String {
    let conductor = conductor.map(str::to_ascii_uppercase).unwrap_or_else(|| "UNK".to_string());
    let cross_section = cross_section.unwrap_or("0");
    format!("{conductor}-{cross_section}")
}

// ── Transformers ──────────────────────────────────────────────────────────────

fn decode_transformers(records: &[RawRecord], counters: &mut DropCounters) -> Vec<Transformer> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut transformers = Vec::new();

    for rec in records.iter().filter(|r| r.kind == FeatureKind::Transformer) {
        let position = match &rec.geometry {
            RawGeometry::Point(p) => *p,
            _ => {
                counters.drop_record(FeatureKind::Transformer, FeatureError::MalformedGeometry { kind: FeatureKind::Transformer, id: rec.id.clone() });
                continue;
            }
        };

        if !seen_ids.insert(rec.id.clone()) {
            counters.drop_record(FeatureKind::Transformer, FeatureError::DuplicateId { kind: FeatureKind::Transformer, id: rec.id.clone() });
            continue;
        }

        transformers.push(Transformer {
            id: TransformerId::new(rec.id.clone()),
            position,
            capacity_kva: rec.field("capacity_kva").and_then(|s| s.parse::<f64>().ok()),
            annotation: rec.field("annotation").map(str::to_string),
            connected_pole_hint: rec.field("connected_pole").map(str::to_string),
        });
    }

    transformers
}

/// Emit a synthetic LV [`Line`] for each transformer whose annotation
/// carries the overhead-wire marker and whose raw record names a connected
/// pole (`connected_pole` field) that survived pole decoding. Transformers
/// with no marker, or no resolvable connected pole, contribute no line.
fn synthesize_transformer_lines(transformers: &[Transformer], pole_drafts: &[PoleDraft]) -> Vec<Line> {
    let pole_positions: HashMap<&str, Point> = pole_drafts.iter().map(|p| (p.id.as_str(), p.position)).collect();

    transformers
        .iter()
        .filter_map(|xf| {
            let annotation = xf.annotation.as_deref()?;
            if !annotation_has_marker(annotation, OVERHEAD_WIRE_MARKER) {
                return None;
            }
            let connected = xf.connected_pole_hint.as_deref()?;
            let &pole_pos = pole_positions.get(connected)?;
            if pole_pos.distance_m(xf.position) < 1e-9 {
                return None;
            }

            Some(Line {
                id: LineId::new(format!("XF-{}", xf.id.as_str())),
                polyline: vec![xf.position, pole_pos],
                from_pole: None,
                to_pole: Some(PoleId::from(connected)),
                line_type: LineType::Lv,
                phase_class: PhaseClass::Unknown,
                wire_spec: decode_wire_spec(Some(OVERHEAD_WIRE_MARKER), None),
                voltage_value_kv: None,
            })
        })
        .collect()
}

fn annotation_has_marker(annotation: &str, marker: &str) -> bool {
    annotation.split(|c: char| !c.is_ascii_alphanumeric()).any(|tok| tok.eq_ignore_ascii_case(marker))
}

// ── Roads / buildings / railways / rivers ────────────────────────────────────

fn decode_roads(records: &[RawRecord], counters: &mut DropCounters) -> Vec<Road> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut roads = Vec::new();

    for rec in records.iter().filter(|r| r.kind == FeatureKind::Road) {
        let polyline = match &rec.geometry {
            RawGeometry::LineString(pts) if rec.geometry.is_well_formed() => pts.clone(),
            _ => {
                counters.drop_record(FeatureKind::Road, FeatureError::MalformedGeometry { kind: FeatureKind::Road, id: rec.id.clone() });
                continue;
            }
        };
        if !seen_ids.insert(rec.id.clone()) {
            counters.drop_record(FeatureKind::Road, FeatureError::DuplicateId { kind: FeatureKind::Road, id: rec.id.clone() });
            continue;
        }
        roads.push(Road {
            id: RoadId::new(rec.id.clone()),
            polyline,
            classification: rec.field("classification").unwrap_or("unknown").to_string(),
        });
    }

    roads
}

fn decode_buildings(records: &[RawRecord], counters: &mut DropCounters) -> Vec<Building> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut buildings = Vec::new();

    for rec in records.iter().filter(|r| r.kind == FeatureKind::Building) {
        let ring = match &rec.geometry {
            RawGeometry::Polygon(pts) if rec.geometry.is_well_formed() => pts.clone(),
            _ => {
                counters.drop_record(FeatureKind::Building, FeatureError::MalformedGeometry { kind: FeatureKind::Building, id: rec.id.clone() });
                continue;
            }
        };
        if !seen_ids.insert(rec.id.clone()) {
            counters.drop_record(FeatureKind::Building, FeatureError::DuplicateId { kind: FeatureKind::Building, id: rec.id.clone() });
            continue;
        }
        buildings.push(Building { id: BuildingId::new(rec.id.clone()), ring });
    }

    buildings
}

fn decode_railways(records: &[RawRecord], counters: &mut DropCounters) -> Vec<Railway> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut railways = Vec::new();

    for rec in records.iter().filter(|r| r.kind == FeatureKind::Railway) {
        let polyline = match &rec.geometry {
            RawGeometry::LineString(pts) if rec.geometry.is_well_formed() => pts.clone(),
            _ => {
                counters.drop_record(FeatureKind::Railway, FeatureError::MalformedGeometry { kind: FeatureKind::Railway, id: rec.id.clone() });
                continue;
            }
        };
        if !seen_ids.insert(rec.id.clone()) {
            counters.drop_record(FeatureKind::Railway, FeatureError::DuplicateId { kind: FeatureKind::Railway, id: rec.id.clone() });
            continue;
        }
        railways.push(Railway { id: RailwayId::new(rec.id.clone()), polyline });
    }

    railways
}

fn decode_rivers(records: &[RawRecord], counters: &mut DropCounters) -> Vec<River> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut rivers = Vec::new();

    for rec in records.iter().filter(|r| r.kind == FeatureKind::River) {
        let polyline = match &rec.geometry {
            RawGeometry::LineString(pts) if rec.geometry.is_well_formed() => pts.clone(),
            _ => {
                counters.drop_record(FeatureKind::River, FeatureError::MalformedGeometry { kind: FeatureKind::River, id: rec.id.clone() });
                continue;
            }
        };
        if !seen_ids.insert(rec.id.clone()) {
            counters.drop_record(FeatureKind::River, FeatureError::DuplicateId { kind: FeatureKind::River, id: rec.id.clone() });
            continue;
        }
        rivers.push(River { id: RiverId::new(rec.id.clone()), polyline });
    }

    rivers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawGeometry;

    fn pole_rec(id: &str, pos: Point, phase: &str, pole_form: &str) -> RawRecord {
        RawRecord::new(FeatureKind::Pole, id, RawGeometry::Point(pos)).with_field("phase", phase).with_field("pole_form", pole_form)
    }

    fn line_rec(id: &str, pts: Vec<Point>, line_type: &str, phase: &str, from: &str, to: &str) -> RawRecord {
        RawRecord::new(FeatureKind::Line, id, RawGeometry::LineString(pts))
            .with_field("line_type", line_type)
            .with_field("phase", phase)
            .with_field("from_pole", from)
            .with_field("to_pole", to)
            .with_field("conductor", "ACSR")
            .with_field("cross_section", "95")
    }

    #[test]
    fn decodes_pole_and_adjacency() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(100.0, 0.0);
        let records = vec![
            pole_rec("P1", p1, "ABC", ""),
            pole_rec("P2", p2, "A", ""),
            line_rec("L1", vec![p1, p2], "HV", "ABC", "P1", "P2"),
        ];

        let (features, counters) = normalize_batch(&records);
        assert_eq!(counters.total(), 0);
        assert_eq!(features.poles.len(), 2);
        assert_eq!(features.lines.len(), 1);

        let pole1 = features.poles.iter().find(|p| p.id.as_str() == "P1").unwrap();
        assert!(pole1.has_hv);
        assert!(pole1.has_hv_three_phase);
        assert_eq!(pole1.voltage_class, VoltageClass::Hv);
    }

    #[test]
    fn drops_zero_length_line() {
        let p1 = Point::new(0.0, 0.0);
        let records = vec![line_rec("L1", vec![p1, p1], "HV", "ABC", "", "")];
        let (features, counters) = normalize_batch(&records);
        assert!(features.lines.is_empty());
        assert_eq!(counters.lines, 1);
    }

    #[test]
    fn drops_line_with_dangling_pole_ref() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(10.0, 0.0);
        let records = vec![line_rec("L1", vec![p1, p2], "HV", "A", "GHOST", "")];
        let (features, counters) = normalize_batch(&records);
        assert!(features.lines.is_empty());
        assert_eq!(counters.lines, 1);
    }

    #[test]
    fn drops_duplicate_pole_id() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(1.0, 1.0);
        let records = vec![pole_rec("P1", p1, "A", ""), pole_rec("P1", p2, "A", "")];
        let (features, counters) = normalize_batch(&records);
        assert_eq!(features.poles.len(), 1);
        assert_eq!(counters.poles, 1);
    }

    #[test]
    fn wire_spec_decode_is_idempotent_on_its_own_output() {
        let once = decode_wire_spec(Some("acsr"), Some("95"));
        assert_eq!(once, "ACSR-95");
        let (conductor, cross) = once.split_once('-').unwrap();
        let twice = decode_wire_spec(Some(conductor), Some(cross));
        assert_eq!(once, twice);
    }

    #[test]
    fn pole_voltage_inferred_from_form_code_without_numeric_field() {
        let p1 = Point::new(0.0, 0.0);
        let records = vec![pole_rec("P1", p1, "A", "H")];
        let (features, _) = normalize_batch(&records);
        assert_eq!(features.poles[0].voltage_class, VoltageClass::Hv);
    }

    #[test]
    fn numeric_voltage_field_is_authoritative_over_form_code() {
        let p1 = Point::new(0.0, 0.0);
        let rec = pole_rec("P1", p1, "A", "H").with_field("voltage_kv", "0.22");
        let (features, _) = normalize_batch(&[rec]);
        assert_eq!(features.poles[0].voltage_class, VoltageClass::Lv);
    }
}
