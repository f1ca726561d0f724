//! Candidate filtering and ordering (S3, §4.3).
//!
//! A filter/select pass feeding a separately scored and sorted list: phase
//! match and radius filtering happen here, while the tie-break scoring
//! itself lives in [`crate::scorer`].

use tracing::debug;

use wiring_core::{DesignConfig, Point, PoleId, RequestPhase};
use wiring_features::Pole;

use crate::error::SelectError;
use crate::scorer::priority;

/// A pole considered as a possible source for one request.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub pole_id: PoleId,
    pub position: Point,
    pub distance_m: f64,
    pub is_fast_track: bool,
    pub has_hv: bool,
    pub has_lv: bool,
    pub has_hv_three_phase: bool,
    pub priority: i64,
}

/// Phase-match, radius-filter, fast-track-flag, and priority-sort every pole
/// against one consumer coordinate and requested phase.
///
/// Returns [`SelectError::NoCandidate`] if nothing survives filtering — the
/// orchestrator maps that directly to the `NoCandidate` status (§4.11).
pub fn select_candidates(
    poles: &[Pole],
    consumer: Point,
    phase: RequestPhase,
    config: &DesignConfig,
) -> Result<Vec<Candidate>, SelectError> {
    let mut phase_rejected = 0u32;
    let mut radius_rejected = 0u32;

    let mut candidates: Vec<Candidate> = poles
        .iter()
        .filter(|p| {
            let matches = match phase {
                RequestPhase::Three => p.has_hv_three_phase,
                RequestPhase::Single => p.has_lv || p.has_hv,
            };
            if !matches {
                phase_rejected += 1;
            }
            matches
        })
        .filter_map(|p| {
            let distance_m = consumer.distance_m(p.position);
            if distance_m > config.max_distance_m {
                radius_rejected += 1;
                return None;
            }
            Some(Candidate {
                pole_id: p.id.clone(),
                position: p.position,
                distance_m,
                is_fast_track: distance_m <= config.fast_track_limit_m,
                has_hv: p.has_hv,
                has_lv: p.has_lv,
                has_hv_three_phase: p.has_hv_three_phase,
                priority: priority(phase, p.has_lv, p.has_hv, p.has_hv_three_phase, distance_m),
            })
        })
        .collect();

    debug!(
        phase = %phase,
        total_poles = poles.len(),
        phase_rejected,
        radius_rejected,
        surviving = candidates.len(),
        "candidate selection complete"
    );

    if candidates.is_empty() {
        return Err(SelectError::NoCandidate);
    }

    candidates.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.distance_m.total_cmp(&b.distance_m)));
    Ok(candidates)
}
