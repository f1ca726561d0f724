//! Orchestrator output (§6 "Output from the core", §7, §4.11).

use wiring_core::{Point, PoleId};
use wiring_design::RouteResult;
use wiring_features::DropCounters;

/// The single status the orchestrator emits per request (§4.11, §7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// `1 <= routes.len() <= MAX_ROUTES`.
    Success,
    /// §4.3 returned no candidate pole.
    NoCandidate,
    /// §4.4 could not attach the consumer to the road graph.
    NoRoadAccess,
    /// No candidate yielded an accepted path (crossing rejection, building
    /// avoidance failure, or the graph simply has no path to any candidate).
    NoRoute,
    /// Every reachable candidate's routed path exceeded `MAX_DISTANCE`.
    OverDistance,
    /// The per-request wall-clock deadline (§5) was exceeded.
    Timeout,
    /// The caller's cancellation signal was observed at a stage boundary.
    Cancelled,
    /// An internal invariant was violated — a bug, not an expected outcome.
    InternalError,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::NoCandidate => "NoCandidate",
            Outcome::NoRoadAccess => "NoRoadAccess",
            Outcome::NoRoute => "NoRoute",
            Outcome::OverDistance => "OverDistance",
            Outcome::Timeout => "Timeout",
            Outcome::Cancelled => "Cancelled",
            Outcome::InternalError => "InternalError",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why one candidate pole was dropped before or during pathfinding —
/// surfaced in [`Diagnostics::rejected_candidates`] (E4's "rejected
/// candidates appear in diagnostics with their crossed line ids").
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectedCandidate {
    pub pole_id: PoleId,
    pub reason: String,
}

/// Diagnostics aggregated across the whole request (§4.11, §7, §10.4).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Per-kind counts of raw records dropped during normalization (§4.1).
    pub dropped: DropCounters,
    /// Candidates considered but not accepted, with the reason.
    pub rejected_candidates: Vec<RejectedCandidate>,
}

/// The full response of one design request (§6).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignResponse {
    pub status: Outcome,
    pub request_spec: String,
    pub consumer_coord: Point,
    pub routes: Vec<RouteResult>,
    pub processing_time_ms: u64,
    pub diagnostics: Diagnostics,
    pub error_message: Option<String>,
}
