//! Orchestrator progress/diagnostics callbacks.
//!
//! A trait of no-op-default methods invoked at key points in the pipeline's
//! own stage boundaries (S1-S10), plus a `NoopObserver` for callers that
//! only want the return value.

use wiring_core::PoleId;
use wiring_features::DropCounters;

use crate::response::Outcome;

/// Callbacks invoked by [`crate::orchestrator::design`] at stage boundaries.
///
/// All methods have default no-op implementations; override only what you
/// need (progress bars, metrics, ad-hoc logging beyond the `tracing` events
/// the orchestrator already emits).
pub trait DesignObserver {
    /// After S1 normalization.
    fn on_normalized(&mut self, _dropped: &DropCounters) {}

    /// After S3 candidate selection succeeds.
    fn on_candidates_selected(&mut self, _count: usize) {}

    /// After S4 road graph construction and attachment.
    fn on_graph_built(&mut self, _node_count: usize, _edge_count: usize) {}

    /// A candidate was considered and dropped before contributing a route.
    fn on_candidate_rejected(&mut self, _pole_id: &PoleId, _reason: &str) {}

    /// A candidate yielded an accepted, priced route.
    fn on_candidate_accepted(&mut self, _pole_id: &PoleId) {}

    /// Called once with the final status before the response is returned.
    fn on_request_end(&mut self, _status: Outcome) {}
}

/// A [`DesignObserver`] that does nothing.
pub struct NoopObserver;

impl DesignObserver for NoopObserver {}
