//! Orchestrator input (§6 "Input to the core").

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use wiring_core::{Point, RequestPhase};
use wiring_features::RawRecord;

/// One design request: a consumer coordinate, a requested phase, the raw
/// feature batch to normalize, and optional cooperative-cancellation /
/// load override knobs.
pub struct DesignRequest {
    pub consumer: Point,
    pub phase: RequestPhase,
    /// Raw feature records across all kinds (poles, lines, transformers,
    /// roads, buildings, railways, rivers) — §4.1 decodes these by kind.
    pub features: Vec<RawRecord>,
    /// Explicit load (kW) for §4.9's voltage-drop calculation. `None` uses
    /// `DesignConfig::default_load_kw`.
    pub load_kw: Option<f64>,
    /// Checked at stage boundaries (§5); if set, the orchestrator discards
    /// partial work and returns `Outcome::Cancelled`.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl DesignRequest {
    pub fn new(consumer: Point, phase: RequestPhase, features: Vec<RawRecord>) -> Self {
        Self { consumer, phase, features, load_kw: None, cancel: None }
    }

    pub fn with_load_kw(mut self, load_kw: f64) -> Self {
        self.load_kw = Some(load_kw);
        self
    }

    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|c| c.load(std::sync::atomic::Ordering::Relaxed))
    }

    pub(crate) fn check_cancelled(&self) -> bool {
        self.is_cancelled()
    }
}
