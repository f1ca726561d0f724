//! `RouteResult` — the per-candidate output record assembled by the
//! orchestrator from S7-S9 and ordered by S10 (§6).

use wiring_core::{Point, PoleId, VoltageClass};

use crate::vdrop::VoltageDrop;

/// One ranked, fully priced wiring route. Assembled by the orchestrator from
/// [`crate::alloc::allocate_new_poles`], [`crate::cost::estimate_cost`], and
/// [`crate::vdrop::compute_voltage_drop`]; `rank` is filled in by
/// [`crate::rank::rank_routes`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// 1-based rank among the accepted routes for this request. `0` until
    /// [`crate::rank::rank_routes`] assigns it.
    pub rank: usize,
    pub total_cost: f64,
    pub cost_index: i64,
    pub total_distance: f64,
    pub start_pole_id: PoleId,
    pub start_pole_coord: Point,
    pub new_poles_count: usize,
    pub path_coordinates: Vec<Point>,
    pub new_pole_coordinates: Vec<Point>,
    pub wire_cost: f64,
    pub pole_cost: f64,
    pub labor_cost: f64,
    pub overhead_cost: f64,
    pub profit_cost: f64,
    pub pole_spec: String,
    pub wire_spec: String,
    pub source_voltage_type: VoltageClass,
    pub source_phase_type: u8,
    pub voltage_drop: VoltageDrop,
}
