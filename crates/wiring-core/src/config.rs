//! Design pipeline configuration.
//!
//! All tunable constants for one run live in a single plain data struct,
//! constructible directly or loaded from a TOML/JSON file by the
//! application crate — this crate does not mandate a format.

use std::time::Duration;

/// Tunable constants for one design pipeline run.
///
/// `Default` matches the documented default table. Callers override only
/// the fields they need, e.g. a rural deployment widening `max_distance_m`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DesignConfig {
    /// Hard cap on consumer → source routed distance, in metres.
    pub max_distance_m: f64,
    /// Direct-segment eligibility radius, in metres.
    pub fast_track_limit_m: f64,
    /// Target new-pole spacing, in metres.
    pub pole_interval_m: f64,
    /// Amortised per-pole cost share folded into edge weight (same units as
    /// length, so the weight stays in metres-equivalent terms).
    pub pole_cost_share_m: f64,
    /// Road-endpoint merge distance, in metres.
    pub snap_tolerance_m: f64,
    /// Consumer/pole → road max perpendicular attach distance, in metres.
    pub max_attach_m: f64,
    /// Building-avoidance slide budget, in metres.
    pub pole_nudge_m: f64,
    /// Truncation of the ranked route output.
    pub max_routes: usize,
    /// LV voltage-drop acceptance limit, percent.
    pub limit_vd_lv_percent: f64,
    /// HV voltage-drop acceptance limit, percent.
    pub limit_vd_hv_percent: f64,
    /// Overhead multiplier applied to material + labor.
    pub overhead_rate: f64,
    /// Profit multiplier applied to material + labor + overhead.
    pub profit_rate: f64,
    /// Per-request wall-clock deadline.
    pub request_timeout: Duration,
    /// Assumed per-phase load (kW) when the caller supplies none, SINGLE phase.
    pub default_load_kw_single: f64,
    /// Assumed per-phase load (kW) when the caller supplies none, THREE phase.
    pub default_load_kw_three: f64,
    /// Coordinate quantization grain used for road-graph node identity, in
    /// metres.
    pub node_quant_epsilon_m: f64,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            max_distance_m: 400.0,
            fast_track_limit_m: 50.0,
            pole_interval_m: 40.0,
            pole_cost_share_m: 8.0,
            snap_tolerance_m: 10.0,
            max_attach_m: 100.0,
            pole_nudge_m: 5.0,
            max_routes: 10,
            limit_vd_lv_percent: 6.0,
            limit_vd_hv_percent: 3.0,
            overhead_rate: 0.05,
            profit_rate: 0.05,
            request_timeout: Duration::from_secs(60),
            default_load_kw_single: 5.0,
            default_load_kw_three: 15.0,
            node_quant_epsilon_m: 0.01,
        }
    }
}

impl DesignConfig {
    /// The voltage-drop acceptance limit (percent) for the given voltage class.
    pub fn vd_limit_percent(&self, is_hv: bool) -> f64 {
        if is_hv {
            self.limit_vd_hv_percent
        } else {
            self.limit_vd_lv_percent
        }
    }

    /// The default assumed load (kW) for the given phase count (1 or 3).
    pub fn default_load_kw(&self, phase_count: u8) -> f64 {
        if phase_count >= 3 {
            self.default_load_kw_three
        } else {
            self.default_load_kw_single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        let cfg = DesignConfig::default();
        assert_eq!(cfg.max_distance_m, 400.0);
        assert_eq!(cfg.fast_track_limit_m, 50.0);
        assert_eq!(cfg.pole_interval_m, 40.0);
        assert_eq!(cfg.snap_tolerance_m, 10.0);
        assert_eq!(cfg.max_attach_m, 100.0);
        assert_eq!(cfg.pole_nudge_m, 5.0);
        assert_eq!(cfg.max_routes, 10);
        assert_eq!(cfg.limit_vd_lv_percent, 6.0);
        assert_eq!(cfg.limit_vd_hv_percent, 3.0);
        assert_eq!(cfg.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn vd_limit_selects_by_class() {
        let cfg = DesignConfig::default();
        assert_eq!(cfg.vd_limit_percent(true), 3.0);
        assert_eq!(cfg.vd_limit_percent(false), 6.0);
    }

    #[test]
    fn default_load_selects_by_phase_count() {
        let cfg = DesignConfig::default();
        assert_eq!(cfg.default_load_kw(1), 5.0);
        assert_eq!(cfg.default_load_kw(3), 15.0);
    }
}
