//! Voltage drop calculation (S9, §4.9). Plain per-conductor arithmetic.

use wiring_core::DesignConfig;

/// Nominal line voltage, volts, for LV-single, LV-three, and HV service.
const NOMINAL_V_LV_SINGLE: f64 = 220.0;
const NOMINAL_V_LV_THREE: f64 = 380.0;
const NOMINAL_V_HV: f64 = 22_900.0;

/// Result of §4.9's drop calculation for one accepted route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoltageDrop {
    pub distance_m: f64,
    pub load_kw: f64,
    pub voltage_drop_v: f64,
    pub voltage_drop_percent: f64,
    pub is_acceptable: bool,
    pub limit_percent: f64,
    pub wire_spec: String,
}

fn nominal_voltage_v(is_hv: bool, phase_count: u8) -> f64 {
    if is_hv {
        NOMINAL_V_HV
    } else if phase_count >= 3 {
        NOMINAL_V_LV_THREE
    } else {
        NOMINAL_V_LV_SINGLE
    }
}

fn phase_factor(phase_count: u8) -> f64 {
    if phase_count >= 3 {
        3f64.sqrt()
    } else {
        1.0
    }
}

/// Conductor resistance, ohms per km, keyed by the cross-section code
/// embedded in `wire_spec` (e.g. `"ACSR-95"`). Unrecognised codes fall back
/// to the mid-range `58` figure rather than panicking.
fn resistance_ohm_per_km(wire_spec: &str) -> f64 {
    let cross_section = wire_spec.rsplit('-').next().unwrap_or("");
    match cross_section {
        "32" => 1.093,
        "58" => 0.611,
        "95" => 0.361,
        "160" => 0.214,
        _ => 0.611,
    }
}

/// `K(wire_spec)`: resistance × 2 for single-phase return, resistance × √3
/// for three-phase (§4.9).
fn wire_k(wire_spec: &str, phase_count: u8) -> f64 {
    let r_per_m = resistance_ohm_per_km(wire_spec) / 1_000.0;
    let multiplier = if phase_count >= 3 { 3f64.sqrt() } else { 2.0 };
    r_per_m * multiplier
}

/// Evaluate voltage drop for `path_length_m` at `load_kw` over `wire_spec`,
/// sourced from a pole of the given voltage/phase class.
pub fn compute_voltage_drop(path_length_m: f64, load_kw: f64, wire_spec: &str, is_hv: bool, phase_count: u8, config: &DesignConfig) -> VoltageDrop {
    let nominal_v = nominal_voltage_v(is_hv, phase_count);
    let load_a = load_kw * 1_000.0 / (nominal_v * phase_factor(phase_count));
    let k = wire_k(wire_spec, phase_count);
    let drop_v = k * load_a * path_length_m;
    let drop_percent = drop_v / nominal_v * 100.0;
    let limit_percent = config.vd_limit_percent(is_hv);

    VoltageDrop {
        distance_m: path_length_m,
        load_kw,
        voltage_drop_v: drop_v,
        voltage_drop_percent: drop_percent,
        is_acceptable: drop_percent <= limit_percent,
        limit_percent,
        wire_spec: wire_spec.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_distance_increases_drop() {
        let config = DesignConfig::default();
        let near = compute_voltage_drop(40.0, 5.0, "ACSR-58", false, 1, &config);
        let far = compute_voltage_drop(400.0, 5.0, "ACSR-58", false, 1, &config);
        assert!(far.voltage_drop_percent > near.voltage_drop_percent);
    }

    #[test]
    fn hv_uses_hv_nominal_voltage_and_tighter_limit() {
        let config = DesignConfig::default();
        let drop = compute_voltage_drop(400.0, 15.0, "ACSR-95", true, 3, &config);
        assert_eq!(drop.limit_percent, 3.0);
    }

    #[test]
    fn lv_three_phase_uses_380v_nominal() {
        let config = DesignConfig::default();
        // At 380V nominal a given load produces less drop-percent than at 220V.
        let three = compute_voltage_drop(100.0, 10.0, "ACSR-58", false, 3, &config);
        let single = compute_voltage_drop(100.0, 10.0, "ACSR-58", false, 1, &config);
        assert!(three.voltage_drop_percent < single.voltage_drop_percent);
    }

    #[test]
    fn unacceptable_drop_is_flagged_not_removed() {
        let config = DesignConfig::default();
        let drop = compute_voltage_drop(400.0, 50.0, "ACSR-32", false, 1, &config);
        assert!(!drop.is_acceptable);
        assert!(drop.voltage_drop_percent > drop.limit_percent);
    }
}
