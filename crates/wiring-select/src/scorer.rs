//! Priority scoring (§4.3) — a pre-pathfinding tie-break ordering, not a
//! cost. Split out from [`crate::selector`] so the scoring formula can
//! change independently of the filtering/selection logic, even though this
//! formula is a plain sum of a base distance term and fixed bonuses/
//! penalties rather than a weighted multi-factor model.

use wiring_core::RequestPhase;

/// Lower is better. `base` is the integer floor of the Euclidean distance to
/// the consumer; phase-specific adjustments favor poles already wired for
/// the requested service class.
pub fn priority(phase: RequestPhase, has_lv: bool, has_hv: bool, has_hv_three_phase: bool, distance_m: f64) -> i64 {
    let base = distance_m.floor() as i64;
    let adjustment = match phase {
        RequestPhase::Single => {
            if has_lv {
                -100
            } else if has_hv {
                50
            } else {
                0
            }
        }
        RequestPhase::Three => {
            if has_hv_three_phase {
                -100
            } else if has_hv {
                -50
            } else {
                0
            }
        }
    };
    base + adjustment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_phase_prefers_lv() {
        let lv = priority(RequestPhase::Single, true, false, false, 100.0);
        let hv_only = priority(RequestPhase::Single, false, true, false, 100.0);
        let neither = priority(RequestPhase::Single, false, false, false, 100.0);
        assert!(lv < neither);
        assert!(neither < hv_only);
    }

    #[test]
    fn three_phase_prefers_hv_three_phase() {
        let three = priority(RequestPhase::Three, false, true, true, 100.0);
        let hv_only = priority(RequestPhase::Three, false, true, false, 100.0);
        let neither = priority(RequestPhase::Three, false, false, false, 100.0);
        assert!(three < hv_only);
        assert!(hv_only < neither);
    }

    #[test]
    fn base_is_floor_of_distance() {
        assert_eq!(priority(RequestPhase::Single, false, false, false, 99.9), 99);
    }
}
