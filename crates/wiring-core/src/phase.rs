//! Phase and voltage classification enums shared across every pipeline stage.
//!
//! All variants are always compiled in (no per-variant feature flags), and
//! every enum carries an explicit `Unknown` case rather than silently
//! defaulting — unknown classification must propagate to derived fields
//! instead of being guessed away (§4.1, §9).

/// The electrical phase class of a pole, line, or request.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PhaseClass {
    /// Single-phase service.
    Single,
    /// Three-phase service.
    Three,
    /// Raw code did not decode to a known phase.
    #[default]
    Unknown,
}

impl PhaseClass {
    /// Decode a raw phase code such as `"ABC"`, `"CBA"`, `"A"`, `"R"`.
    ///
    /// Case-insensitive. Multi-letter combinations containing all three of
    /// {A,B,C} decode to `Three`; any single-letter code decodes to
    /// `Single`; anything else decodes to `Unknown`.
    pub fn decode(raw: &str) -> Self {
        let upper = raw.to_ascii_uppercase();
        let letters: Vec<char> = upper.chars().filter(|c| c.is_ascii_alphabetic()).collect();

        let has_a = letters.contains(&'A');
        let has_b = letters.contains(&'B');
        let has_c = letters.contains(&'C');

        if has_a && has_b && has_c {
            PhaseClass::Three
        } else if letters.len() == 1 {
            PhaseClass::Single
        } else {
            PhaseClass::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseClass::Single => "SINGLE",
            PhaseClass::Three => "THREE",
            PhaseClass::Unknown => "UNKNOWN",
        }
    }

    /// Nominal phase count used by the cost/voltage-drop models: 1 or 3.
    /// `Unknown` is treated as single-phase for that purpose, matching the
    /// conservative default the rest of the pipeline uses for derived
    /// fields of unknown poles.
    pub fn phase_count(self) -> u8 {
        match self {
            PhaseClass::Three => 3,
            PhaseClass::Single | PhaseClass::Unknown => 1,
        }
    }
}

impl std::fmt::Display for PhaseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The phase a caller requests service on (§6). Unlike [`PhaseClass`], a
/// request never carries an `Unknown` case — the caller must say which.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RequestPhase {
    Single,
    Three,
}

impl RequestPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestPhase::Single => "SINGLE",
            RequestPhase::Three => "THREE",
        }
    }

    pub fn phase_count(self) -> u8 {
        match self {
            RequestPhase::Single => 1,
            RequestPhase::Three => 3,
        }
    }
}

impl std::fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The voltage classification of a pole or line.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum VoltageClass {
    /// High voltage (medium/primary distribution).
    Hv,
    /// Low voltage (secondary distribution).
    Lv,
    /// Could not be determined from the raw feature.
    #[default]
    Unknown,
}

impl VoltageClass {
    pub fn as_str(self) -> &'static str {
        match self {
            VoltageClass::Hv => "HV",
            VoltageClass::Lv => "LV",
            VoltageClass::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for VoltageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The voltage classification of a `Line`, independent of `VoltageClass` so
/// that pole and line classification can diverge (e.g. a pole annotated HV
/// may still carry a derived LV spur).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineType {
    Hv,
    Lv,
}

impl LineType {
    pub fn as_str(self) -> &'static str {
        match self {
            LineType::Hv => "HV",
            LineType::Lv => "LV",
        }
    }
}

impl std::fmt::Display for LineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_three_phase_any_order() {
        assert_eq!(PhaseClass::decode("ABC"), PhaseClass::Three);
        assert_eq!(PhaseClass::decode("CBA"), PhaseClass::Three);
        assert_eq!(PhaseClass::decode("bca"), PhaseClass::Three);
    }

    #[test]
    fn decode_single_letter() {
        assert_eq!(PhaseClass::decode("A"), PhaseClass::Single);
        assert_eq!(PhaseClass::decode("b"), PhaseClass::Single);
        assert_eq!(PhaseClass::decode("R"), PhaseClass::Single);
    }

    #[test]
    fn decode_unknown() {
        assert_eq!(PhaseClass::decode("AB"), PhaseClass::Unknown);
        assert_eq!(PhaseClass::decode(""), PhaseClass::Unknown);
        assert_eq!(PhaseClass::decode("XYZ"), PhaseClass::Unknown);
    }

    #[test]
    fn phase_count() {
        assert_eq!(PhaseClass::Three.phase_count(), 3);
        assert_eq!(PhaseClass::Single.phase_count(), 1);
        assert_eq!(PhaseClass::Unknown.phase_count(), 1);
    }
}
