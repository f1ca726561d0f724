//! Design-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DesignError {
    /// A new-pole position fell strictly inside a building polygon and no
    /// slide within `pole_nudge_m` cleared it (§4.7 avoidance).
    #[error("new pole at arc-length {arc_len_m:.2} m could not clear a building within the nudge budget")]
    BuildingBlocked { arc_len_m: f64 },
}

pub type DesignResult<T> = Result<T, DesignError>;
