//! Orchestrator error type.
//!
//! A `thiserror`-derived enum with `#[from]` conversions from the sub-crates
//! it drives. Most of this enum's cases are never constructed directly —
//! they exist so `?` can convert a sub-crate's data-level error into
//! something the orchestrator can log, while request-level outcomes (§7)
//! flow through [`crate::Outcome`] instead of `Result::Err`.

use thiserror::Error;

use wiring_design::DesignError;
use wiring_spatial::SpatialError;

/// Failures that are bugs, not expected request outcomes (§7 "internal
/// invariant violations"). The orchestrator maps these to
/// `Outcome::InternalError` with a correlation id rather than unwinding.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("road graph build error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("pole allocation error: {0}")]
    Design(#[from] DesignError),
}

pub type SimResult<T> = Result<T, SimError>;
