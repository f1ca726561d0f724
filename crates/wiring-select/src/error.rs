//! Selection-subsystem error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectError {
    /// No pole survived phase matching and the radius filter (§4.3).
    /// The orchestrator maps this to the `NoCandidate` status.
    #[error("no candidate pole within range matches the requested phase")]
    NoCandidate,
}

pub type SelectResult<T> = Result<T, SelectError>;
