//! Shared error type.
//!
//! Sub-crates define their own error enums scoped to their own concerns
//! (`FeatureError`, `SpatialError`, `SelectError`, `DesignError`) and convert
//! into `CoreError` — or the orchestrator's own error — via `From` impls
//! where a cross-cutting error needs to surface here.

use thiserror::Error;

use crate::NodeId;

/// Common error cases shared by more than one pipeline crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type.
pub type CoreResult<T> = Result<T, CoreError>;
