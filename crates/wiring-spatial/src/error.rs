//! Spatial-subsystem error type.

use thiserror::Error;

use wiring_core::NodeId;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpatialError {
    #[error("node {0} not found in road graph")]
    NodeNotFound(NodeId),

    #[error("no road segment within max_attach_m of the requested point")]
    NoRoadAccess,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
