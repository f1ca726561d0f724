//! `wiring-core` — foundational types for the wiring-design pipeline.
//!
//! This crate is a dependency of every other pipeline crate. It
//! intentionally has no other pipeline-crate dependencies and minimal
//! external ones (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `NodeId`, `EdgeId`, `PoleId`, `LineId`, ...            |
//! | [`geo`]    | `Point`, `Segment`, Euclidean distance and projection  |
//! | [`phase`]  | `PhaseClass`, `VoltageClass`, `LineType`               |
//! | [`config`] | `DesignConfig` — the tunable constant table            |
//! | [`error`]  | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod phase;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::DesignConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{Point, Projection, Segment};
pub use ids::{BuildingId, EdgeId, LineId, NodeId, PoleId, RailwayId, RiverId, RoadId, TransformerId};
pub use phase::{LineType, PhaseClass, RequestPhase, VoltageClass};
