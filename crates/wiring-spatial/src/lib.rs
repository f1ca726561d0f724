//! `wiring-spatial` — spatial indexing, road graph construction, pathfinding,
//! and crossing validation (S2, S4-S6).
//!
//! # Module layout
//!
//! | Module      | Contents                                                         |
//! |-------------|-------------------------------------------------------------------|
//! | [`index`]   | `SpatialIndex` — R-trees over poles/lines/roads/buildings (§4.2)  |
//! | [`graph`]   | `RoadGraph`, `RoadGraphBuilder` — CSR road graph + attachment (§4.4) |
//! | [`astar`]   | `astar`, `fast_track_path`, `PathResult` — pathfinding (§4.5)      |
//! | [`crossing`]| `validate_path`, `CrossingRejection` — strict-crossing test (§4.6) |
//! | [`error`]   | `SpatialError`                                                     |

pub mod astar;
pub mod crossing;
pub mod error;
pub mod graph;
pub mod index;

pub use astar::{astar, astar_outcome, fast_track_path, PathResult, ReachOutcome};
pub use crossing::{validate_path, CrossingRejection};
pub use error::{SpatialError, SpatialResult};
pub use graph::{NodeOrigin, RoadGraph, RoadGraphBuilder};
pub use index::{Rect, SpatialIndex};
