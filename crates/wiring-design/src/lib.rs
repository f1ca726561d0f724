//! `wiring-design` — pole allocation, cost estimation, voltage drop, and
//! route ranking (S7-S10) for the wiring-design pipeline.
//!
//! # Module layout
//!
//! | Module    | Contents                                                  |
//! |-----------|------------------------------------------------------------|
//! | [`alloc`] | `allocate_new_poles` — fixed-interval placement + building avoidance (§4.7) |
//! | [`cost`]  | `estimate_cost`, pricing lookup tables (§4.8)              |
//! | [`vdrop`] | `compute_voltage_drop` (§4.9)                              |
//! | [`rank`]  | `rank_routes` — deterministic sort + truncation (§4.10)    |
//! | [`route`] | `RouteResult` — the assembled per-candidate output record  |
//! | [`error`] | `DesignError`, `DesignResult<T>`                           |

pub mod alloc;
pub mod cost;
pub mod error;
pub mod rank;
pub mod route;
pub mod vdrop;

pub use alloc::allocate_new_poles;
pub use cost::{estimate_cost, CostEstimate};
pub use error::{DesignError, DesignResult};
pub use rank::rank_routes;
pub use route::RouteResult;
pub use vdrop::{compute_voltage_drop, VoltageDrop};
