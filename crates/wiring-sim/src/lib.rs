//! `wiring-sim` — the S11 orchestrator driving the wiring-design pipeline
//! end to end and exposing its request/response API (§4.11, §6).
//!
//! # Module layout
//!
//! | Module         | Contents                                                |
//! |----------------|-------------------------------------------------------|
//! | [`request`]    | `DesignRequest` — the input to one pipeline run        |
//! | [`response`]   | `Outcome`, `DesignResponse`, `Diagnostics`               |
//! | [`orchestrator`] | `design`, `design_with_config`, `design_with` — S1-S10 driver |
//! | [`observer`]   | `DesignObserver`, `NoopObserver`                        |
//! | [`cache`]      | `FeatureSource`, `CoalescingFeatureCache` (§10.7)        |
//! | [`error`]      | `SimError`, `SimResult<T>` — internal/bug-class failures |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                      |
//! |------------|---------------------------------------------------------------|
//! | `serde`    | Adds `Serialize`/`Deserialize` to request/response types.   |
//! | `parallel` | Enables [`design_batch`], fanning independent requests out over `rayon` (§10.6). |

pub mod cache;
pub mod error;
pub mod observer;
pub mod orchestrator;
pub mod request;
pub mod response;

pub use cache::{CoalescingFeatureCache, FeatureSource};
pub use error::{SimError, SimResult};
pub use observer::{DesignObserver, NoopObserver};
pub use orchestrator::{design, design_with, design_with_config};
pub use request::DesignRequest;
pub use response::{Diagnostics, DesignResponse, Outcome, RejectedCandidate};

/// Run an independent slice of requests in parallel across `rayon`'s thread
/// pool (§5 "inter-request parallelism", §10.6). Each request gets its own
/// exclusively owned normalized features, index, and graph; nothing is
/// shared or mutated across requests.
#[cfg(feature = "parallel")]
pub fn design_batch(requests: &[DesignRequest], config: &wiring_core::DesignConfig) -> Vec<DesignResponse> {
    use rayon::prelude::*;

    requests.par_iter().map(|request| orchestrator::design_with_config(request, config)).collect()
}
