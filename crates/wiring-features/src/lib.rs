//! `wiring-features` — raw GIS feature ingestion and normalization (S1).
//!
//! Converts loosely typed [`RawRecord`]s into the typed entities of
//! `wiring-core`'s data model: [`Pole`], [`Line`], [`Transformer`], [`Road`],
//! [`Building`], [`Railway`], [`River`]. Malformed records are dropped with a
//! diagnostic counter (§4.1, §7) rather than aborting the batch.
//!
//! # Module layout
//!
//! | Module        | Contents                                                |
//! |---------------|-----------------------------------------------------------|
//! | [`raw`]       | `RawRecord`, `RawGeometry`, `FeatureKind` — the ingestion boundary |
//! | [`entities`]  | `Pole`, `Line`, `Transformer`, `Road`, `Building`, `Railway`, `River` |
//! | [`normalize`] | `normalize_batch` — the S1 decode pipeline and drop counters |
//! | [`error`]     | `FeatureError`, `FeatureResult<T>`                        |

pub mod entities;
pub mod error;
pub mod normalize;
pub mod raw;

pub use entities::{Building, Line, Pole, Railway, River, Road, Transformer};
pub use error::{FeatureError, FeatureResult};
pub use normalize::{normalize_batch, DropCounters, NormalizedFeatures};
pub use raw::{FeatureKind, RawGeometry, RawRecord};
