//! `wiring-select` — candidate pole selection and priority scoring (S3).
//!
//! # Module layout
//!
//! | Module       | Contents                                              |
//! |--------------|----------------------------------------------------------|
//! | [`selector`] | `Candidate`, `select_candidates` — phase match + radius filter + fast-track flag |
//! | [`scorer`]   | `priority` — the §4.3 tie-break scoring formula        |
//! | [`error`]    | `SelectError`, `SelectResult<T>`                       |

pub mod error;
pub mod scorer;
pub mod selector;

pub use error::{SelectError, SelectResult};
pub use scorer::priority;
pub use selector::{select_candidates, Candidate};
