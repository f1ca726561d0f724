//! Normalizer error type.
//!
//! Per §4.1 and §7, malformed features are *data-level* failures: the
//! normalizer drops the record and increments a diagnostic counter rather
//! than surfacing an `Err` that aborts the request. `FeatureError` exists to
//! describe *why* a given record was dropped, for diagnostics, not to
//! propagate out of [`crate::normalize::normalize`].

use thiserror::Error;

use crate::raw::FeatureKind;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("{kind} {id}: malformed geometry")]
    MalformedGeometry { kind: FeatureKind, id: String },

    #[error("{kind} {id}: missing required field {field}")]
    MissingField { kind: FeatureKind, id: String, field: &'static str },

    #[error("{kind} {id}: duplicate id")]
    DuplicateId { kind: FeatureKind, id: String },

    #[error("{kind} {id}: dangling reference to pole {pole_id}")]
    DanglingPoleRef { kind: FeatureKind, id: String, pole_id: String },
}

pub type FeatureResult<T> = Result<T, FeatureError>;
