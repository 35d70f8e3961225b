//! Error types for catalog client operations.
//!
//! A well-formed search with no matches is not an error (it yields an empty
//! record list), and records without the ranking field are dropped silently by
//! the ranker. Everything else that can go wrong ends up in [`CatalogError`].

use crate::query::types::ObjectKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure or an undecodable response body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("unknown {kind} attribute `{attribute}`")]
    UnknownAttribute { kind: ObjectKind, attribute: String },

    #[error("unknown {kind} field `{field}`")]
    UnknownField { kind: ObjectKind, field: String },

    #[error("unknown object kind `{0}`")]
    UnknownKind(String),

    #[error("unknown logical operator `{0}` (expected AND or OR)")]
    UnknownOperator(String),

    #[error("both clauses of a compound query must target the same object kind")]
    MixedKinds,

    #[error("expected a {expected} record, got a {found} record")]
    KindMismatch {
        expected: ObjectKind,
        found: ObjectKind,
    },

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("{0} record has no identifier")]
    MissingIdentifier(ObjectKind),
}
