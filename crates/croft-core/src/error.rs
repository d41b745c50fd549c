//! # Error Types — Structured Error Hierarchy
//!
//! Errors raised while *constructing* inputs for the validation engine.
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! Note the engine itself never returns an error past its boundary: rule
//! evaluation failures become `Finding`s, not `Err` values. The types here
//! cover the narrow construction paths (record from a non-object value,
//! parsing a kind from a wire string, canonical key serialization).

use thiserror::Error;

/// Top-level error type for the Croft stack.
#[derive(Error, Debug)]
pub enum CroftError {
    /// Canonical cache-key computation failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A record was constructed from a JSON value that is not an object.
    #[error("record payload must be a JSON object, got {0}")]
    NotAnObject(String),

    /// An entity kind string did not name a known kind.
    #[error("unknown entity kind: {0:?}")]
    UnknownEntityKind(String),

    /// An operation kind string did not name a known kind.
    #[error("unknown operation kind: {0:?}")]
    UnknownOperationKind(String),
}

/// Error during canonical serialization of a cache key.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JCS serialization failed.
    #[error("canonical serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
