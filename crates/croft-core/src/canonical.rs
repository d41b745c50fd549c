//! # Canonical Cache Keys — JCS-Backed Memoization Keys
//!
//! This module defines `CacheKey`, the sole construction path for the keys
//! under which the engine memoizes validation results.
//!
//! ## Invariant
//!
//! The `CacheKey` newtype has a private inner field. The only way to
//! construct one is through [`CacheKey::compute`], which serializes the
//! `(record, context)` pair with RFC 8785 (JSON Canonicalization Scheme)
//! and hashes the bytes with SHA-256. JCS sorts object keys and fixes
//! number formatting, so two inputs that differ only in map insertion
//! order always produce the same key — the idempotent-caching property
//! cannot be broken by a caller's field ordering.
//!
//! Unlike content-addressing schemes, float values are accepted here: farm
//! measurements (weights, temperatures, hectares) are floating point, and
//! a cache key has no cross-language digest-compatibility obligation. JCS
//! number serialization (ES6 shortest-round-trip) keeps it deterministic.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::context::ValidationContext;
use crate::error::CanonicalizationError;
use crate::record::Record;

/// A memoization key: the SHA-256 hex digest of the JCS serialization of
/// a `(record, context)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

/// The shape that gets canonicalized. Named fields keep the record and
/// context namespaces from colliding in the serialized form.
#[derive(Serialize)]
struct KeyPayload<'a> {
    record: &'a Record,
    context: &'a ValidationContext,
}

impl CacheKey {
    /// Compute the canonical key for a validation call.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if JCS
    /// serialization fails. With well-formed inputs this does not happen;
    /// the engine treats a failure as "run uncached" rather than
    /// propagating it.
    pub fn compute(
        record: &Record,
        context: &ValidationContext,
    ) -> Result<Self, CanonicalizationError> {
        let payload = KeyPayload { record, context };
        let canonical = serde_jcs::to_string(&payload)?;
        let digest = Sha256::digest(canonical.as_bytes());
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        Ok(Self(hex))
    }

    /// The key as a lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
