//! # croft-core — Foundational Types for the Croft Data Quality Stack
//!
//! This crate is the bedrock of the Croft stack. It defines the core
//! type-system primitives shared by the rule registry and the validation
//! engine. Every other crate in the workspace depends on `croft-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enums for taxonomies.** `EntityKind`, `OperationKind`,
//!    `Severity`, and `FindingCode` are closed enums matched exhaustively.
//!    Adding a kind or code forces every consumer to handle it at compile
//!    time — no string-keyed lookup with a silent default branch.
//!
//! 2. **`Record` newtype for payloads.** Incoming rows are JSON objects by
//!    nature (they arrive from import files and request bodies), but they
//!    are wrapped in a newtype with a validated constructor and a single
//!    blankness predicate used by every rule.
//!
//! 3. **`CacheKey` newtype.** The memoization key is an RFC 8785 (JCS)
//!    canonical serialization hashed with SHA-256. Key-insertion order of
//!    the input can never change the key.
//!
//! 4. **UTC-only timestamps.** All engine timestamps are `DateTime<Utc>`;
//!    date values inside records are normalized to `YYYY-MM-DDTHH:MM:SSZ`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `croft-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod canonical;
pub mod context;
pub mod entity;
pub mod error;
pub mod finding;
pub mod record;
pub mod result;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CacheKey;
pub use context::ValidationContext;
pub use entity::{EntityKind, OperationKind, ENTITY_KIND_COUNT};
pub use error::{CanonicalizationError, CroftError};
pub use finding::{Finding, FindingCode, Severity};
pub use record::Record;
pub use result::{DataInsights, ValidationResult};
