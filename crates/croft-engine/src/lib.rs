//! # croft-engine — The Data Quality Validation Engine
//!
//! The stateful half of the Croft stack: [`ValidationEngine`] evaluates a
//! record against the field rules and custom rules from `croft-rules`,
//! scores the result, memoizes it under a canonical cache key, and keeps a
//! bounded history for rolling statistics.
//!
//! ## Contract
//!
//! - `validate_data` never returns an error and never panics past its
//!   boundary, whatever the record contains. A rule that panics is
//!   contained and reported as a `validation_internal_error` finding.
//! - The caller's record is never mutated. Coercion fixes land in a
//!   working copy surfaced as `ValidationResult::corrected_record`;
//!   [`auto_fix_data`] likewise returns a new record.
//! - Entry points are `async` to match asynchronous call sites (import
//!   pipelines, request handlers); evaluation itself is synchronous and
//!   CPU-only, so nothing ever suspends.
//! - Cache and history are owned by the engine instance. Tests construct
//!   isolated engines; there is no ambient module-level state.

pub mod autofix;
pub mod engine;
pub mod score;
pub mod stats;
pub mod suggest;

pub use autofix::auto_fix_data;
pub use engine::{BatchOutcome, ValidationEngine, HISTORY_CAPACITY};
pub use stats::{ErrorCodeCount, HistoryEntry, ValidationStats};
pub use suggest::fix_suggestions;
