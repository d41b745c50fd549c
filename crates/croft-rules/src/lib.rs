//! # croft-rules — Field Rules and Business Rules
//!
//! The declarative half of the validation engine: per-entity ordered field
//! rule tables (the schema registry) and the named cross-field business
//! rules (the custom rule table).
//!
//! ## Design
//!
//! - Rule tables are `'static` data, defined once, exhaustively matched by
//!   `EntityKind`. There is no runtime registration and no string-keyed
//!   lookup with a default branch: a missing table is a compile error.
//! - Value constraints are a closed enum ([`schema::ValueSchema`]), so
//!   checking is pattern matching over known constraint shapes rather than
//!   reflection over schema documents.
//! - Every rule is a pure function of the record (and context); rules
//!   never perform I/O and never mutate their inputs.

pub mod custom;
pub mod registry;
pub mod schema;

pub use custom::{custom_rules, CustomRule};
pub use registry::{field_count, rules_for, FieldFix, FieldRule};
pub use schema::{SchemaCheck, ValueSchema};
