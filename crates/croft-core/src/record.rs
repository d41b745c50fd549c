//! # Record Payloads
//!
//! Defines `Record`, the newtype wrapper around an incoming row's JSON
//! object. Rows arrive untyped (import files, request bodies), so the
//! payload stays a JSON map — but the wrapper gives it a validated
//! constructor, a single blankness predicate shared by every rule, and
//! typed accessors so rule code never re-implements value coercion.
//!
//! ## Invariants
//!
//! - A `Record` is always a JSON *object*; `from_value` rejects everything
//!   else.
//! - "Blank" means exactly: field absent, JSON `null`, or empty string.
//!   Required-field checks and auto-fix guards share this one definition.
//! - Mutation happens only through `set()` on engine-owned working copies;
//!   the engine never mutates a caller's record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CroftError;
use crate::temporal;

/// One row of data under validation: a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Construct a record from an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns `CroftError::NotAnObject` for anything other than a JSON
    /// object — arrays, scalars, and `null` are not rows.
    pub fn from_value(value: Value) -> Result<Self, CroftError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CroftError::NotAnObject(type_name(&other).to_string())),
        }
    }

    /// Construct a record directly from a JSON object map.
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Look up a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set a field value. Used by the engine on its own working copies.
    pub fn set(&mut self, field: &str, value: Value) {
        self.0.insert(field.to_string(), value);
    }

    /// Returns true when the field is absent, JSON `null`, or an empty
    /// string. This is the one blankness definition used by required-field
    /// checks, skip logic for optional fields, and auto-fix guards.
    pub fn is_blank(&self, field: &str) -> bool {
        match self.0.get(field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }

    /// Field value as text, if it is a JSON string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Field value as a number.
    ///
    /// Accepts JSON numbers and numeric strings — import rows routinely
    /// carry `"42"` where the schema wants `42`.
    pub fn number(&self, field: &str) -> Option<f64> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Field value as a UTC datetime, via the flexible date parser.
    pub fn date(&self, field: &str) -> Option<chrono::DateTime<chrono::Utc>> {
        temporal::parse_date_value(self.0.get(field)?)
    }

    /// Number of fields present on the record.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Access the underlying JSON object map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record and return the underlying map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Human-readable JSON type name for error messages.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
