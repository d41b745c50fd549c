//! # Findings — Classified Validation Outcomes
//!
//! A `Finding` is the atomic unit the engine produces: one classified
//! outcome (error/warning/info) from either a per-field schema check or a
//! cross-field custom rule. Severity alone decides which result bucket a
//! finding lands in; no finding ever appears in more than one bucket.
//!
//! `FindingCode` is the closed taxonomy of everything the shipped rule set
//! can report. Codes serialize as the snake_case wire names the CRUD and
//! import layers surface to users.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How blocking a finding is.
///
/// Errors block the write; warnings and infos are surfaced as hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocking: the record must not be written as-is.
    Error,
    /// Non-blocking: the value is suspicious but storable.
    Warning,
    /// Informational: worth a look, nothing more.
    Info,
}

impl Severity {
    /// Returns the lowercase string identifier for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every finding code the shipped rule set can produce.
///
/// Schema-level codes (`RequiredFieldMissing`, `SchemaValidationError`) are
/// always errors. Business-rule codes carry the fixed severity listed on
/// each variant. `ValidationInternalError` is the containment code for a
/// rule that panicked mid-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    /// A required field is absent, null, or empty. Always an error.
    RequiredFieldMissing,
    /// A present value violated its field schema. Always an error.
    SchemaValidationError,
    /// Animal weight deviates >50% from the species age-weight curve. Warning.
    AgeWeightMismatch,
    /// Crop harvest scheduled before the type's minimum growing period. Warning.
    HarvestTooEarly,
    /// Task due date more than one day in the past. Error.
    TaskOverdue,
    /// Task due date inside the priority's lead-time window. Warning.
    DueDateTooSoon,
    /// Inventory quantity at or below minimum stock. Error at zero, else warning.
    LowStock,
    /// Weather condition implausible for the temperature. Warning.
    WeatherInconsistency,
    /// Humidity implausible for the condition. Info.
    HumidityInconsistency,
    /// A rule panicked during evaluation; contained and reported. Error.
    ValidationInternalError,
}

impl FindingCode {
    /// Returns all codes in canonical order.
    pub fn all_codes() -> &'static [FindingCode] {
        &[
            Self::RequiredFieldMissing,
            Self::SchemaValidationError,
            Self::AgeWeightMismatch,
            Self::HarvestTooEarly,
            Self::TaskOverdue,
            Self::DueDateTooSoon,
            Self::LowStock,
            Self::WeatherInconsistency,
            Self::HumidityInconsistency,
            Self::ValidationInternalError,
        ]
    }

    /// Returns the snake_case wire name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequiredFieldMissing => "required_field_missing",
            Self::SchemaValidationError => "schema_validation_error",
            Self::AgeWeightMismatch => "age_weight_mismatch",
            Self::HarvestTooEarly => "harvest_too_early",
            Self::TaskOverdue => "task_overdue",
            Self::DueDateTooSoon => "due_date_too_soon",
            Self::LowStock => "low_stock",
            Self::WeatherInconsistency => "weather_inconsistency",
            Self::HumidityInconsistency => "humidity_inconsistency",
            Self::ValidationInternalError => "validation_internal_error",
        }
    }
}

impl std::fmt::Display for FindingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// The record field (or rule name for cross-field rules) this concerns.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
    /// Machine-readable code.
    pub code: FindingCode,
    /// Fixed severity; decides the result bucket.
    pub severity: Severity,
    /// Optional remediation hints attached by the rule author.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Whether the auto-fix engine has a deterministic correction for this.
    #[serde(default)]
    pub auto_fixable: bool,
    /// The value that was observed, when one was present.
    pub observed: Option<Value>,
    /// The value (or bound) that was expected, when meaningful.
    pub expected: Option<Value>,
}

impl Finding {
    /// Create a finding with the given classification and no extras.
    pub fn new(
        code: FindingCode,
        severity: Severity,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
            severity,
            suggestions: Vec::new(),
            auto_fixable: false,
            observed: None,
            expected: None,
        }
    }

    /// Convenience constructor for an error-severity finding.
    pub fn error(code: FindingCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, field, message)
    }

    /// Convenience constructor for a warning-severity finding.
    pub fn warning(code: FindingCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, field, message)
    }

    /// Convenience constructor for an info-severity finding.
    pub fn info(code: FindingCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Info, field, message)
    }

    /// Attach the observed value.
    pub fn with_observed(mut self, value: Value) -> Self {
        self.observed = Some(value);
        self
    }

    /// Attach the expected value or bound.
    pub fn with_expected(mut self, value: Value) -> Self {
        self.expected = Some(value);
        self
    }

    /// Attach a remediation hint.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Mark the finding as deterministically correctable.
    pub fn auto_fixable(mut self) -> Self {
        self.auto_fixable = true;
        self
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_code_wire_names_match_serde() {
        for code in FindingCode::all_codes() {
            let s = serde_json::to_string(code).unwrap();
            assert_eq!(s, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_all_codes_count() {
        assert_eq!(FindingCode::all_codes().len(), 10);
    }

    #[test]
    fn test_severity_wire_names() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
        assert_eq!(serde_json::to_string(&Severity::Info).unwrap(), "\"info\"");
    }

    #[test]
    fn test_builder_chain() {
        let f = Finding::warning(FindingCode::LowStock, "quantity", "stock is low")
            .with_observed(json!(3))
            .with_expected(json!(10))
            .with_suggestion("Reorder the item");
        assert_eq!(f.observed, Some(json!(3)));
        assert_eq!(f.expected, Some(json!(10)));
        assert_eq!(f.suggestions, vec!["Reorder the item".to_string()]);
        assert!(!f.auto_fixable);
    }

    #[test]
    fn test_display_format() {
        let f = Finding::error(FindingCode::RequiredFieldMissing, "name", "'name' is required");
        assert_eq!(f.to_string(), "[error] name: 'name' is required");
    }

    #[test]
    fn test_serde_roundtrip() {
        let f = Finding::error(FindingCode::SchemaValidationError, "weight", "out of range")
            .with_observed(json!(9000.0))
            .auto_fixable();
        let s = serde_json::to_string(&f).unwrap();
        let back: Finding = serde_json::from_str(&s).unwrap();
        assert_eq!(back, f);
    }
}
