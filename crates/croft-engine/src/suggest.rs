//! # Fix Suggestions — Static Remediation Hints by Code
//!
//! A static lookup from finding code to remediation hints, used by the
//! CRUD layer to render warnings and suggestions as actionable text. The
//! internal-error code gets the generic fallback; everything else has
//! code-specific guidance.

use croft_core::{Finding, FindingCode};

const GENERIC_SUGGESTION: &str = "Review the field value and correct it manually";

/// Remediation hints for a finding, most specific first.
pub fn fix_suggestions(finding: &Finding) -> Vec<String> {
    let field = finding.field.as_str();
    match finding.code {
        FindingCode::RequiredFieldMissing => vec![
            format!("Provide a value for '{field}'"),
            "If this row came from an import, check the column mapping".to_string(),
        ],
        FindingCode::SchemaValidationError => vec![
            format!("Check the type and range of '{field}'"),
            "Dates are accepted as RFC 3339 or YYYY-MM-DD".to_string(),
        ],
        FindingCode::AgeWeightMismatch => vec![
            "Verify the weight was recorded in kilograms".to_string(),
            "Confirm the animal's age against its birth date".to_string(),
        ],
        FindingCode::HarvestTooEarly => vec![
            "Push the expected harvest date past the crop's minimum growing period".to_string(),
            "Check that the planting date is correct".to_string(),
        ],
        FindingCode::TaskOverdue => vec![
            "Mark the task complete or reschedule it".to_string(),
            "Reassign the task if the assignee is unavailable".to_string(),
        ],
        FindingCode::DueDateTooSoon => vec![
            "Move the due date out, or raise the task's priority".to_string(),
        ],
        FindingCode::LowStock => {
            vec!["Reorder the item".to_string(), "Adjust the minimum stock level if it is set too high".to_string()]
        }
        FindingCode::WeatherInconsistency => vec![
            "Check the temperature reading and the reported condition against each other"
                .to_string(),
        ],
        FindingCode::HumidityInconsistency => vec![
            "Confirm the humidity sensor reading".to_string(),
        ],
        FindingCode::ValidationInternalError => vec![GENERIC_SUGGESTION.to_string()],
    }
}
