//! # Auto-Fix Engine — Deterministic Corrections
//!
//! Applies the small set of corrections that need no human judgment:
//! repairing date strings the schema rejected (via the lenient parser),
//! coercing boolean-ish strings on `is_active`, and defaulting the two
//! base fields that have safe defaults (`status`, `updated_at`).
//!
//! ## Discipline
//!
//! - Copy-on-write: the caller's record is never mutated; a corrected
//!   clone is returned. With no applicable fix the clone equals the input.
//! - Idempotent: every fix is guarded so that applying the same findings
//!   to the output again changes nothing — normalized dates re-normalize
//!   to themselves, booleans are only coerced from strings, and defaults
//!   only fill blanks.
//! - Only findings flagged `auto_fixable` are considered; everything else
//!   is ignored regardless of code.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use croft_core::temporal;
use croft_core::{EntityKind, Finding, FindingCode, Record};
use croft_rules::{rules_for, ValueSchema};

/// Apply every applicable deterministic correction and return the
/// corrected record.
pub fn auto_fix_data(record: &Record, findings: &[Finding]) -> Record {
    let mut fixed = record.clone();
    for finding in findings.iter().filter(|f| f.auto_fixable) {
        match finding.code {
            FindingCode::SchemaValidationError => fix_schema_error(&mut fixed, finding),
            FindingCode::RequiredFieldMissing => fix_missing(&mut fixed, finding),
            _ => {}
        }
    }
    fixed
}

/// Whether any registry table constrains this field with a `Date` schema.
/// Covers the `*_date` fields and the `*_at` timestamps alike.
fn is_date_field(field: &str) -> bool {
    EntityKind::all_kinds()
        .iter()
        .flat_map(|kind| rules_for(*kind))
        .any(|rule| rule.name == field && matches!(rule.schema, ValueSchema::Date))
}

fn fix_schema_error(record: &mut Record, finding: &Finding) {
    let field = finding.field.as_str();

    if is_date_field(field) {
        let Some(Value::String(s)) = record.get(field) else { return };
        if let Some(dt) = temporal::parse_date_lenient(s) {
            let normalized = temporal::to_iso8601(dt);
            if *s != normalized {
                debug!(field, %normalized, "auto-fix: normalized date");
                record.set(field, Value::String(normalized));
            }
        }
        return;
    }

    if field == "is_active" {
        let Some(Value::String(s)) = record.get(field) else { return };
        let value = matches!(s.trim().to_lowercase().as_str(), "true" | "1");
        debug!(field, value, "auto-fix: coerced boolean");
        record.set(field, Value::Bool(value));
    }
}

fn fix_missing(record: &mut Record, finding: &Finding) {
    match finding.field.as_str() {
        "status" if record.is_blank("status") => {
            debug!("auto-fix: defaulted status to active");
            record.set("status", Value::String("active".to_string()));
        }
        "updated_at" if record.is_blank("updated_at") => {
            let now = temporal::to_iso8601(Utc::now());
            debug!(%now, "auto-fix: defaulted updated_at");
            record.set("updated_at", Value::String(now));
        }
        _ => {}
    }
}
