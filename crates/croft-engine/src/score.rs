//! # Quality and Confidence Scoring
//!
//! Pure arithmetic over classified findings. Four sub-scores (completeness,
//! accuracy, consistency, timeliness) aggregate into the 0–100 quality
//! score; a separate 0–1 confidence score derives from the count and
//! severity mix of findings.
//!
//! Timeliness is a fixed placeholder (0.9), not a freshness measure.
//! Downstream consumers depend on the literal value, so it must not be
//! replaced with a derived formula without coordinating a change.

use croft_core::{DataInsights, Finding, FindingCode};

/// The fixed timeliness placeholder.
pub const TIMELINESS_PLACEHOLDER: f64 = 0.9;

/// Unrounded sub-scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInsights {
    pub completeness: f64,
    pub accuracy: f64,
    pub consistency: f64,
    pub timeliness: f64,
}

/// Derive the raw sub-scores from the error bucket.
///
/// `total_fields` is the size of the kind's rule table (the field
/// universe), never the number of fields present on the record.
/// `errors` is the error-severity bucket only; warnings and infos affect
/// confidence, not these scores.
pub fn raw_insights(total_fields: usize, errors: &[Finding]) -> RawInsights {
    let count = |code: FindingCode| errors.iter().filter(|f| f.code == code).count();
    let required_missing = count(FindingCode::RequiredFieldMissing);
    let schema_errors = count(FindingCode::SchemaValidationError);
    let business_errors = errors.len() - required_missing - schema_errors;

    let total = total_fields as f64;
    let divisor = total.max(1.0);

    RawInsights {
        completeness: if total_fields == 0 {
            1.0
        } else {
            ((total - required_missing as f64) / total).max(0.0)
        },
        accuracy: (1.0 - schema_errors as f64 / divisor).max(0.0),
        consistency: (1.0 - business_errors as f64 / divisor).max(0.0),
        timeliness: TIMELINESS_PLACEHOLDER,
    }
}

/// Round the raw sub-scores to the reported 0–100 integers.
pub fn rounded_insights(raw: &RawInsights) -> DataInsights {
    DataInsights {
        completeness: to_percent(raw.completeness),
        accuracy: to_percent(raw.accuracy),
        consistency: to_percent(raw.consistency),
        timeliness: to_percent(raw.timeliness),
    }
}

/// The overall 0–100 quality score: the mean of the four *raw* sub-scores,
/// rounded once at the end.
pub fn quality_score(raw: &RawInsights) -> u8 {
    let mean = (raw.completeness + raw.accuracy + raw.consistency + raw.timeliness) / 4.0;
    to_percent(mean)
}

/// The 0–1 confidence score from bucket sizes.
///
/// Each bucket contributes a term clamped at zero; the terms are weighted
/// by severity (errors 0.07 each, warnings 0.02, infos 0.01) and averaged.
/// Every term is at most 1, so the mean never exceeds 1 — the score is
/// clamped at the low end and bounded above by construction.
pub fn confidence(errors: usize, warnings: usize, suggestions: usize) -> f64 {
    let term = |count: usize, weight: f64| (1.0 - count as f64 * weight / 10.0).max(0.0);
    (term(errors, 0.7) + term(warnings, 0.2) + term(suggestions, 0.1)) / 3.0
}

fn to_percent(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 100.0).round() as u8
}
