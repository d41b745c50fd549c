//! # Validation Results
//!
//! `ValidationResult` is what one engine call returns: findings bucketed
//! strictly by severity, the quality and confidence scores, per-dimension
//! insights, and bookkeeping (timing, cache-relevant flags).
//!
//! ## Invariants
//!
//! - `is_valid == errors.is_empty()`, always.
//! - `quality_score` and every `DataInsights` dimension are integers in
//!   `[0, 100]`; `confidence` is in `[0, 1]`.
//! - Each finding appears in exactly one bucket, chosen by its severity.
//! - `corrected_record` is present iff an in-flight coercion fix was
//!   applied during evaluation; the caller's record is never mutated.

use serde::{Deserialize, Serialize};

use crate::finding::{Finding, Severity};
use crate::record::Record;

/// Per-dimension quality sub-scores, each rounded to an integer in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataInsights {
    /// Share of known fields with required values present.
    pub completeness: u8,
    /// Inverse of the schema-violation density.
    pub accuracy: u8,
    /// Inverse of the business-rule-error density.
    pub consistency: u8,
    /// Fixed placeholder (90). Not a real freshness measure; kept stable
    /// because downstream consumers depend on the literal value.
    pub timeliness: u8,
}

/// The outcome of validating one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Derived: true iff `errors` is empty.
    pub is_valid: bool,
    /// Error-severity findings. Any entry here blocks the write.
    pub errors: Vec<Finding>,
    /// Warning-severity findings.
    pub warnings: Vec<Finding>,
    /// Info-severity findings.
    pub suggestions: Vec<Finding>,
    /// Whether an in-flight coercion fix was applied during evaluation.
    pub auto_fixes_applied: bool,
    /// The working copy carrying applied coercion fixes, when any were made.
    pub corrected_record: Option<Record>,
    /// 0–1 heuristic from the count and severity mix of findings.
    pub confidence: f64,
    /// 0–100 aggregate of the four insight dimensions.
    pub quality_score: u8,
    /// Wall-clock duration of the pipeline run that produced this result.
    /// Cache hits return the original measurement, not a new one.
    pub processing_time_ms: u64,
    /// Per-dimension sub-scores.
    pub data_insights: DataInsights,
}

impl ValidationResult {
    /// Build a result from classified findings, bucketing by severity.
    ///
    /// `is_valid` is derived, never supplied.
    pub fn from_findings(
        findings: Vec<Finding>,
        auto_fixes_applied: bool,
        corrected_record: Option<Record>,
        confidence: f64,
        quality_score: u8,
        processing_time_ms: u64,
        data_insights: DataInsights,
    ) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();
        for finding in findings {
            match finding.severity {
                Severity::Error => errors.push(finding),
                Severity::Warning => warnings.push(finding),
                Severity::Info => suggestions.push(finding),
            }
        }
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            suggestions,
            auto_fixes_applied,
            corrected_record,
            confidence,
            quality_score,
            processing_time_ms,
            data_insights,
        }
    }

    /// Iterate over every finding across all three buckets, errors first.
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.suggestions.iter())
    }

    /// Total finding count across all buckets.
    pub fn finding_count(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.suggestions.len()
    }
}
