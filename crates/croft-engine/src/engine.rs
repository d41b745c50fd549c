//! # Validation Engine — Rule Evaluation, Memoization, History
//!
//! `ValidationEngine` runs the full pipeline for one record: field rules
//! in registry order, then custom rules in registration order, then
//! scoring. Results are memoized under the canonical cache key and the
//! last hundred pipeline runs feed the rolling statistics.
//!
//! ## Invariants
//!
//! - Evaluation order is fixed, so identical inputs produce identical
//!   findings.
//! - The caller's record is never mutated; coercion fixes are applied to
//!   a working copy surfaced as `corrected_record`.
//! - Every field check and every custom rule runs under `catch_unwind`;
//!   a panic becomes a `validation_internal_error` finding for that field
//!   or rule and evaluation continues. Nothing escapes this boundary.
//! - A cache hit returns the stored result verbatim — including its
//!   original `processing_time_ms` — and does not touch history.

use std::collections::{HashMap, VecDeque};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use croft_core::{
    CacheKey, Finding, FindingCode, Record, Severity, ValidationContext, ValidationResult,
};
use croft_rules::{custom_rules, field_count, rules_for, CustomRule, FieldFix, FieldRule, ValueSchema};

use crate::score;
use crate::stats::{self, HistoryEntry, ValidationStats};

/// Maximum number of pipeline runs retained for statistics.
pub const HISTORY_CAPACITY: usize = 100;

/// One entry of a batch validation's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Position of the record in the submitted batch.
    pub index: usize,
    /// The record's own validation result, independent of its siblings.
    pub result: ValidationResult,
}

/// The stateful validation engine. One instance owns one cache and one
/// history ring; tests construct isolated instances.
///
/// Callers sharing an instance must serialize their calls (`&mut self`);
/// the engine itself never blocks, suspends, or performs I/O.
#[derive(Debug, Default)]
pub struct ValidationEngine {
    cache: HashMap<CacheKey, ValidationResult>,
    history: VecDeque<HistoryEntry>,
}

impl ValidationEngine {
    /// Create an engine with an empty cache and history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate one record against its context.
    ///
    /// Never fails: malformed values become findings, a panicking rule
    /// becomes a `validation_internal_error` finding, and a cache-key
    /// serialization failure just means the call runs uncached.
    pub async fn validate_data(
        &mut self,
        record: &Record,
        context: &ValidationContext,
    ) -> ValidationResult {
        let started = Instant::now();

        let key = CacheKey::compute(record, context).ok();
        if let Some(key) = &key {
            if let Some(hit) = self.cache.get(key) {
                debug!(key = %key, "validation cache hit");
                return hit.clone();
            }
        }

        let result = run_pipeline(record, context, started);
        debug!(
            entity_kind = %context.entity_kind,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            quality_score = result.quality_score,
            "validation complete"
        );

        if let Some(key) = key {
            self.cache.insert(key, result.clone());
        }
        self.history.push_back(HistoryEntry {
            timestamp: Utc::now(),
            context: context.clone(),
            result: result.clone(),
        });
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }

        result
    }

    /// Validate a batch of independent records under one shared context.
    ///
    /// Strictly sequential, so cache insertion and history order are
    /// deterministic. No cross-record constraints are evaluated.
    pub async fn validate_batch(
        &mut self,
        records: &[Record],
        context: &ValidationContext,
    ) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let result = self.validate_data(record, context).await;
            outcomes.push(BatchOutcome { index, result });
        }
        outcomes
    }

    /// Rolling statistics over the current history window.
    pub fn stats(&self) -> ValidationStats {
        stats::compute(self.history.iter())
    }

    /// Drop every memoized result. History is unaffected.
    pub fn clear_cache(&mut self) {
        debug!(entries = self.cache.len(), "clearing validation cache");
        self.cache.clear();
    }

    /// Number of memoized results currently held.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Number of history entries currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

/// Run the full evaluation pipeline for one record.
fn run_pipeline(
    record: &Record,
    context: &ValidationContext,
    started: Instant,
) -> ValidationResult {
    let mut working = record.clone();
    let mut findings: Vec<Finding> = Vec::new();
    let mut auto_fixes_applied = false;

    for rule in rules_for(context.entity_kind) {
        match catch_unwind(AssertUnwindSafe(|| eval_field_rule(rule, &working))) {
            Ok(outcome) => {
                findings.extend(outcome.findings);
                if let Some(value) = outcome.write_back {
                    trace!(field = rule.name, "applied coercion fix to working copy");
                    working.set(rule.name, value);
                    auto_fixes_applied = true;
                }
            }
            Err(_) => findings.push(internal_error(rule.name)),
        }
    }

    for rule in custom_rules() {
        if !rule.applies_to.contains(&context.entity_kind) {
            continue;
        }
        if let Some(finding) = eval_custom_rule(rule, &working, context) {
            findings.push(finding);
        }
    }

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

    let raw = score::raw_insights(field_count(context.entity_kind), &errors);
    let confidence = score::confidence(errors.len(), warnings.len(), suggestions.len());

    ValidationResult {
        is_valid: errors.is_empty(),
        quality_score: score::quality_score(&raw),
        data_insights: score::rounded_insights(&raw),
        confidence,
        auto_fixes_applied,
        corrected_record: if auto_fixes_applied { Some(working) } else { None },
        processing_time_ms: started.elapsed().as_millis() as u64,
        errors,
        warnings,
        suggestions,
    }
}

/// What one field rule produced: findings, plus an optional coerced value
/// to write into the working copy.
struct FieldOutcome {
    findings: Vec<Finding>,
    write_back: Option<Value>,
}

fn eval_field_rule(rule: &FieldRule, record: &Record) -> FieldOutcome {
    if record.is_blank(rule.name) {
        let findings = if rule.required {
            let mut finding = Finding::error(
                FindingCode::RequiredFieldMissing,
                rule.name,
                format!("'{}' is required", rule.name),
            );
            finding.auto_fixable =
                matches!(rule.fix, Some(FieldFix::DefaultStatus | FieldFix::DefaultNow));
            vec![finding]
        } else {
            Vec::new()
        };
        return FieldOutcome { findings, write_back: None };
    }

    // Present and non-blank; unwrap cannot trip after is_blank.
    let value = record.get(rule.name).cloned().unwrap_or(Value::Null);
    let check = rule.schema.check(&value);

    // A schema error is auto-fixable only where the fixer has a real
    // repair: re-parsing a date string, or coercing a boolean string.
    let fixable = match rule.schema {
        ValueSchema::Date => rule.fix.is_some(),
        _ => matches!(rule.fix, Some(FieldFix::CoerceBool)),
    };
    let findings = check
        .violations
        .into_iter()
        .map(|violation| {
            let mut finding = Finding::error(
                FindingCode::SchemaValidationError,
                rule.name,
                format!("'{}' {violation}", rule.name),
            )
            .with_observed(value.clone());
            finding.auto_fixable = fixable;
            finding
        })
        .collect();

    let write_back = if rule.fix.is_some() { check.coerced } else { None };
    FieldOutcome { findings, write_back }
}

fn eval_custom_rule(
    rule: &CustomRule,
    record: &Record,
    context: &ValidationContext,
) -> Option<Finding> {
    match catch_unwind(AssertUnwindSafe(|| (rule.eval)(record, context))) {
        Ok(finding) => finding,
        Err(_) => Some(internal_error(rule.name)),
    }
}

fn internal_error(scope: &str) -> Finding {
    Finding::error(
        FindingCode::ValidationInternalError,
        scope,
        format!("internal error while evaluating '{scope}'; the rule was skipped"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use croft_core::{EntityKind, OperationKind};
    use serde_json::json;

    fn ctx(kind: EntityKind) -> ValidationContext {
        ValidationContext::new(kind, OperationKind::Create)
            .with_timestamp(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap())
    }

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn valid_farm() -> Record {
        record(json!({
            "name": "Hill Croft",
            "status": "active",
            "updated_at": "2026-06-01T00:00:00Z",
        }))
    }

    #[tokio::test]
    async fn test_clean_record_is_valid() {
        let mut engine = ValidationEngine::new();
        let result = engine.validate_data(&valid_farm(), &ctx(EntityKind::Farm)).await;
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(!result.auto_fixes_applied);
        assert!(result.corrected_record.is_none());
        assert_eq!(result.data_insights.timeliness, 90);
    }

    #[tokio::test]
    async fn test_missing_required_fields_reported_individually() {
        let mut engine = ValidationEngine::new();
        let result = engine.validate_data(&record(json!({})), &ctx(EntityKind::Farm)).await;
        assert!(!result.is_valid);
        let missing: Vec<&str> = result
            .errors
            .iter()
            .filter(|f| f.code == FindingCode::RequiredFieldMissing)
            .map(|f| f.field.as_str())
            .collect();
        assert_eq!(missing, vec!["name", "status", "updated_at"]);
    }

    #[tokio::test]
    async fn test_schema_violation_carries_observed_value() {
        let mut engine = ValidationEngine::new();
        let mut r = valid_farm();
        r.set("size_hectares", json!(-4));
        let result = engine.validate_data(&r, &ctx(EntityKind::Farm)).await;
        let finding = result
            .errors
            .iter()
            .find(|f| f.code == FindingCode::SchemaValidationError)
            .unwrap();
        assert_eq!(finding.field, "size_hectares");
        assert_eq!(finding.observed, Some(json!(-4)));
    }

    #[tokio::test]
    async fn test_coercion_with_fix_surfaces_corrected_record() {
        let mut engine = ValidationEngine::new();
        let mut r = valid_farm();
        r.set("updated_at", json!("2026-06-01"));
        let result = engine.validate_data(&r, &ctx(EntityKind::Farm)).await;
        assert!(result.is_valid);
        assert!(result.auto_fixes_applied);
        let corrected = result.corrected_record.unwrap();
        assert_eq!(corrected.text("updated_at"), Some("2026-06-01T00:00:00Z"));
        // Caller's record untouched.
        assert_eq!(r.text("updated_at"), Some("2026-06-01"));
    }

    #[tokio::test]
    async fn test_coercion_without_fix_not_written() {
        let mut engine = ValidationEngine::new();
        let mut r = valid_farm();
        // size_hectares coerces "12" to 12 but carries no fix.
        r.set("size_hectares", json!("12"));
        let result = engine.validate_data(&r, &ctx(EntityKind::Farm)).await;
        assert!(result.is_valid);
        assert!(!result.auto_fixes_applied);
        assert!(result.corrected_record.is_none());
    }

    #[tokio::test]
    async fn test_missing_status_flagged_auto_fixable() {
        let mut engine = ValidationEngine::new();
        let r = record(json!({"name": "x", "updated_at": "2026-06-01T00:00:00Z"}));
        let result = engine.validate_data(&r, &ctx(EntityKind::Farm)).await;
        let status = result.errors.iter().find(|f| f.field == "status").unwrap();
        assert!(status.auto_fixable);
        let name_rule_missing = result.errors.iter().find(|f| f.field == "name");
        assert!(name_rule_missing.is_none());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_history() {
        let mut engine = ValidationEngine::new();
        let r = valid_farm();
        let c = ctx(EntityKind::Farm);
        let first = engine.validate_data(&r, &c).await;
        let second = engine.validate_data(&r, &c).await;
        assert_eq!(first, second);
        assert_eq!(second.processing_time_ms, first.processing_time_ms);
        assert_eq!(engine.cache_len(), 1);
        assert_eq!(engine.history_len(), 1);
    }

    #[tokio::test]
    async fn test_clear_cache_keeps_history() {
        let mut engine = ValidationEngine::new();
        let c = ctx(EntityKind::Farm);
        engine.validate_data(&valid_farm(), &c).await;
        engine.clear_cache();
        assert_eq!(engine.cache_len(), 0);
        assert_eq!(engine.history_len(), 1);
    }

    #[tokio::test]
    async fn test_history_evicts_fifo_at_capacity() {
        let mut engine = ValidationEngine::new();
        let c = ctx(EntityKind::Farm);
        for i in 0..(HISTORY_CAPACITY + 5) {
            let mut r = valid_farm();
            r.set("name", json!(format!("farm-{i}")));
            engine.validate_data(&r, &c).await;
        }
        assert_eq!(engine.history_len(), HISTORY_CAPACITY);
        assert_eq!(engine.stats().total, HISTORY_CAPACITY);
    }

    #[tokio::test]
    async fn test_batch_preserves_indices_and_independence() {
        let mut engine = ValidationEngine::new();
        let records = vec![valid_farm(), record(json!({})), valid_farm()];
        let outcomes = engine.validate_batch(&records, &ctx(EntityKind::Farm)).await;
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].index, 0);
        assert!(outcomes[0].result.is_valid);
        assert!(!outcomes[1].result.is_valid);
        assert!(outcomes[2].result.is_valid);
    }

    #[test]
    fn test_panicking_custom_rule_contained() {
        fn explode(_: &Record, _: &ValidationContext) -> Option<Finding> {
            panic!("rule bug");
        }
        let rule = CustomRule {
            name: "exploding_rule",
            applies_to: &[EntityKind::Farm],
            eval: explode,
        };
        let finding =
            eval_custom_rule(&rule, &valid_farm(), &ctx(EntityKind::Farm)).unwrap();
        assert_eq!(finding.code, FindingCode::ValidationInternalError);
        assert_eq!(finding.severity, Severity::Error);
        assert_eq!(finding.field, "exploding_rule");
        assert!(!finding.auto_fixable);
    }

    #[tokio::test]
    async fn test_array_and_object_field_values_do_not_panic() {
        let mut engine = ValidationEngine::new();
        let r = record(json!({
            "name": ["not", "a", "string"],
            "status": {"nested": true},
            "updated_at": [],
        }));
        let result = engine.validate_data(&r, &ctx(EntityKind::Farm)).await;
        assert!(!result.is_valid);
        assert!(result
            .errors
            .iter()
            .all(|f| f.code == FindingCode::SchemaValidationError
                || f.code == FindingCode::RequiredFieldMissing));
    }
}
