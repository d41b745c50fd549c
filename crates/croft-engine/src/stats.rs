//! # Validation History and Rolling Statistics
//!
//! The engine keeps the last [`crate::HISTORY_CAPACITY`] pipeline runs in
//! a FIFO ring and derives rolling statistics from them on demand. History
//! exists only for statistics — nothing correctness-related ever reads it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use croft_core::{FindingCode, ValidationContext, ValidationResult};

/// One recorded pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the run was recorded.
    pub timestamp: DateTime<Utc>,
    /// The context the record was validated under.
    pub context: ValidationContext,
    /// The result the pipeline produced.
    pub result: ValidationResult,
}

/// How often one error code occurred across the history window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCodeCount {
    /// The error code.
    pub code: FindingCode,
    /// Occurrences across all recorded results.
    pub count: usize,
}

/// Rolling statistics over the current history window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    /// Number of recorded runs.
    pub total: usize,
    /// Mean errors per run.
    pub error_rate: f64,
    /// Mean `processing_time_ms` per run.
    pub average_processing_time: f64,
    /// Mean `quality_score` per run.
    pub average_quality_score: f64,
    /// The five most frequent error codes, most frequent first.
    pub top_error_codes: Vec<ErrorCodeCount>,
}

impl ValidationStats {
    /// The all-zero statistics an empty history produces.
    pub fn empty() -> Self {
        Self {
            total: 0,
            error_rate: 0.0,
            average_processing_time: 0.0,
            average_quality_score: 0.0,
            top_error_codes: Vec::new(),
        }
    }
}

/// Compute statistics over a history window.
pub fn compute<'a>(entries: impl Iterator<Item = &'a HistoryEntry>) -> ValidationStats {
    let mut total = 0usize;
    let mut error_sum = 0usize;
    let mut time_sum = 0u64;
    let mut quality_sum = 0u64;
    let mut code_counts: HashMap<FindingCode, usize> = HashMap::new();

    for entry in entries {
        total += 1;
        error_sum += entry.result.errors.len();
        time_sum += entry.result.processing_time_ms;
        quality_sum += u64::from(entry.result.quality_score);
        for finding in &entry.result.errors {
            *code_counts.entry(finding.code).or_default() += 1;
        }
    }

    if total == 0 {
        return ValidationStats::empty();
    }

    let mut top: Vec<ErrorCodeCount> = code_counts
        .into_iter()
        .map(|(code, count)| ErrorCodeCount { code, count })
        .collect();
    // Count descending; canonical code order breaks ties so the output is
    // deterministic across runs.
    top.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| code_index(a.code).cmp(&code_index(b.code)))
    });
    top.truncate(5);

    let n = total as f64;
    ValidationStats {
        total,
        error_rate: error_sum as f64 / n,
        average_processing_time: time_sum as f64 / n,
        average_quality_score: quality_sum as f64 / n,
        top_error_codes: top,
    }
}

fn code_index(code: FindingCode) -> usize {
    FindingCode::all_codes().iter().position(|c| *c == code).unwrap_or(usize::MAX)
}
