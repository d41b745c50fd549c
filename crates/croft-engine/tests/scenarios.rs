//! End-to-end validation scenarios across entity kinds.
//!
//! These exercise the engine the way an import pipeline would: build a
//! record, validate it under a pinned-clock context, and assert on the
//! classified findings and scores.

use chrono::{TimeZone, Utc};
use croft_core::{EntityKind, FindingCode, OperationKind, Record, ValidationContext};
use croft_engine::{auto_fix_data, ValidationEngine, HISTORY_CAPACITY};
use serde_json::json;

fn ctx(kind: EntityKind, op: OperationKind) -> ValidationContext {
    ValidationContext::new(kind, op)
        .with_timestamp(Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap())
}

fn record(value: serde_json::Value) -> Record {
    Record::from_value(value).unwrap()
}

#[tokio::test]
async fn overweight_cattle_warns_without_blocking() {
    let mut engine = ValidationEngine::new();
    let r = record(json!({
        "name": "Bess",
        "status": "active",
        "updated_at": "2026-06-01T00:00:00Z",
        "species": "cattle",
        "age": 5,
        "weight": 2000,
    }));
    let result = engine.validate_data(&r, &ctx(EntityKind::Animal, OperationKind::Create)).await;

    // Weight is within schema bounds but more than 50% off the reference
    // curve (cattle at 5 years: 1000 kg expected), so it warns only.
    assert!(result.is_valid, "errors: {:?}", result.errors);
    let warning = result
        .warnings
        .iter()
        .find(|f| f.code == FindingCode::AgeWeightMismatch)
        .expect("age/weight warning");
    assert_eq!(warning.expected, Some(json!(1000.0)));
    assert!(!warning.auto_fixable);
}

#[tokio::test]
async fn task_with_only_base_fields_misses_its_specific_requirements() {
    let mut engine = ValidationEngine::new();
    let r = record(json!({
        "name": "Fix fence",
        "status": "pending",
        "updated_at": "2026-06-01T00:00:00Z",
    }));
    let result = engine.validate_data(&r, &ctx(EntityKind::Task, OperationKind::Create)).await;

    assert!(!result.is_valid);
    let missing: Vec<&str> = result
        .errors
        .iter()
        .filter(|f| f.code == FindingCode::RequiredFieldMissing)
        .map(|f| f.field.as_str())
        .collect();
    assert_eq!(missing, vec!["assignee", "due_date", "priority"]);
}

#[tokio::test]
async fn depleted_stock_blocks_while_low_stock_only_warns() {
    let mut engine = ValidationEngine::new();
    let c = ctx(EntityKind::Inventory, OperationKind::Update);

    let depleted = record(json!({
        "name": "Feed pellets",
        "status": "active",
        "updated_at": "2026-06-01T00:00:00Z",
        "quantity": 0,
        "min_stock": 10,
    }));
    let result = engine.validate_data(&depleted, &c).await;
    assert!(!result.is_valid);
    assert!(result.errors.iter().any(|f| f.code == FindingCode::LowStock));

    let low = record(json!({
        "name": "Feed pellets",
        "status": "active",
        "updated_at": "2026-06-01T00:00:00Z",
        "quantity": 3,
        "min_stock": 10,
    }));
    let result = engine.validate_data(&low, &c).await;
    assert!(result.is_valid);
    assert!(result.warnings.iter().any(|f| f.code == FindingCode::LowStock));
}

#[tokio::test]
async fn cold_snowy_weather_is_plausible() {
    let mut engine = ValidationEngine::new();
    let r = record(json!({
        "name": "Morning reading",
        "status": "active",
        "updated_at": "2026-06-01T00:00:00Z",
        "temperature": -2,
        "condition": "snowy",
        "humidity": 50,
    }));
    let result = engine.validate_data(&r, &ctx(EntityKind::Weather, OperationKind::Create)).await;
    assert!(result.is_valid);
    assert!(!result
        .findings()
        .any(|f| f.code == FindingCode::WeatherInconsistency
            || f.code == FindingCode::HumidityInconsistency));
}

#[tokio::test]
async fn warm_snowy_weather_is_not() {
    let mut engine = ValidationEngine::new();
    let r = record(json!({
        "name": "Odd reading",
        "status": "active",
        "updated_at": "2026-06-01T00:00:00Z",
        "temperature": 12,
        "condition": "snowy",
    }));
    let result = engine.validate_data(&r, &ctx(EntityKind::Weather, OperationKind::Create)).await;
    assert!(result.is_valid);
    assert!(result
        .warnings
        .iter()
        .any(|f| f.code == FindingCode::WeatherInconsistency));
}

#[tokio::test]
async fn import_flow_fixes_then_revalidates_clean() {
    let mut engine = ValidationEngine::new();
    let c = ctx(EntityKind::User, OperationKind::Import);
    let r = record(json!({
        "name": "Ada",
        "email": "ada@croft.example",
        "is_active": "true",
        "created_at": "01/06/2026",
    }));

    let first = engine.validate_data(&r, &c).await;
    assert!(!first.is_valid);
    assert!(first.errors.iter().any(|f| f.field == "status" && f.auto_fixable));
    assert!(first.errors.iter().any(|f| f.field == "created_at" && f.auto_fixable));

    let fixed = auto_fix_data(&r, &first.errors);
    let second = engine.validate_data(&fixed, &c).await;
    assert!(second.is_valid, "errors after fixing: {:?}", second.errors);
    assert_eq!(fixed.text("status"), Some("active"));
    assert_eq!(fixed.text("created_at"), Some("2026-06-01T00:00:00Z"));
}

#[tokio::test]
async fn quality_degrades_with_each_error() {
    let mut engine = ValidationEngine::new();
    let c = ctx(EntityKind::Farm, OperationKind::Create);

    let clean = record(json!({
        "name": "Hill Croft",
        "status": "active",
        "updated_at": "2026-06-01T00:00:00Z",
    }));
    let good = engine.validate_data(&clean, &c).await;

    let bad = engine.validate_data(&record(json!({})), &c).await;

    assert!(good.quality_score > bad.quality_score);
    assert!(good.confidence > bad.confidence);
    assert_eq!(good.quality_score, 98);
}

#[tokio::test]
async fn batch_results_line_up_with_input_order() {
    let mut engine = ValidationEngine::new();
    let c = ctx(EntityKind::Crop, OperationKind::Bulk);
    let records = vec![
        record(json!({
            "name": "North field wheat",
            "status": "active",
            "updated_at": "2026-06-01T00:00:00Z",
            "crop_type": "wheat",
            "planting_date": "2026-03-01T00:00:00Z",
        })),
        record(json!({"name": "Bare entry"})),
    ];
    let outcomes = engine.validate_batch(&records, &c).await;
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].index, 0);
    assert_eq!(outcomes[1].index, 1);
    assert!(outcomes[0].result.is_valid);
    assert!(!outcomes[1].result.is_valid);
}

#[tokio::test]
async fn stats_window_is_bounded_and_shaped() {
    let mut engine = ValidationEngine::new();
    assert_eq!(engine.stats().total, 0);
    assert_eq!(engine.stats().error_rate, 0.0);

    let c = ctx(EntityKind::Farm, OperationKind::Import);
    for i in 0..(HISTORY_CAPACITY + 20) {
        let r = record(json!({"name": format!("farm-{i}")}));
        engine.validate_data(&r, &c).await;
    }

    let stats = engine.stats();
    assert_eq!(stats.total, HISTORY_CAPACITY);
    // Every record above misses status and updated_at.
    assert_eq!(stats.error_rate, 2.0);
    assert!(stats
        .top_error_codes
        .iter()
        .any(|e| e.code == FindingCode::RequiredFieldMissing));
    assert!(stats.average_quality_score < 98.0);
}

#[tokio::test]
async fn identical_submissions_share_one_cached_result() {
    let mut engine = ValidationEngine::new();
    let c = ctx(EntityKind::Animal, OperationKind::Create);
    let r = record(json!({
        "name": "Bess",
        "status": "active",
        "updated_at": "2026-06-01T00:00:00Z",
        "species": "cattle",
    }));

    let first = engine.validate_data(&r, &c).await;
    let second = engine.validate_data(&r, &c).await;
    assert_eq!(first, second);
    assert_eq!(engine.cache_len(), 1);

    engine.clear_cache();
    assert_eq!(engine.cache_len(), 0);
    let third = engine.validate_data(&r, &c).await;
    assert_eq!(third.errors, first.errors);
    assert_eq!(third.warnings, first.warnings);
}
