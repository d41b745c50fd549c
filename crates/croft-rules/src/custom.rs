//! # Custom Rule Table — Cross-Field Business Rules
//!
//! Named rules encoding constraints no per-field schema can express:
//! correlations between fields, date arithmetic against the evaluation
//! timestamp, and stock-level comparisons. Each rule is tagged with the
//! entity kinds it applies to and carries a fixed severity and fixed
//! thresholds — none of this is configurable.
//!
//! Rules are registered once in [`custom_rules`] and evaluated in
//! registration order, unconditionally and independently: one rule's
//! outcome never skips another. A rule returns `None` when it has nothing
//! to say, including when the fields it reads are absent or unparseable —
//! missing-field and bad-type reporting belongs to the schema registry,
//! not to business rules.

use chrono::Duration;
use serde_json::json;

use croft_core::{EntityKind, Finding, FindingCode, Record, ValidationContext};

/// A named, entity-kind-scoped business rule.
pub struct CustomRule {
    /// Stable rule name; used as the finding's field for internal errors.
    pub name: &'static str,
    /// The entity kinds this rule evaluates for.
    pub applies_to: &'static [EntityKind],
    /// The rule body. Pure; returns `None` when the record passes.
    pub eval: fn(&Record, &ValidationContext) -> Option<Finding>,
}

/// All custom rules in registration order.
pub fn custom_rules() -> &'static [CustomRule] {
    CUSTOM_RULES
}

static CUSTOM_RULES: &[CustomRule] = &[
    CustomRule {
        name: "age_weight_correlation",
        applies_to: &[EntityKind::Animal],
        eval: age_weight_correlation,
    },
    CustomRule {
        name: "harvest_date_logic",
        applies_to: &[EntityKind::Crop],
        eval: harvest_date_logic,
    },
    CustomRule { name: "task_due_date", applies_to: &[EntityKind::Task], eval: task_due_date },
    CustomRule {
        name: "inventory_stock_level",
        applies_to: &[EntityKind::Inventory],
        eval: inventory_stock_level,
    },
    CustomRule {
        name: "weather_plausibility",
        applies_to: &[EntityKind::Weather],
        eval: weather_plausibility,
    },
];

/// Expected weight gain per year of age, in kg, for reference species.
/// Species not listed here are not checked.
const REFERENCE_WEIGHT_PER_YEAR: &[(&str, f64)] = &[
    ("cattle", 200.0),
    ("horse", 150.0),
    ("pig", 100.0),
    ("sheep", 25.0),
    ("goat", 20.0),
    ("chicken", 2.0),
];

/// Deviation from the expected weight beyond which a warning fires.
const WEIGHT_DEVIATION_LIMIT: f64 = 0.5;

/// Minimum growing days per crop type; anything else uses the default.
const MIN_GROWING_DAYS: &[(&str, i64)] = &[
    ("corn", 90),
    ("wheat", 120),
    ("rice", 110),
    ("potato", 90),
    ("tomato", 70),
    ("carrot", 70),
    ("lettuce", 45),
];
const DEFAULT_MIN_GROWING_DAYS: i64 = 60;

/// Minimum days of lead time per task priority.
const PRIORITY_LEAD_DAYS: &[(&str, i64)] =
    &[("urgent", 1), ("high", 3), ("medium", 7), ("low", 14)];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Animal: weight should track the species age-weight curve.
fn age_weight_correlation(record: &Record, _ctx: &ValidationContext) -> Option<Finding> {
    let species = record.text("species")?.trim().to_lowercase();
    let per_year = lookup(REFERENCE_WEIGHT_PER_YEAR, &species)?;
    let age = record.number("age")?;
    let weight = record.number("weight")?;

    let expected = age * per_year;
    if expected <= 0.0 {
        return None;
    }
    let deviation = (weight - expected).abs() / expected;
    if deviation <= WEIGHT_DEVIATION_LIMIT {
        return None;
    }

    Some(
        Finding::warning(
            FindingCode::AgeWeightMismatch,
            "weight",
            format!(
                "weight {weight} kg deviates more than 50% from the expected \
                 {expected} kg for a {age}-year-old {species}"
            ),
        )
        .with_observed(json!(weight))
        .with_expected(json!(expected))
        .with_suggestion("Double-check the weight and age against the animal's records"),
    )
}

/// Crop: the window between planting and harvest must cover the crop
/// type's minimum growing period.
fn harvest_date_logic(record: &Record, _ctx: &ValidationContext) -> Option<Finding> {
    let planting = record.date("planting_date")?;
    let harvest = record.date("expected_harvest_date")?;
    let growing_days = (harvest - planting).num_days();

    let crop_type = record.text("crop_type").map(|s| s.trim().to_lowercase());
    let minimum = crop_type
        .as_deref()
        .and_then(|t| lookup(MIN_GROWING_DAYS, t))
        .unwrap_or(DEFAULT_MIN_GROWING_DAYS);

    if growing_days >= minimum {
        return None;
    }

    Some(
        Finding::warning(
            FindingCode::HarvestTooEarly,
            "expected_harvest_date",
            format!(
                "only {growing_days} days between planting and harvest; \
                 this crop needs at least {minimum}"
            ),
        )
        .with_observed(json!(growing_days))
        .with_expected(json!(minimum)),
    )
}

/// Task: flag past-due tasks and due dates inside the priority's lead window.
fn task_due_date(record: &Record, ctx: &ValidationContext) -> Option<Finding> {
    let due = record.date("due_date")?;
    let now = ctx.timestamp;

    if now - due > Duration::days(1) {
        return Some(
            Finding::error(
                FindingCode::TaskOverdue,
                "due_date",
                format!("due date {} is more than 1 day in the past", due.format("%Y-%m-%d")),
            )
            .with_observed(json!(due.format("%Y-%m-%dT%H:%M:%SZ").to_string()))
            .with_suggestion("Complete the task or move its due date"),
        );
    }

    let priority = record.text("priority")?.trim().to_lowercase();
    let lead = lookup(PRIORITY_LEAD_DAYS, &priority)?;
    let days_until = (due - now).num_days();
    if priority != "urgent" && days_until < lead {
        return Some(
            Finding::warning(
                FindingCode::DueDateTooSoon,
                "due_date",
                format!(
                    "only {days_until} days until due; {priority}-priority tasks \
                     usually get at least {lead}"
                ),
            )
            .with_observed(json!(days_until))
            .with_expected(json!(lead)),
        );
    }

    None
}

/// Inventory: quantity at or below minimum stock. Error when the item is
/// fully out of stock, warning otherwise.
fn inventory_stock_level(record: &Record, _ctx: &ValidationContext) -> Option<Finding> {
    let quantity = record.number("quantity")?;
    let min_stock = record.number("min_stock")?;
    if quantity > min_stock {
        return None;
    }

    let finding = if quantity == 0.0 {
        Finding::error(FindingCode::LowStock, "quantity", "item is out of stock")
    } else {
        Finding::warning(
            FindingCode::LowStock,
            "quantity",
            format!("quantity {quantity} is at or below the minimum stock of {min_stock}"),
        )
    };
    Some(
        finding
            .with_observed(json!(quantity))
            .with_expected(json!(min_stock))
            .with_suggestion("Reorder before the item runs out"),
    )
}

/// Weather: cross-check condition against temperature and humidity.
fn weather_plausibility(record: &Record, _ctx: &ValidationContext) -> Option<Finding> {
    let condition = record.text("condition")?.trim().to_lowercase();

    if condition == "snowy" {
        let temperature = record.number("temperature")?;
        if temperature > 5.0 {
            return Some(
                Finding::warning(
                    FindingCode::WeatherInconsistency,
                    "condition",
                    format!("snowy conditions are implausible at {temperature}°C"),
                )
                .with_observed(json!(temperature))
                .with_expected(json!("temperature <= 5")),
            );
        }
    }

    if condition == "sunny" {
        let humidity = record.number("humidity")?;
        if humidity > 90.0 {
            return Some(
                Finding::info(
                    FindingCode::HumidityInconsistency,
                    "humidity",
                    format!("humidity {humidity}% is unusually high for sunny conditions"),
                )
                .with_observed(json!(humidity))
                .with_expected(json!("humidity <= 90")),
            );
        }
    }

    None
}
