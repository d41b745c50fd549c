//! # Schema Registry — Per-Entity Field Rule Tables
//!
//! One ordered `'static` table of field rules per entity kind: the fixed
//! base set every record carries (id, name, status, created_at,
//! updated_at) followed by entity-specific rules in declaration order.
//! [`rules_for`] is pure and total over all seven kinds — the dispatch is
//! an exhaustive `match`, so a new `EntityKind` variant will not compile
//! until it gets a table.
//!
//! ## Base rule decisions
//!
//! `id` and `created_at` are optional because the store assigns them;
//! `name`, `status`, and `updated_at` are required. `status` and
//! `updated_at` carry default fixes so a missing value is deterministic to
//! repair, and the date fields carry `NormalizeDate` so equivalent date
//! spellings converge on one canonical form.

use croft_core::EntityKind;

use crate::schema::ValueSchema;

/// The deterministic correction attached to a field rule.
///
/// A fix does two jobs: it marks findings on this field as auto-fixable,
/// and it authorizes the engine to write a schema coercion back into its
/// working copy during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFix {
    /// Replace a parseable date value with its normalized RFC 3339 form.
    NormalizeDate,
    /// Replace a boolean-ish string with a real boolean.
    CoerceBool,
    /// Default a blank `status` to `"active"`.
    DefaultStatus,
    /// Default a blank `updated_at` to the current timestamp.
    DefaultNow,
}

/// One declarative per-field rule.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    /// The record field this rule governs.
    pub name: &'static str,
    /// The value constraint, checked when the field is present.
    pub schema: ValueSchema,
    /// Whether a blank value is an error.
    pub required: bool,
    /// Fields this one is meaningless without. Metadata for rule authors;
    /// the engine does not branch on it.
    pub depends_on: &'static [&'static str],
    /// Deterministic correction, when one exists.
    pub fix: Option<FieldFix>,
}

/// Base rules shared by every entity kind, in fixed order.
static BASE_RULES: &[FieldRule] = &[
    FieldRule {
        name: "id",
        schema: ValueSchema::Text { min_len: 1, max_len: 64 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "name",
        schema: ValueSchema::Text { min_len: 1, max_len: 200 },
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "status",
        schema: ValueSchema::OneOf(&["active", "inactive", "archived"]),
        required: true,
        depends_on: &[],
        fix: Some(FieldFix::DefaultStatus),
    },
    FieldRule {
        name: "created_at",
        schema: ValueSchema::Date,
        required: false,
        depends_on: &[],
        fix: Some(FieldFix::NormalizeDate),
    },
    FieldRule {
        name: "updated_at",
        schema: ValueSchema::Date,
        required: true,
        depends_on: &[],
        fix: Some(FieldFix::DefaultNow),
    },
];

static ANIMAL_RULES: &[FieldRule] = &[
    FieldRule {
        name: "species",
        schema: ValueSchema::OneOf(&["cattle", "sheep", "goat", "pig", "chicken", "horse"]),
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "breed",
        schema: ValueSchema::Text { min_len: 1, max_len: 100 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "age",
        schema: ValueSchema::Number { min: Some(0.0), max: Some(40.0) },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "weight",
        schema: ValueSchema::Number { min: Some(0.0), max: Some(2000.0) },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "gender",
        schema: ValueSchema::OneOf(&["male", "female"]),
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "birth_date",
        schema: ValueSchema::Date,
        required: false,
        depends_on: &[],
        fix: Some(FieldFix::NormalizeDate),
    },
    FieldRule {
        name: "health_status",
        schema: ValueSchema::OneOf(&["healthy", "sick", "recovering", "quarantined"]),
        required: false,
        depends_on: &[],
        fix: None,
    },
];

static CROP_RULES: &[FieldRule] = &[
    FieldRule {
        name: "crop_type",
        schema: ValueSchema::Text { min_len: 1, max_len: 100 },
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "variety",
        schema: ValueSchema::Text { min_len: 1, max_len: 100 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "planting_date",
        schema: ValueSchema::Date,
        required: true,
        depends_on: &[],
        fix: Some(FieldFix::NormalizeDate),
    },
    FieldRule {
        name: "expected_harvest_date",
        schema: ValueSchema::Date,
        required: false,
        depends_on: &["planting_date"],
        fix: Some(FieldFix::NormalizeDate),
    },
    FieldRule {
        name: "field_id",
        schema: ValueSchema::Text { min_len: 1, max_len: 64 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "area_planted",
        schema: ValueSchema::Number { min: Some(0.0), max: None },
        required: false,
        depends_on: &[],
        fix: None,
    },
];

static TASK_RULES: &[FieldRule] = &[
    FieldRule {
        name: "assignee",
        schema: ValueSchema::Text { min_len: 1, max_len: 200 },
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "due_date",
        schema: ValueSchema::Date,
        required: true,
        depends_on: &[],
        fix: Some(FieldFix::NormalizeDate),
    },
    FieldRule {
        name: "priority",
        schema: ValueSchema::OneOf(&["urgent", "high", "medium", "low"]),
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "description",
        schema: ValueSchema::Text { min_len: 1, max_len: 2000 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "category",
        schema: ValueSchema::Text { min_len: 1, max_len: 100 },
        required: false,
        depends_on: &[],
        fix: None,
    },
];

static INVENTORY_RULES: &[FieldRule] = &[
    FieldRule {
        name: "quantity",
        schema: ValueSchema::Number { min: Some(0.0), max: None },
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "unit",
        schema: ValueSchema::Text { min_len: 1, max_len: 50 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "min_stock",
        schema: ValueSchema::Number { min: Some(0.0), max: None },
        required: false,
        depends_on: &["quantity"],
        fix: None,
    },
    FieldRule {
        name: "unit_price",
        schema: ValueSchema::Number { min: Some(0.0), max: None },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "category",
        schema: ValueSchema::Text { min_len: 1, max_len: 100 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "expiry_date",
        schema: ValueSchema::Date,
        required: false,
        depends_on: &[],
        fix: Some(FieldFix::NormalizeDate),
    },
];

static FARM_RULES: &[FieldRule] = &[
    FieldRule {
        name: "location",
        schema: ValueSchema::Text { min_len: 1, max_len: 500 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "size_hectares",
        schema: ValueSchema::Number { min: Some(0.0), max: None },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "farm_type",
        schema: ValueSchema::OneOf(&["crop", "livestock", "mixed", "orchard"]),
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "owner",
        schema: ValueSchema::Text { min_len: 1, max_len: 200 },
        required: false,
        depends_on: &[],
        fix: None,
    },
];

static USER_RULES: &[FieldRule] = &[
    FieldRule {
        name: "email",
        schema: ValueSchema::Email,
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "role",
        schema: ValueSchema::OneOf(&["admin", "manager", "worker", "viewer"]),
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "phone",
        schema: ValueSchema::Text { min_len: 5, max_len: 30 },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "is_active",
        schema: ValueSchema::Boolean,
        required: false,
        depends_on: &[],
        fix: Some(FieldFix::CoerceBool),
    },
];

static WEATHER_RULES: &[FieldRule] = &[
    FieldRule {
        name: "temperature",
        schema: ValueSchema::Number { min: Some(-60.0), max: Some(60.0) },
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "condition",
        schema: ValueSchema::OneOf(&["sunny", "cloudy", "rainy", "snowy", "stormy", "foggy"]),
        required: true,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "humidity",
        schema: ValueSchema::Number { min: Some(0.0), max: Some(100.0) },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "wind_speed",
        schema: ValueSchema::Number { min: Some(0.0), max: None },
        required: false,
        depends_on: &[],
        fix: None,
    },
    FieldRule {
        name: "recorded_at",
        schema: ValueSchema::Date,
        required: false,
        depends_on: &[],
        fix: Some(FieldFix::NormalizeDate),
    },
];

/// The entity-specific table for a kind.
fn specific_rules(kind: EntityKind) -> &'static [FieldRule] {
    match kind {
        EntityKind::Animal => ANIMAL_RULES,
        EntityKind::Crop => CROP_RULES,
        EntityKind::Task => TASK_RULES,
        EntityKind::Inventory => INVENTORY_RULES,
        EntityKind::Farm => FARM_RULES,
        EntityKind::User => USER_RULES,
        EntityKind::Weather => WEATHER_RULES,
    }
}

/// All field rules for a kind: the base set followed by the
/// entity-specific set, in declaration order.
pub fn rules_for(kind: EntityKind) -> impl Iterator<Item = &'static FieldRule> {
    BASE_RULES.iter().chain(specific_rules(kind).iter())
}

/// Total number of field rules for a kind. The scorer's field universe.
pub fn field_count(kind: EntityKind) -> usize {
    BASE_RULES.len() + specific_rules(kind).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_total_for_all_kinds() {
        for kind in EntityKind::all_kinds() {
            let rules: Vec<_> = rules_for(*kind).collect();
            assert!(!rules.is_empty());
            assert_eq!(rules.len(), field_count(*kind));
        }
    }

    #[test]
    fn test_base_rules_come_first() {
        for kind in EntityKind::all_kinds() {
            let names: Vec<&str> = rules_for(*kind).map(|r| r.name).collect();
            assert_eq!(
                &names[..5],
                &["id", "name", "status", "created_at", "updated_at"],
                "base rules out of order for {kind}"
            );
        }
    }

    #[test]
    fn test_field_names_unique_per_kind() {
        for kind in EntityKind::all_kinds() {
            let mut seen = HashSet::new();
            for rule in rules_for(*kind) {
                assert!(seen.insert(rule.name), "duplicate rule for {} on {kind}", rule.name);
            }
        }
    }

    #[test]
    fn test_dependencies_name_known_fields() {
        for kind in EntityKind::all_kinds() {
            let names: HashSet<&str> = rules_for(*kind).map(|r| r.name).collect();
            for rule in rules_for(*kind) {
                for dep in rule.depends_on {
                    assert!(
                        names.contains(dep),
                        "rule {} on {kind} depends on unknown field {dep}",
                        rule.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_required_field_sets_per_kind() {
        let required = |kind: EntityKind| -> Vec<&str> {
            rules_for(kind).filter(|r| r.required).map(|r| r.name).collect()
        };
        // Task: name, status, updated_at + assignee, due_date, priority.
        assert_eq!(
            required(EntityKind::Task),
            vec!["name", "status", "updated_at", "assignee", "due_date", "priority"]
        );
        assert_eq!(
            required(EntityKind::Animal),
            vec!["name", "status", "updated_at", "species"]
        );
        assert_eq!(
            required(EntityKind::Weather),
            vec!["name", "status", "updated_at", "temperature", "condition"]
        );
    }

    #[test]
    fn test_default_fixes_on_status_and_updated_at() {
        let by_name = |name: &str| {
            rules_for(EntityKind::Farm).find(|r| r.name == name).unwrap()
        };
        assert_eq!(by_name("status").fix, Some(FieldFix::DefaultStatus));
        assert_eq!(by_name("updated_at").fix, Some(FieldFix::DefaultNow));
        assert_eq!(by_name("created_at").fix, Some(FieldFix::NormalizeDate));
        assert_eq!(by_name("name").fix, None);
    }

    #[test]
    fn test_animal_weight_bound_is_2000() {
        let weight = rules_for(EntityKind::Animal).find(|r| r.name == "weight").unwrap();
        assert_eq!(weight.schema, ValueSchema::Number { min: Some(0.0), max: Some(2000.0) });
        assert!(!weight.required);
    }

    #[test]
    fn test_date_rules_carry_normalize_fix() {
        for kind in EntityKind::all_kinds() {
            for rule in rules_for(*kind) {
                if rule.schema == ValueSchema::Date && rule.name != "updated_at" {
                    assert_eq!(
                        rule.fix,
                        Some(FieldFix::NormalizeDate),
                        "date rule {} on {kind} has no normalize fix",
                        rule.name
                    );
                }
            }
        }
    }
}
