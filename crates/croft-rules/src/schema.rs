//! # Value Schemas — Closed Per-Field Constraint Set
//!
//! `ValueSchema` enumerates every constraint shape a field rule can carry.
//! Checking a value is an exhaustive match over this enum; there is no
//! schema-document interpreter and nothing reflective.
//!
//! A check produces zero or more violations plus, independently, an
//! optional *coercion*: the normalized value the engine may write into its
//! working copy when the rule carries a fix (numeric strings to numbers,
//! date strings to the normalized RFC 3339 form, `"true"` to `true`,
//! mixed-case enum values to their lowercase canonical form). A value can
//! coerce and still be in violation — `"9000"` coerces to a number and
//! violates a `max` bound.

use serde_json::Value;

use croft_core::temporal;

/// The constraint attached to one field rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueSchema {
    /// A string with character-count bounds.
    Text {
        /// Minimum length, inclusive.
        min_len: usize,
        /// Maximum length, inclusive.
        max_len: usize,
    },
    /// A number with optional inclusive bounds. Numeric strings coerce.
    Number {
        /// Lower bound, inclusive.
        min: Option<f64>,
        /// Upper bound, inclusive.
        max: Option<f64>,
    },
    /// A boolean. The strings `"true"`, `"false"`, `"1"`, `"0"` coerce.
    Boolean,
    /// A date in one of the accepted formats; coerces to normalized
    /// RFC 3339 (`YYYY-MM-DDTHH:MM:SSZ`).
    Date,
    /// One of a fixed set of lowercase values; mixed case coerces.
    OneOf(&'static [&'static str]),
    /// An email address (containment check, not full RFC 5322).
    Email,
}

/// The outcome of checking one value against one schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaCheck {
    /// Human-readable constraint violations, one per violated constraint.
    /// Messages omit the field name; the engine prefixes it.
    pub violations: Vec<String>,
    /// The normalized value, when the input was acceptable in a
    /// non-canonical form.
    pub coerced: Option<Value>,
}

impl SchemaCheck {
    fn ok() -> Self {
        Self::default()
    }

    fn violation(message: impl Into<String>) -> Self {
        Self { violations: vec![message.into()], coerced: None }
    }

    /// True when no constraint was violated.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

impl ValueSchema {
    /// Check a present, non-blank value against this schema.
    ///
    /// Blank handling (absent/null/empty) happens before this is called;
    /// `check` only sees real values.
    pub fn check(&self, value: &Value) -> SchemaCheck {
        match self {
            Self::Text { min_len, max_len } => check_text(value, *min_len, *max_len),
            Self::Number { min, max } => check_number(value, *min, *max),
            Self::Boolean => check_boolean(value),
            Self::Date => check_date(value),
            Self::OneOf(allowed) => check_one_of(value, allowed),
            Self::Email => check_email(value),
        }
    }
}

fn check_text(value: &Value, min_len: usize, max_len: usize) -> SchemaCheck {
    let Some(s) = value.as_str() else {
        return SchemaCheck::violation("must be text");
    };
    let len = s.chars().count();
    let mut check = SchemaCheck::ok();
    if len < min_len {
        check
            .violations
            .push(format!("must be at least {min_len} characters, got {len}"));
    }
    if len > max_len {
        check
            .violations
            .push(format!("must be at most {max_len} characters, got {len}"));
    }
    check
}

fn check_number(value: &Value, min: Option<f64>, max: Option<f64>) -> SchemaCheck {
    let (n, coerced) = match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) => (f, None),
            None => return SchemaCheck::violation("must be a representable number"),
        },
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => match serde_json::Number::from_f64(f) {
                Some(n) => (f, Some(Value::Number(n))),
                None => return SchemaCheck::violation("must be a number"),
            },
            _ => return SchemaCheck::violation("must be a number"),
        },
        _ => return SchemaCheck::violation("must be a number"),
    };

    let mut check = SchemaCheck { violations: Vec::new(), coerced };
    if let Some(min) = min {
        if n < min {
            check.violations.push(format!("must be at least {min}, got {n}"));
        }
    }
    if let Some(max) = max {
        if n > max {
            check.violations.push(format!("must be at most {max}, got {n}"));
        }
    }
    check
}

fn check_boolean(value: &Value) -> SchemaCheck {
    match value {
        Value::Bool(_) => SchemaCheck::ok(),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => SchemaCheck { violations: Vec::new(), coerced: Some(Value::Bool(true)) },
            "false" | "0" => {
                SchemaCheck { violations: Vec::new(), coerced: Some(Value::Bool(false)) }
            }
            _ => SchemaCheck::violation("must be a boolean"),
        },
        _ => SchemaCheck::violation("must be a boolean"),
    }
}

fn check_date(value: &Value) -> SchemaCheck {
    match temporal::parse_date_value(value) {
        Some(dt) => {
            let normalized = temporal::to_iso8601(dt);
            let already_normalized = value.as_str() == Some(normalized.as_str());
            SchemaCheck {
                violations: Vec::new(),
                coerced: if already_normalized { None } else { Some(Value::String(normalized)) },
            }
        }
        None => SchemaCheck::violation(
            "must be a valid date (RFC 3339, YYYY-MM-DD, or epoch seconds)",
        ),
    }
}

fn check_one_of(value: &Value, allowed: &'static [&'static str]) -> SchemaCheck {
    let Some(s) = value.as_str() else {
        return SchemaCheck::violation(format!("must be one of: {}", allowed.join(", ")));
    };
    if allowed.contains(&s) {
        return SchemaCheck::ok();
    }
    let lowered = s.trim().to_lowercase();
    if allowed.contains(&lowered.as_str()) {
        return SchemaCheck { violations: Vec::new(), coerced: Some(Value::String(lowered)) };
    }
    SchemaCheck::violation(format!("must be one of: {}", allowed.join(", ")))
}

fn check_email(value: &Value) -> SchemaCheck {
    let Some(s) = value.as_str() else {
        return SchemaCheck::violation("must be an email address");
    };
    let valid = match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };
    if valid {
        SchemaCheck::ok()
    } else {
        SchemaCheck::violation("must be a valid email address")
    }
}
