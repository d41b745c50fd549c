//! # Temporal Helpers — Flexible Date Parsing, UTC-Only Output
//!
//! Farm records carry dates in whatever shape the source system produced:
//! RFC 3339 strings, bare `YYYY-MM-DD` dates, epoch seconds from mobile
//! clients, and the occasional slash-separated format in import files.
//!
//! Two parsers cover this, mirroring the strict/lenient split used for
//! timestamps elsewhere in the stack:
//!
//! - [`parse_date_value`] / [`parse_date_str`] — the formats the field
//!   schema *accepts*: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD`,
//!   and integer epoch seconds. Naive inputs are assumed UTC.
//! - [`parse_date_lenient`] — everything above plus slash-separated and
//!   space-separated formats. Used by the auto-fix engine, which must be
//!   able to repair strings the schema rejected.
//!
//! All output is normalized to `YYYY-MM-DDTHH:MM:SSZ`, truncated to
//! seconds, so that coerced records canonicalize deterministically.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde_json::Value;

/// Naive formats accepted by the schema date check.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S"];

/// Extra formats only the lenient parser accepts.
const LENIENT_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S"];
const LENIENT_DATE_FORMATS: &[&str] = &["%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Parse a date out of a JSON value.
///
/// Strings go through [`parse_date_str`]; integers are interpreted as
/// Unix epoch seconds. Everything else is not a date.
pub fn parse_date_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s),
        Value::Number(n) => {
            let secs = n.as_i64()?;
            DateTime::from_timestamp(secs, 0)
        }
        _ => None,
    }
}

/// Parse a date string in one of the schema-accepted formats.
///
/// Accepts RFC 3339 (any offset, converted to UTC), naive
/// `YYYY-MM-DDTHH:MM:SS` (assumed UTC), and bare `YYYY-MM-DD`
/// (midnight UTC). Sub-second precision is truncated.
pub fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(truncate_to_seconds(dt.with_timezone(&Utc)));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(truncate_to_seconds(naive.and_utc()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }

    None
}

/// Parse a date string leniently.
///
/// Everything [`parse_date_str`] accepts, plus space-separated datetimes
/// and slash-separated dates. Day-first is tried before month-first for
/// ambiguous slash dates, so `03/04/2026` parses as 3 April. Used by the
/// auto-fix engine to repair values the schema rejected.
pub fn parse_date_lenient(s: &str) -> Option<DateTime<Utc>> {
    if let Some(dt) = parse_date_str(s) {
        return Some(dt);
    }

    let s = s.trim();

    for fmt in LENIENT_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(truncate_to_seconds(naive.and_utc()));
        }
    }

    for fmt in LENIENT_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
        }
    }

    None
}

/// Render a UTC datetime as `YYYY-MM-DDTHH:MM:SSZ`.
///
/// This is the single normalized form written back into records by
/// coercion and auto-fix, keeping canonical cache keys stable across
/// equivalent inputs.
pub fn to_iso8601(dt: DateTime<Utc>) -> String {
    truncate_to_seconds(dt).format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
