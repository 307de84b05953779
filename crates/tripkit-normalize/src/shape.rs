//! Structural helpers shared by hotel, place and day extraction.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::keys::key_matches;

/// Matches keys and labels such as `Day 3`, `day_3`, `DAY-03`.
pub(crate) static DAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*day[\s_-]*0*(\d+)").expect("valid regex"));

/// One element of a coerced collection, with the object key it was stored
/// under when the collection was an object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry<'a> {
    pub(crate) label: Option<&'a str>,
    pub(crate) value: &'a Value,
}

/// Scalar fields that mark an object as a hotel, place or day record.
const RECORD_KEYS: &[&str] = &[
    "name",
    "title",
    "hotelName",
    "hotel",
    "propertyName",
    "placeName",
    "activity",
    "attraction",
    "address",
    "hotelAddress",
    "placeAddress",
    "description",
    "descriptions",
    "details",
    "placeDetails",
    "price",
    "ticketPricing",
    "time",
    "day",
    "dayNumber",
    "dayLabel",
    "label",
    "dayTitle",
    "theme",
];

/// Treats arrays and keyed objects as ordered collections.
///
/// Scalar members of a keyed object are metadata and are skipped. Any other
/// non-empty object is a single record. Scalars and empty objects yield
/// nothing.
pub(crate) fn coerce_entries(value: &Value) -> Vec<Entry<'_>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|value| Entry { label: None, value })
            .collect(),
        Value::Object(map) if is_keyed_collection(value) => map
            .iter()
            .filter(|(_, value)| is_structured(value))
            .map(|(key, value)| Entry {
                label: Some(key.as_str()),
                value,
            })
            .collect(),
        Value::Object(map) if map.is_empty() => Vec::new(),
        Value::Object(_) => vec![Entry {
            label: None,
            value,
        }],
        _ => Vec::new(),
    }
}

/// An object with at least one array or object member and no scalar record
/// field of its own. Scalar siblings such as `summary` or `note` do not
/// turn a collection into a record.
pub(crate) fn is_keyed_collection(value: &Value) -> bool {
    let Value::Object(map) = value else {
        return false;
    };
    map.values().any(is_structured)
        && !map
            .iter()
            .any(|(key, value)| !is_structured(value) && key_matches(key, RECORD_KEYS))
}

pub(crate) fn is_structured(value: &Value) -> bool {
    value.is_array() || value.is_object()
}

/// A key usable as a human label: not blank, not a bare index, not a day key.
pub(crate) fn usable_label(key: &str) -> Option<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty()
        || trimmed.chars().all(|c| c.is_ascii_digit())
        || DAY_PATTERN.is_match(trimmed)
    {
        None
    } else {
        Some(trimmed)
    }
}

/// Canonical `Day N` for a raw label, if it starts with a day pattern or is
/// a bare positive integer.
pub(crate) fn day_label_from(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let digits = DAY_PATTERN
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .or_else(|| {
            (!trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())).then_some(trimmed)
        })?;
    let number = digits.parse::<u64>().ok()?;
    (number > 0).then(|| format!("Day {number}"))
}

/// Trimmed, lower-cased identity component.
pub(crate) fn identity_part(value: Option<&String>) -> String {
    value.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}
