//! Monetary amount and day-count coercion from free-form JSON.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid regex"));

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[+-]?\d+").expect("valid regex"));

/// Amount-bearing keys, tried in order before any other value of an object.
const AMOUNT_KEYS: &[&str] = &[
    "amount",
    "price",
    "cost",
    "value",
    "ticketPricing",
    "transportCost",
    "estimatedBudget",
    "totalBudget",
    "budgetEstimate",
    "budget",
];

/// Coerces any JSON value to a non-negative amount.
///
/// - numbers are taken as-is;
/// - strings yield their first decimal number after removing thousands
///   separators (`"₹1,200.50 per night"` → `1200.5`);
/// - arrays sum their elements;
/// - objects yield the first positive amount-bearing key, else the first
///   positive value of any key.
///
/// Anything unparseable, negative or non-finite yields `0.0`.
#[must_use]
pub fn extract_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Null | Value::Bool(_) => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(text) => amount_from_text(text),
        Value::Array(items) => items.iter().map(extract_amount).sum(),
        Value::Object(map) => amount_from_object(map),
    };
    if amount.is_finite() {
        amount.max(0.0)
    } else {
        0.0
    }
}

fn amount_from_text(text: &str) -> f64 {
    let cleaned = text.replace(',', "");
    NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn amount_from_object(map: &Map<String, Value>) -> f64 {
    AMOUNT_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .chain(map.values())
        .map(extract_amount)
        .find(|amount| *amount > 0.0)
        .unwrap_or(0.0)
}

/// First positive amount among `keys` of `obj`, or `0.0`.
pub(crate) fn first_positive(obj: &Map<String, Value>, keys: &[&str]) -> f64 {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .map(extract_amount)
        .find(|amount| *amount > 0.0)
        .unwrap_or(0.0)
}

/// Trip length in days: the leading integer of a string or the truncated
/// value of a number, defaulting to 1 when missing, invalid or below 1.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn normalize_days(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(f64::trunc),
        Value::String(text) => LEADING_INT
            .find(text)
            .and_then(|m| m.as_str().trim().parse::<i64>().ok())
            .map(|n| n as f64),
        _ => None,
    };

    match parsed {
        Some(days) if days.is_finite() && days >= 1.0 => days.min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

/// Rounds a non-negative amount to the nearest whole unit.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn round_amount(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
#[path = "amount_test.rs"]
mod tests;
