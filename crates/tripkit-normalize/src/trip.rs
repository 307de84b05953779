//! Trip-level normalization entry points.
//!
//! Normalization is a view-time transform: inputs are never mutated, every
//! call builds a fresh canonical value from the raw trip.

use serde_json::{Map, Value};
use tripkit_core::config::DEFAULT_MAX_WALK_DEPTH;
use tripkit_core::{AppConfig, CanonicalTrip};

use crate::containers::discover_containers;
use crate::hotels::dedup_hotels;
use crate::itinerary::{extract_scope, merge_days};
use crate::parse::parse_trip_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Recursion bound for nested place and hotel search.
    pub max_walk_depth: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_walk_depth: DEFAULT_MAX_WALK_DEPTH,
        }
    }
}

impl From<&AppConfig> for NormalizeOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_walk_depth: config.max_walk_depth,
        }
    }
}

/// Canonical hotels and itinerary of `trip_data`: the root scope first, then
/// every location container not already read as hotels or days.
fn extract(trip_data: &Map<String, Value>, options: NormalizeOptions) -> CanonicalTrip {
    let mut hotels = Vec::new();
    let mut days = Vec::new();

    let consumed = extract_scope(
        trip_data,
        None,
        options.max_walk_depth,
        &mut days,
        &mut hotels,
    );

    for container in discover_containers(trip_data, &consumed) {
        tracing::debug!(
            key = container.root_key,
            location = %container.location,
            "found location container"
        );
        extract_scope(
            container.body,
            Some(&container.location),
            options.max_walk_depth,
            &mut days,
            &mut hotels,
        );
    }

    CanonicalTrip {
        hotels: dedup_hotels(hotels),
        itinerary: merge_days(days),
    }
}

/// Typed canonical view of one trip-data object, with default options.
#[must_use]
pub fn extract_canonical(trip_data: &Map<String, Value>) -> CanonicalTrip {
    extract_canonical_with(trip_data, NormalizeOptions::default())
}

#[must_use]
pub fn extract_canonical_with(
    trip_data: &Map<String, Value>,
    options: NormalizeOptions,
) -> CanonicalTrip {
    extract(trip_data, options)
}

/// Normalizes trip data into `{ hotels, itinerary, ...rest }`.
///
/// `hotels` and `itinerary` are replaced by the canonical lists,
/// `destination` and `location` survive only as strings, and every other key
/// passes through unchanged. Non-object input is returned unchanged.
#[must_use]
pub fn normalize_trip_data(trip_data: &Value) -> Value {
    normalize_trip_data_with(trip_data, NormalizeOptions::default())
}

#[must_use]
pub fn normalize_trip_data_with(trip_data: &Value, options: NormalizeOptions) -> Value {
    let Value::Object(map) = trip_data else {
        return trip_data.clone();
    };

    let canonical = extract(map, options);
    tracing::debug!(
        hotels = canonical.hotels.len(),
        days = canonical.itinerary.len(),
        "normalized trip data"
    );

    let mut out = Map::new();
    out.insert("hotels".to_string(), to_array(&canonical.hotels));
    out.insert("itinerary".to_string(), to_array(&canonical.itinerary));

    for (key, value) in map {
        if key == "hotels" || key == "itinerary" {
            continue;
        }
        if (key == "destination" || key == "location") && !value.is_string() {
            continue;
        }
        out.insert(key.clone(), value.clone());
    }

    Value::Object(out)
}

fn to_array<T: serde::Serialize>(items: &[T]) -> Value {
    serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new()))
}

/// Normalizes a whole trip record.
///
/// `tripData` is normalized (a JSON string is parsed best-effort first and
/// kept verbatim when that fails) and `userSelection.location` becomes an
/// object carrying the best destination label found.
#[must_use]
pub fn normalize_trip(trip: &Value) -> Value {
    normalize_trip_with(trip, NormalizeOptions::default())
}

#[must_use]
pub fn normalize_trip_with(trip: &Value, options: NormalizeOptions) -> Value {
    let Value::Object(record) = trip else {
        return trip.clone();
    };
    let mut out = record.clone();

    let parsed = match record.get("tripData") {
        Some(Value::String(raw)) => match parse_trip_text(raw) {
            Some(value @ Value::Object(_)) => Some(value),
            _ => {
                tracing::debug!("tripData string is not a JSON object; keeping raw text");
                None
            }
        },
        Some(value @ Value::Object(_)) => Some(value.clone()),
        _ => None,
    };
    if let Some(data) = parsed {
        out.insert(
            "tripData".to_string(),
            normalize_trip_data_with(&data, options),
        );
    }

    if let Some(label) = record_destination_label(&out) {
        apply_location_label(&mut out, label);
    }

    Value::Object(out)
}

/// Best-effort destination label of a trip record.
///
/// Prefers `userSelection.location.label`, then a string
/// `userSelection.location`, then string `tripData.destination` or
/// `tripData.location`. A string `tripData` is parsed for the lookup.
#[must_use]
pub fn destination_label(trip: &Value) -> Option<String> {
    trip.as_object().and_then(record_destination_label)
}

fn record_destination_label(trip: &Map<String, Value>) -> Option<String> {
    let non_blank = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let location = trip.get("userSelection").and_then(|s| s.get("location"));
    if let Some(label) = non_blank(location.and_then(|l| l.get("label"))) {
        return Some(label);
    }
    if let Some(label) = non_blank(location) {
        return Some(label);
    }

    let parsed;
    let trip_data = match trip.get("tripData") {
        Some(Value::String(raw)) => {
            parsed = parse_trip_text(raw);
            parsed.as_ref()
        }
        other => other,
    };
    non_blank(trip_data.and_then(|d| d.get("destination")))
        .or_else(|| non_blank(trip_data.and_then(|d| d.get("location"))))
}

fn apply_location_label(record: &mut Map<String, Value>, label: String) {
    let selection = record
        .entry("userSelection")
        .or_insert_with(|| Value::Object(Map::new()));
    if selection.is_null() {
        *selection = Value::Object(Map::new());
    }
    let Value::Object(selection) = selection else {
        return;
    };

    match selection.get_mut("location") {
        Some(Value::Object(existing)) => {
            let has_label = existing
                .get("label")
                .and_then(Value::as_str)
                .is_some_and(|s| !s.trim().is_empty());
            if !has_label {
                existing.insert("label".to_string(), Value::String(label));
            }
        }
        _ => {
            let mut fresh = Map::new();
            fresh.insert("label".to_string(), Value::String(label));
            selection.insert("location".to_string(), Value::Object(fresh));
        }
    }
}

#[cfg(test)]
#[path = "trip_test.rs"]
mod tests;
