//! Day discovery, canonical day labels and day merging.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tripkit_core::{Day, Hotel, Place};

use crate::containers::LOCATION_NAME_KEYS;
use crate::hotels::collect_scope_hotels;
use crate::keys::{find_collection, pick_text};
use crate::places::{
    collect_children, collect_places, dedup_places, looks_like_place, normalize_place,
    DAY_PLACE_KEYS,
};
use crate::shape::{coerce_entries, day_label_from, DAY_PATTERN};

/// Keys holding a whole-trip itinerary.
pub(crate) const ROOT_ITINERARY_KEYS: &[&str] = &[
    "itinerary",
    "itineraryPlan",
    "dailyItinerary",
    "dailyPlan",
    "dailyPlans",
    "dayPlan",
    "dayPlans",
    "dayWisePlan",
    "plan",
    "days",
    "schedule",
    "tripPlan",
];
const DAY_LABEL_KEYS: &[&str] = &["day", "dayNumber", "dayLabel", "label"];
const DAY_TITLE_KEYS: &[&str] = &["title", "dayTitle", "theme"];

/// One day entry as found in the input, before merging.
#[derive(Debug)]
pub(crate) struct RawDay {
    pub(crate) label: String,
    pub(crate) location: Option<String>,
    pub(crate) places: Vec<Place>,
}

/// Where a day entry was found.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DayScope<'a> {
    pub(crate) location: Option<&'a str>,
    pub(crate) max_depth: usize,
}

/// First label that canonicalizes, in priority order; otherwise positional.
fn canonical_label(candidates: &[Option<&str>], index: usize) -> String {
    candidates
        .iter()
        .flatten()
        .find_map(|raw| day_label_from(raw))
        .unwrap_or_else(|| format!("Day {}", index + 1))
}

/// Object keys that look like `Day N`, with array or object values.
pub(crate) fn day_pattern_entries(obj: &Map<String, Value>) -> Vec<(&str, &Value)> {
    obj.iter()
        .filter(|(key, value)| {
            DAY_PATTERN.is_match(key) && (value.is_array() || value.is_object())
        })
        .map(|(key, value)| (key.as_str(), value))
        .collect()
}

/// Collects every day of an itinerary collection.
pub(crate) fn collect_days(
    value: &Value,
    scope: DayScope<'_>,
    days: &mut Vec<RawDay>,
    hotels: &mut Vec<Hotel>,
) {
    for (index, entry) in coerce_entries(value).into_iter().enumerate() {
        collect_day_entry(entry.value, entry.label, index, scope, days, hotels);
    }
}

/// Collects one day entry. `key_label` is the key the entry was stored under,
/// `index` its position within its collection.
pub(crate) fn collect_day_entry(
    value: &Value,
    key_label: Option<&str>,
    index: usize,
    scope: DayScope<'_>,
    days: &mut Vec<RawDay>,
    hotels: &mut Vec<Hotel>,
) {
    match value {
        Value::Array(_) => {
            let mut places = Vec::new();
            collect_places(value, None, 1, scope.max_depth, &mut places);
            days.push(RawDay {
                label: canonical_label(&[key_label], index),
                location: scope.location.map(str::to_string),
                places,
            });
        }
        Value::Object(obj) => {
            let explicit = pick_text(obj, DAY_LABEL_KEYS);
            let title = pick_text(obj, DAY_TITLE_KEYS);
            let label = canonical_label(&[explicit.as_deref(), key_label, title.as_deref()], index);
            let location = pick_text(obj, LOCATION_NAME_KEYS)
                .or_else(|| scope.location.map(str::to_string));

            collect_scope_hotels(obj, Some(&label), scope.max_depth, hotels);

            let mut places = Vec::new();
            if let Some((_, list)) = find_collection(obj, DAY_PLACE_KEYS) {
                collect_places(list, None, 1, scope.max_depth, &mut places);
            } else if looks_like_place(obj) {
                places.extend(normalize_place(obj, None));
            } else {
                collect_children(obj, None, 0, scope.max_depth, &mut places);
            }

            days.push(RawDay {
                label,
                location,
                places,
            });
        }
        _ => tracing::debug!(index, "skipping non-structured day entry"),
    }
}

/// Merges raw days sharing a canonical label, in order of first appearance.
///
/// Place lists are concatenated and then deduplicated; days left without
/// places are dropped.
pub(crate) fn merge_days(raw_days: Vec<RawDay>) -> Vec<Day> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, (Option<String>, Vec<Place>)> = HashMap::new();

    for raw in raw_days {
        match grouped.get_mut(&raw.label) {
            Some((location, places)) => {
                if location.is_none() {
                    *location = raw.location;
                }
                places.extend(raw.places);
            }
            None => {
                order.push(raw.label.clone());
                grouped.insert(raw.label, (raw.location, raw.places));
            }
        }
    }

    order
        .into_iter()
        .filter_map(|label| {
            let (location, places) = grouped.remove(&label)?;
            let plan = dedup_places(places);
            if plan.is_empty() {
                tracing::debug!(day = %label, "dropping day without places");
                return None;
            }
            Some(Day {
                day: label,
                location,
                plan,
            })
        })
        .collect()
}

/// Extracts hotels and days from one scope (the trip root or a location
/// container) and returns the keys consumed.
pub(crate) fn extract_scope<'a>(
    obj: &'a Map<String, Value>,
    location: Option<&str>,
    max_depth: usize,
    days: &mut Vec<RawDay>,
    hotels: &mut Vec<Hotel>,
) -> Vec<&'a str> {
    let scope = DayScope {
        location,
        max_depth,
    };
    let mut consumed = collect_scope_hotels(obj, None, max_depth, hotels);

    if let Some((key, value)) = find_collection(obj, ROOT_ITINERARY_KEYS) {
        collect_days(value, scope, days, hotels);
        consumed.push(key);
        return consumed;
    }

    let day_entries = day_pattern_entries(obj);
    if !day_entries.is_empty() {
        for (index, (key, value)) in day_entries.into_iter().enumerate() {
            collect_day_entry(value, Some(key), index, scope, days, hotels);
            consumed.push(key);
        }
        return consumed;
    }

    // A flat place list with no day structure is a single day.
    if let Some((key, list)) = find_collection(obj, DAY_PLACE_KEYS) {
        let mut places = Vec::new();
        collect_places(list, None, 1, max_depth, &mut places);
        let explicit = pick_text(obj, DAY_LABEL_KEYS);
        days.push(RawDay {
            label: canonical_label(&[explicit.as_deref()], 0),
            location: location.map(str::to_string),
            places,
        });
        consumed.push(key);
    }

    consumed
}
