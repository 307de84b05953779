//! Location containers: per-city blocks of a multi-city trip.

use serde_json::{Map, Value};

use crate::hotels::HOTEL_COLLECTION_KEYS;
use crate::itinerary::{day_pattern_entries, ROOT_ITINERARY_KEYS};
use crate::keys::{find_collection, key_matches, pick_text};
use crate::places::{DAY_METADATA_KEYS, DAY_PLACE_KEYS};
use crate::shape::{is_keyed_collection, usable_label, DAY_PATTERN};

pub(crate) const LOCATION_NAME_KEYS: &[&str] = &[
    "location",
    "locationName",
    "city",
    "cityName",
    "destination",
    "destinationName",
    "region",
];

#[derive(Debug)]
pub(crate) struct Container<'a> {
    /// Root key the container was found under.
    pub(crate) root_key: &'a str,
    pub(crate) location: String,
    pub(crate) body: &'a Map<String, Value>,
}

fn carries_trip_lists(obj: &Map<String, Value>) -> bool {
    let has_hotels = obj
        .iter()
        .any(|(key, value)| {
            key_matches(key, HOTEL_COLLECTION_KEYS) && (value.is_array() || value.is_object())
        });
    has_hotels
        || find_collection(obj, ROOT_ITINERARY_KEYS).is_some()
        || find_collection(obj, DAY_PLACE_KEYS).is_some()
        || !day_pattern_entries(obj).is_empty()
}

/// Location label of `obj` if it is a location container.
///
/// The label comes from a location field, or else from the key the object
/// was stored under when that key is not itself a known structural key.
fn container_location(obj: &Map<String, Value>, key: Option<&str>) -> Option<String> {
    if !carries_trip_lists(obj) {
        return None;
    }
    if let Some(label) = pick_text(obj, LOCATION_NAME_KEYS) {
        return Some(label);
    }
    let key = key.and_then(usable_label)?;
    if key_matches(key, DAY_METADATA_KEYS) || key_matches(key, DAY_PLACE_KEYS) {
        return None;
    }
    Some(key.to_string())
}

/// Scans the direct children of `root` for location containers: objects,
/// arrays of objects, and objects keyed by location. Keys in `skip` have
/// already been consumed and are not scanned.
pub(crate) fn discover_containers<'a>(
    root: &'a Map<String, Value>,
    skip: &[&str],
) -> Vec<Container<'a>> {
    let mut found = Vec::new();

    for (key, value) in root {
        if skip.contains(&key.as_str())
            || key_matches(key, HOTEL_COLLECTION_KEYS)
            || key_matches(key, ROOT_ITINERARY_KEYS)
            || DAY_PATTERN.is_match(key)
        {
            continue;
        }

        match value {
            Value::Object(obj) => {
                if let Some(location) = container_location(obj, Some(key)) {
                    found.push(Container {
                        root_key: key,
                        location,
                        body: obj,
                    });
                } else if is_keyed_collection(value) {
                    for (child_key, child) in obj {
                        if let Some(body) = child.as_object() {
                            if let Some(location) = container_location(body, Some(child_key)) {
                                found.push(Container {
                                    root_key: key,
                                    location,
                                    body,
                                });
                            }
                        }
                    }
                }
            }
            Value::Array(items) => {
                for body in items.iter().filter_map(Value::as_object) {
                    if let Some(location) = container_location(body, None) {
                        found.push(Container {
                            root_key: key,
                            location,
                            body,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    found
}
