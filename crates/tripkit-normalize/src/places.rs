//! Place extraction from day entries.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tripkit_core::Place;

use crate::hotels::HOTEL_COLLECTION_KEYS;
use crate::keys::{find_key, key_matches, pick_geo, pick_loose_text, pick_text};
use crate::shape::{identity_part, is_keyed_collection, usable_label};

pub(crate) const TIME_KEYS: &[&str] = &[
    "time",
    "timeSlot",
    "timing",
    "timeOfDay",
    "bestTimeToVisit",
    "startTime",
    "slot",
    "period",
];
const NAME_KEYS: &[&str] = &[
    "placeName",
    "name",
    "title",
    "activity",
    "attraction",
    "place",
    "spot",
];
const DETAILS_KEYS: &[&str] = &[
    "placeDetails",
    "details",
    "description",
    "desc",
    "about",
    "activityDescription",
    "summary",
];
const ADDRESS_KEYS: &[&str] = &["placeAddress", "address", "location", "area"];
const TICKET_KEYS: &[&str] = &[
    "ticketPricing",
    "ticketPrice",
    "ticket",
    "tickets",
    "entryFee",
    "entranceFee",
    "admission",
    "price",
    "cost",
    "fee",
];
const TRAVEL_TIME_KEYS: &[&str] = &[
    "timeToTravel",
    "travelTime",
    "travelDuration",
    "timeToReach",
    "duration",
];
pub(crate) const GEO_KEYS: &[&str] = &[
    "geoCoordinates",
    "coordinates",
    "geo",
    "coords",
    "latLng",
];
const IMAGE_KEYS: &[&str] = &[
    "placeImageUrl",
    "imageUrl",
    "image",
    "photo",
    "photoUrl",
    "img",
];
const TRANSPORT_KEYS: &[&str] = &[
    "transportCost",
    "transportationCost",
    "travelCost",
    "commuteCost",
];

/// Keys whose presence alone marks an object as a place.
const STRONG_PLACE_KEYS: &[&str] = &[
    "placeName",
    "placeDetails",
    "placeAddress",
    "ticketPricing",
    "ticketPrice",
    "timeToTravel",
    "placeImageUrl",
    "activity",
    "attraction",
];
/// Fields that, next to a generic name, make an object a place.
const SUPPORTING_KEYS: &[&str] = &[
    "address",
    "details",
    "description",
    "time",
    "price",
    "cost",
    "duration",
    "location",
];

/// Generic list keys inside a day. Also used as container markers.
pub(crate) const DAY_PLACE_KEYS: &[&str] = &[
    "plan",
    "places",
    "activities",
    "thingsToDo",
    "attractions",
    "spots",
    "visits",
    "stops",
    "sights",
    "schedule",
    "itinerary",
    "events",
];

/// Day-level metadata never searched for places.
pub(crate) const DAY_METADATA_KEYS: &[&str] = &[
    "day",
    "dayNumber",
    "dayLabel",
    "label",
    "date",
    "title",
    "summary",
    "theme",
    "notes",
    "tips",
    "weather",
    "overview",
];

#[must_use]
pub(crate) fn looks_like_place(obj: &Map<String, Value>) -> bool {
    find_key(obj, STRONG_PLACE_KEYS).is_some()
        || (find_key(obj, &["name", "title"]).is_some()
            && find_key(obj, SUPPORTING_KEYS).is_some())
}

/// Maps one object onto [`Place`]. `fallback_time` is the surrounding key,
/// used when the object carries no time of its own.
pub(crate) fn normalize_place(obj: &Map<String, Value>, fallback_time: Option<&str>) -> Option<Place> {
    let place = Place {
        time: pick_text(obj, TIME_KEYS).or_else(|| fallback_time.map(str::to_string)),
        place_name: pick_text(obj, NAME_KEYS),
        place_details: pick_text(obj, DETAILS_KEYS),
        place_address: pick_text(obj, ADDRESS_KEYS),
        ticket_pricing: pick_loose_text(obj, TICKET_KEYS),
        time_to_travel: pick_text(obj, TRAVEL_TIME_KEYS),
        geo_coordinates: pick_geo(obj, GEO_KEYS),
        place_image_url: pick_text(obj, IMAGE_KEYS),
        transport_cost: pick_loose_text(obj, TRANSPORT_KEYS),
    };
    place.is_identifiable().then_some(place)
}

/// Depth-first place search.
///
/// Stops descending at any object that looks like a place. Objects that do
/// not are searched through their children; if that finds nothing the object
/// itself is tried as a place.
pub(crate) fn collect_places(
    value: &Value,
    label: Option<&str>,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<Place>,
) {
    if depth > max_depth {
        tracing::debug!(depth, "place search depth limit reached");
        return;
    }

    match value {
        Value::Array(items) => {
            for item in items {
                collect_places(item, label, depth + 1, max_depth, out);
            }
        }
        Value::String(text) => {
            let name = text.trim();
            if !name.is_empty() {
                out.push(Place {
                    time: label.map(str::to_string),
                    place_name: Some(name.to_string()),
                    ..Place::default()
                });
            }
        }
        Value::Object(obj) => {
            if looks_like_place(obj) && !is_keyed_collection(value) {
                if let Some(place) = normalize_place(obj, label) {
                    out.push(place);
                }
                return;
            }

            let before = out.len();
            let own_time = pick_text(obj, TIME_KEYS);
            let inherited = own_time.as_deref().or(label);
            collect_children(obj, inherited, depth, max_depth, out);

            if out.len() == before {
                if let Some(place) = normalize_place(obj, label) {
                    out.push(place);
                }
            }
        }
        _ => {}
    }
}

/// Searches the non-metadata children of `obj`. Generic list keys pass the
/// inherited label through; other keys become the label themselves.
pub(crate) fn collect_children(
    obj: &Map<String, Value>,
    inherited: Option<&str>,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<Place>,
) {
    for (key, child) in obj {
        if !(child.is_array() || child.is_object()) {
            continue;
        }
        if key_matches(key, DAY_METADATA_KEYS) || key_matches(key, HOTEL_COLLECTION_KEYS) {
            continue;
        }
        let child_label = if key_matches(key, DAY_PLACE_KEYS) {
            inherited
        } else {
            usable_label(key).or(inherited)
        };
        collect_places(child, child_label, depth + 1, max_depth, out);
    }
}

/// Drops later places sharing a non-empty `(placeName, placeAddress)` key.
pub(crate) fn dedup_places(places: Vec<Place>) -> Vec<Place> {
    let mut seen = HashSet::new();
    places
        .into_iter()
        .filter(|place| {
            let name = identity_part(place.place_name.as_ref());
            let address = identity_part(place.place_address.as_ref());
            if name.is_empty() && address.is_empty() {
                return true;
            }
            seen.insert(format!("{name}|{address}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn normalize_place_maps_synonyms() {
        let place = normalize_place(
            &obj(json!({
                "Place Name": "Louvre",
                "Details": "Museum",
                "address": "Rue de Rivoli",
                "Price": "17 EUR",
                "travel_time": "10 min",
                "coordinates": {"lat": 48.86, "lng": 2.33},
                "image_url": "https://img/louvre.jpg"
            })),
            None,
        )
        .unwrap();
        assert_eq!(place.place_name.as_deref(), Some("Louvre"));
        assert_eq!(place.place_details.as_deref(), Some("Museum"));
        assert_eq!(place.place_address.as_deref(), Some("Rue de Rivoli"));
        assert_eq!(place.ticket_pricing.as_deref(), Some("17 EUR"));
        assert_eq!(place.time_to_travel.as_deref(), Some("10 min"));
        assert_eq!(place.geo_coordinates.as_deref(), Some("48.86,2.33"));
        assert_eq!(place.place_image_url.as_deref(), Some("https://img/louvre.jpg"));
        assert!(place.time.is_none());
    }

    #[test]
    fn normalize_place_uses_fallback_time_only_when_missing() {
        let with_time = normalize_place(&obj(json!({"name": "A", "time": "9 AM"})), Some("morning"));
        assert_eq!(with_time.unwrap().time.as_deref(), Some("9 AM"));

        let without = normalize_place(&obj(json!({"name": "A"})), Some("morning"));
        assert_eq!(without.unwrap().time.as_deref(), Some("morning"));
    }

    #[test]
    fn normalize_place_drops_empty_records() {
        assert!(normalize_place(&obj(json!({"time": "9 AM", "transportCost": 5})), None).is_none());
    }

    #[test]
    fn collect_places_walks_time_keyed_objects() {
        let value = json!({
            "morning": {"placeName": "Market"},
            "afternoon": [{"placeName": "Museum"}, "Walk by the river"]
        });
        let mut out = Vec::new();
        collect_places(&value, None, 0, 16, &mut out);
        let names: Vec<_> = out.iter().filter_map(|p| p.place_name.as_deref()).collect();
        assert_eq!(names, vec!["Market", "Museum", "Walk by the river"]);
        assert_eq!(out[0].time.as_deref(), Some("morning"));
        assert_eq!(out[2].time.as_deref(), Some("afternoon"));
    }

    #[test]
    fn collect_places_uses_slot_time_for_nested_lists() {
        let value = json!([{"timeOfDay": "Evening", "activities": [{"placeName": "Opera"}]}]);
        let mut out = Vec::new();
        collect_places(&value, None, 0, 16, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].time.as_deref(), Some("Evening"));
    }

    #[test]
    fn collect_places_respects_depth_limit() {
        let value = json!({"a": {"b": {"c": {"placeName": "Deep"}}}});
        let mut out = Vec::new();
        collect_places(&value, None, 0, 2, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn dedup_places_keeps_first_and_unkeyed_entries() {
        let places = vec![
            Place {
                place_name: Some("Louvre".into()),
                place_details: Some("first".into()),
                ..Place::default()
            },
            Place {
                place_name: Some(" louvre ".into()),
                place_details: Some("second".into()),
                ..Place::default()
            },
            Place {
                place_details: Some("no name".into()),
                ..Place::default()
            },
            Place {
                place_details: Some("no name".into()),
                ..Place::default()
            },
        ];
        let deduped = dedup_places(places);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].place_details.as_deref(), Some("first"));
    }
}
