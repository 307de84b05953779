//! Hotel discovery and deduplication.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tripkit_core::Hotel;

use crate::keys::{key_matches, pick_geo, pick_loose_text, pick_text};
use crate::places::GEO_KEYS;
use crate::shape::{identity_part, is_keyed_collection, is_structured};

/// Keys that hold hotel collections, at the root, in location containers and
/// inside day entries.
pub(crate) const HOTEL_COLLECTION_KEYS: &[&str] = &[
    "hotels",
    "hotelOptions",
    "hotel",
    "stays",
    "stay",
    "accommodations",
    "accommodation",
    "recommendedHotels",
    "hotelRecommendations",
    "lodging",
    "lodgings",
];

const NAME_KEYS: &[&str] = &["hotelName", "name", "hotel", "title", "propertyName"];
const ADDRESS_KEYS: &[&str] = &["hotelAddress", "address", "location", "area"];
const PRICE_KEYS: &[&str] = &[
    "price",
    "pricePerNight",
    "priceRange",
    "cost",
    "costPerNight",
    "nightlyRate",
    "rate",
    "amount",
];
const RATING_KEYS: &[&str] = &["rating", "stars", "starRating", "reviewScore"];
const DESCRIPTION_KEYS: &[&str] = &["descriptions", "description", "details", "summary", "about"];
const IMAGE_KEYS: &[&str] = &["hotelImageUrl", "imageUrl", "image", "photo", "photoUrl", "img"];
const CHECK_IN_KEYS: &[&str] = &["checkIn", "checkInDate", "checkInTime"];
const CHECK_OUT_KEYS: &[&str] = &["checkOut", "checkOutDate", "checkOutTime"];
const DAY_KEYS: &[&str] = &["day", "days", "dayRange", "stayDays"];

/// Maps one object onto [`Hotel`]; `fallback_day` fills `day` when absent.
pub(crate) fn normalize_hotel(obj: &Map<String, Value>, fallback_day: Option<&str>) -> Option<Hotel> {
    let hotel = Hotel {
        day: pick_text(obj, DAY_KEYS).or_else(|| fallback_day.map(str::to_string)),
        hotel_name: pick_text(obj, NAME_KEYS),
        hotel_address: pick_text(obj, ADDRESS_KEYS),
        price: pick_loose_text(obj, PRICE_KEYS),
        rating: pick_text(obj, RATING_KEYS),
        descriptions: pick_text(obj, DESCRIPTION_KEYS),
        geo_coordinates: pick_geo(obj, GEO_KEYS),
        hotel_image_url: pick_text(obj, IMAGE_KEYS),
        check_in: pick_text(obj, CHECK_IN_KEYS),
        check_out: pick_text(obj, CHECK_OUT_KEYS),
    };
    hotel.is_identifiable().then_some(hotel)
}

/// Collects hotels from a collection value (array, keyed object, single
/// record or bare name string).
pub(crate) fn collect_hotels(
    value: &Value,
    fallback_day: Option<&str>,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<Hotel>,
) {
    if depth > max_depth {
        tracing::debug!(depth, "hotel search depth limit reached");
        return;
    }

    match value {
        Value::Array(items) => {
            for item in items {
                collect_hotels(item, fallback_day, depth + 1, max_depth, out);
            }
        }
        Value::Object(map) if is_keyed_collection(value) => {
            for child in map.values().filter(|v| is_structured(v)) {
                collect_hotels(child, fallback_day, depth + 1, max_depth, out);
            }
        }
        Value::Object(map) => match normalize_hotel(map, fallback_day) {
            Some(hotel) => out.push(hotel),
            None => tracing::debug!("dropping hotel entry without identifying fields"),
        },
        Value::String(name) if !name.trim().is_empty() => out.push(Hotel {
            day: fallback_day.map(str::to_string),
            hotel_name: Some(name.trim().to_string()),
            ..Hotel::default()
        }),
        _ => {}
    }
}

/// Collects hotels from every hotel-collection key of `obj`, returning the
/// keys that were consumed.
pub(crate) fn collect_scope_hotels<'a>(
    obj: &'a Map<String, Value>,
    fallback_day: Option<&str>,
    max_depth: usize,
    out: &mut Vec<Hotel>,
) -> Vec<&'a str> {
    let mut consumed = Vec::new();
    for (key, value) in obj {
        if !key_matches(key, HOTEL_COLLECTION_KEYS) {
            continue;
        }
        if !(value.is_array() || value.is_object() || value.is_string()) {
            continue;
        }
        collect_hotels(value, fallback_day, 0, max_depth, out);
        consumed.push(key.as_str());
    }
    consumed
}

/// Keeps the first hotel per normalized `name|address` key. Hotels with
/// neither name nor address are only dropped as exact repeats.
pub(crate) fn dedup_hotels(hotels: Vec<Hotel>) -> Vec<Hotel> {
    let mut seen_keys = HashSet::new();
    let mut unkeyed: Vec<Hotel> = Vec::new();
    let mut result = Vec::with_capacity(hotels.len());

    for hotel in hotels {
        let name = identity_part(hotel.hotel_name.as_ref());
        let address = identity_part(hotel.hotel_address.as_ref());
        if name.is_empty() && address.is_empty() {
            if unkeyed.contains(&hotel) {
                continue;
            }
            unkeyed.push(hotel.clone());
        } else if !seen_keys.insert(format!("{name}|{address}")) {
            tracing::debug!(name = %name, address = %address, "dropping duplicate hotel");
            continue;
        }
        result.push(hotel);
    }

    result
}
