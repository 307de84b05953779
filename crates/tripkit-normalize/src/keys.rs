//! Synonym-key resolution over JSON objects.
//!
//! Each semantic field is looked up through an ordered list of candidate key
//! names. The exact pass tries candidates verbatim; the second pass compares
//! keys after [`normalize_key`], so `"Hotel Name"`, `hotel_name` and
//! `HOTELNAME` all resolve to the candidate `hotelName`.

use serde_json::{Map, Value};

/// Lower-cases `key` and drops every character that is not ASCII alphanumeric.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// `false` for `null` and blank strings.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Resolves the first candidate whose value `accept` maps to `Some`.
///
/// Candidates are tried in order against exact keys first, then against
/// normalized keys. A candidate whose value is rejected does not stop the
/// search.
pub fn resolve<'a, T>(
    obj: &'a Map<String, Value>,
    candidates: &[&str],
    accept: impl Fn(&'a Value) -> Option<T>,
) -> Option<(&'a str, T)> {
    for candidate in candidates {
        if let Some((key, value)) = obj.iter().find(|(key, _)| key.as_str() == *candidate) {
            if let Some(found) = accept(value) {
                return Some((key.as_str(), found));
            }
        }
    }

    let normalized: Vec<(String, &'a String, &'a Value)> = obj
        .iter()
        .map(|(key, value)| (normalize_key(key), key, value))
        .collect();

    for candidate in candidates {
        let wanted = normalize_key(candidate);
        if wanted.is_empty() {
            continue;
        }
        for &(ref norm, key, value) in &normalized {
            if *norm != wanted {
                continue;
            }
            if let Some(found) = accept(value) {
                return Some((key.as_str(), found));
            }
        }
    }

    None
}

/// Key holding a present value for the first matching candidate.
#[must_use]
pub fn find_key<'a>(obj: &'a Map<String, Value>, candidates: &[&str]) -> Option<&'a str> {
    resolve(obj, candidates, |v| is_present(v).then_some(())).map(|(key, ())| key)
}

/// Key and value of the first candidate that holds an array or object.
#[must_use]
pub fn find_collection<'a>(
    obj: &'a Map<String, Value>,
    candidates: &[&str],
) -> Option<(&'a str, &'a Value)> {
    resolve(obj, candidates, |v| {
        (v.is_array() || v.is_object()).then_some(v)
    })
}

/// First candidate rendered as scalar text.
#[must_use]
pub fn pick_text(obj: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    resolve(obj, candidates, scalar_text).map(|(_, text)| text)
}

/// Like [`pick_text`], but arrays and objects are kept as compact JSON.
#[must_use]
pub fn pick_loose_text(obj: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    resolve(obj, candidates, loose_text).map(|(_, text)| text)
}

/// Coordinates as `"lat,lng"` text, from a candidate key or, failing that,
/// from latitude/longitude fields on `obj` itself.
#[must_use]
pub fn pick_geo(obj: &Map<String, Value>, candidates: &[&str]) -> Option<String> {
    resolve(obj, candidates, geo_text)
        .map(|(_, text)| text)
        .or_else(|| lat_lng_pair(obj))
}

/// Trimmed text for strings, JSON rendering for numbers and booleans.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn loose_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
        _ => scalar_text(value),
    }
}

fn geo_text(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => lat_lng_pair(map),
        Value::Array(items) if items.len() == 2 => {
            let lat = scalar_text(&items[0])?;
            let lng = scalar_text(&items[1])?;
            Some(format!("{lat},{lng}"))
        }
        _ => scalar_text(value),
    }
}

fn lat_lng_pair(map: &Map<String, Value>) -> Option<String> {
    let lat = pick_text(map, &["latitude", "lat"])?;
    let lng = pick_text(map, &["longitude", "lng", "lon", "long"])?;
    Some(format!("{lat},{lng}"))
}

/// Case- and punctuation-insensitive membership test against `candidates`.
#[must_use]
pub fn key_matches(key: &str, candidates: &[&str]) -> bool {
    let norm = normalize_key(key);
    !norm.is_empty() && candidates.iter().any(|c| normalize_key(c) == norm)
}
