//! Canonical itinerary and hotel records.
//!
//! Every field is optional free text: the upstream LLM output has no strict
//! contract, so these types only promise key naming, not content.

use serde::{Deserialize, Serialize};

/// A recommended stay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<String>,
    /// Free-text `"lat,lng"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
}

impl Hotel {
    /// Returns `true` when the record carries at least one field that
    /// identifies a real stay (name, address, description, image, coordinates
    /// or price).
    #[must_use]
    pub fn is_identifiable(&self) -> bool {
        [
            &self.hotel_name,
            &self.hotel_address,
            &self.descriptions,
            &self.hotel_image_url,
            &self.geo_coordinates,
            &self.price,
        ]
        .iter()
        .any(|field| field.is_some())
    }
}

/// A single stop within a day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_address: Option<String>,
    /// Free text, may carry currency symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_pricing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_travel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_coordinates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_cost: Option<String>,
}

impl Place {
    /// Returns `true` when any content field is set. `time` and
    /// `transport_cost` alone do not make a place.
    #[must_use]
    pub fn is_identifiable(&self) -> bool {
        [
            &self.place_name,
            &self.place_details,
            &self.place_address,
            &self.ticket_pricing,
            &self.time_to_travel,
            &self.place_image_url,
            &self.geo_coordinates,
        ]
        .iter()
        .any(|field| field.is_some())
    }
}

/// One itinerary day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Display label, always of the form `Day N`.
    pub day: String,
    /// Location container this day was found under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub plan: Vec<Place>,
}

/// The normalized `{ hotels, itinerary }` view of one trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTrip {
    pub hotels: Vec<Hotel>,
    pub itinerary: Vec<Day>,
}
