use serde_json::json;

use super::*;

fn names(day: &Value) -> Vec<&str> {
    day["plan"]
        .as_array()
        .map(|plan| {
            plan.iter()
                .filter_map(|p| p["placeName"].as_str())
                .collect()
        })
        .unwrap_or_default()
}

// -----------------------------------------------------------------------
// normalize_trip_data
// -----------------------------------------------------------------------

#[test]
fn duplicate_hotels_keep_first_occurrence() {
    let data = json!({
        "hotels": [
            {"hotelName": "Sea View", "hotelAddress": "1 Beach Rd", "price": "₹3,000"},
            {"HotelName": "sea view ", "address": "1 beach rd", "price": "₹9,999"},
            {"hotelName": "Hill Top", "hotelAddress": "2 Ridge St"}
        ]
    });
    let out = normalize_trip_data(&data);
    let hotels = out["hotels"].as_array().expect("hotels array");

    assert_eq!(hotels.len(), 2);
    assert_eq!(hotels[0]["hotelName"], "Sea View");
    assert_eq!(hotels[0]["price"], "₹3,000");
    assert_eq!(hotels[1]["hotelName"], "Hill Top");
}

#[test]
fn hotels_without_identifying_fields_are_dropped() {
    let data = json!({"hotels": [{"rating": 4.5}, {"hotelName": "Kept"}]});
    let out = normalize_trip_data(&data);

    assert_eq!(out["hotels"].as_array().map(Vec::len), Some(1));
    assert_eq!(out["hotels"][0]["hotelName"], "Kept");
}

#[test]
fn same_day_labels_are_merged_in_order() {
    let data = json!({
        "itinerary": [
            {"day": "Day 1", "plan": [{"placeName": "Fort"}, {"placeName": "Lake"}]},
            {"day": "day 1 - afternoon", "plan": [{"placeName": "Market"}, {"placeName": "fort"}]},
            {"day": "Day 2", "plan": [{"placeName": "Temple"}]}
        ]
    });
    let out = normalize_trip_data(&data);
    let itinerary = out["itinerary"].as_array().expect("itinerary array");

    assert_eq!(itinerary.len(), 2);
    assert_eq!(itinerary[0]["day"], "Day 1");
    assert_eq!(names(&itinerary[0]), vec!["Fort", "Lake", "Market"]);
    assert_eq!(itinerary[1]["day"], "Day 2");
}

#[test]
fn day_keyed_trip_data_becomes_itinerary() {
    let data = json!({
        "Day 1": {"places": [{"Place Name": "Eiffel Tower", "Price": "20 EUR"}]}
    });
    let out = normalize_trip_data(&data);

    assert_eq!(
        out,
        json!({
            "hotels": [],
            "itinerary": [
                {"day": "Day 1", "plan": [{"placeName": "Eiffel Tower", "ticketPricing": "20 EUR"}]}
            ],
            "Day 1": {"places": [{"Place Name": "Eiffel Tower", "Price": "20 EUR"}]}
        })
    );
}

#[test]
fn source_keys_pass_through_next_to_canonical_lists() {
    let data = json!({
        "hotelOptions": [{"hotelName": "Sea View", "price": "₹3,000"}],
        "Day 1": {"places": [{"placeName": "Fort"}]},
        "notes": "n"
    });
    let out = normalize_trip_data(&data);

    assert_eq!(out["hotels"][0]["hotelName"], "Sea View");
    assert_eq!(out["itinerary"][0]["day"], "Day 1");
    assert_eq!(out["hotelOptions"], data["hotelOptions"]);
    assert_eq!(out["Day 1"], data["Day 1"]);
    assert_eq!(out["notes"], "n");
}

#[test]
fn keyed_itinerary_with_summary_keeps_every_day() {
    let data = json!({
        "itinerary": {
            "Day 1": {"plan": [{"placeName": "Louvre"}]},
            "Day 2": {"plan": [{"placeName": "Versailles"}]},
            "summary": "Two busy days"
        }
    });
    let out = normalize_trip_data(&data);
    let itinerary = out["itinerary"].as_array().expect("itinerary array");

    assert_eq!(itinerary.len(), 2);
    assert_eq!(itinerary[0]["day"], "Day 1");
    assert_eq!(names(&itinerary[0]), vec!["Louvre"]);
    assert_eq!(itinerary[1]["day"], "Day 2");
    assert_eq!(names(&itinerary[1]), vec!["Versailles"]);
}

#[test]
fn hotels_grouped_by_tier_with_note_are_kept() {
    let data = json!({
        "hotels": {
            "budget": [{"hotelName": "Hostel"}],
            "luxury": [{"hotelName": "Palace"}],
            "note": "prices per night"
        }
    });
    let out = normalize_trip_data(&data);
    let hotels: Vec<&str> = out["hotels"]
        .as_array()
        .expect("hotels array")
        .iter()
        .filter_map(|h| h["hotelName"].as_str())
        .collect();

    assert_eq!(hotels, vec!["Hostel", "Palace"]);
}

#[test]
fn unlabeled_days_get_positional_labels() {
    let data = json!({
        "itinerary": [
            {"plan": [{"placeName": "A"}]},
            {"theme": "Beaches", "plan": [{"placeName": "B"}]}
        ]
    });
    let out = normalize_trip_data(&data);

    assert_eq!(out["itinerary"][0]["day"], "Day 1");
    assert_eq!(out["itinerary"][1]["day"], "Day 2");
}

#[test]
fn days_without_places_are_dropped() {
    let data = json!({
        "itinerary": [
            {"day": "Day 1", "plan": []},
            {"day": "Day 2", "plan": [{"rating": 5}]},
            {"day": "Day 3", "plan": [{"placeName": "Kept"}]}
        ]
    });
    let out = normalize_trip_data(&data);
    let itinerary = out["itinerary"].as_array().expect("itinerary array");

    assert_eq!(itinerary.len(), 1);
    assert_eq!(itinerary[0]["day"], "Day 3");
}

#[test]
fn nested_time_slots_become_place_times() {
    let data = json!({
        "itinerary": [{
            "day": "Day 1",
            "summary": "Old town",
            "morning": {"placeName": "Castle"},
            "evening": [{"placeName": "Night Market"}]
        }]
    });
    let out = normalize_trip_data(&data);
    let plan = out["itinerary"][0]["plan"].as_array().expect("plan array");

    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0]["placeName"], "Castle");
    assert_eq!(plan[0]["time"], "morning");
    assert_eq!(plan[1]["time"], "evening");
}

#[test]
fn trip_without_lists_passes_other_fields_through() {
    let data = json!({"tripName": "Weekend", "notes": ["pack light"], "destination": "Goa"});
    let out = normalize_trip_data(&data);

    assert_eq!(
        out,
        json!({
            "hotels": [],
            "itinerary": [],
            "tripName": "Weekend",
            "notes": ["pack light"],
            "destination": "Goa"
        })
    );
}

#[test]
fn non_string_destination_and_location_are_dropped() {
    let data = json!({"destination": {"name": "Goa"}, "location": 7, "currency": "INR"});
    let out = normalize_trip_data(&data);

    assert!(out.get("destination").is_none());
    assert!(out.get("location").is_none());
    assert_eq!(out["currency"], "INR");
}

#[test]
fn non_object_input_is_returned_unchanged() {
    assert_eq!(normalize_trip_data(&Value::Null), Value::Null);
    assert_eq!(normalize_trip_data(&json!("text")), json!("text"));
    assert_eq!(normalize_trip_data(&json!([1, 2])), json!([1, 2]));
}

#[test]
fn location_containers_are_merged() {
    let data = json!({
        "destination": "Japan",
        "tokyo": {
            "location": "Tokyo",
            "hotels": [{"hotelName": "Shinjuku Inn", "hotelAddress": "Shinjuku"}],
            "itinerary": [{"day": "Day 1", "plan": [{"placeName": "Senso-ji"}]}]
        },
        "kyoto": {
            "city": "Kyoto",
            "itinerary": [{"day": "Day 1", "plan": [{"placeName": "Fushimi Inari"}]}]
        }
    });
    let out = normalize_trip_data(&data);

    assert_eq!(out["hotels"].as_array().map(Vec::len), Some(1));
    let itinerary = out["itinerary"].as_array().expect("itinerary array");
    assert_eq!(itinerary.len(), 1);
    assert_eq!(itinerary[0]["day"], "Day 1");
    assert_eq!(itinerary[0]["location"], "Tokyo");
    assert_eq!(names(&itinerary[0]), vec!["Senso-ji", "Fushimi Inari"]);
    assert_eq!(out["tokyo"], data["tokyo"]);
    assert_eq!(out["kyoto"], data["kyoto"]);
    assert_eq!(out["destination"], "Japan");
    assert_eq!(normalize_trip_data(&out), out);
}

#[test]
fn place_with_location_string_is_not_a_container() {
    let data = json!({
        "itinerary": [{"day": "Day 1", "plan": [{"placeName": "Fort"}]}],
        "highlight": {"placeName": "Lake", "location": "North shore"}
    });
    let out = normalize_trip_data(&data);

    assert_eq!(names(&out["itinerary"][0]), vec!["Fort"]);
    assert_eq!(out["highlight"]["location"], "North shore");
}

#[test]
fn normalizing_twice_is_a_fixed_point() {
    let data = json!({
        "hotelOptions": {
            "a": {"Hotel Name": "Sea View", "Price": 3000, "geo": {"lat": 1.0, "lng": 2.0}},
            "b": {"name": "Hill Top", "address": "Ridge"}
        },
        "Day 1": {"activities": [{"name": "Fort", "address": "Old town", "Ticket Price": "₹50"}]},
        "Day 2": [{"placeName": "Lake", "time": "Morning"}],
        "currency": "INR"
    });
    let once = normalize_trip_data(&data);
    let twice = normalize_trip_data(&once);

    assert_eq!(once, twice);
}

#[test]
fn extract_canonical_returns_typed_view() {
    let data = json!({
        "hotels": [{"hotelName": "Sea View"}],
        "itinerary": [{"day": "Day 1", "plan": [{"placeName": "Fort"}]}]
    });
    let canonical = extract_canonical(data.as_object().expect("object"));

    assert_eq!(canonical.hotels.len(), 1);
    assert_eq!(canonical.itinerary[0].day, "Day 1");
    assert_eq!(
        canonical.itinerary[0].plan[0].place_name.as_deref(),
        Some("Fort")
    );
}

#[test]
fn shallow_walk_depth_limits_nested_search() {
    let data = json!({
        "itinerary": [{
            "day": "Day 1",
            "morning": {"block": {"inner": {"placeName": "Deep"}}}
        }]
    });
    let shallow = NormalizeOptions { max_walk_depth: 1 };

    assert_eq!(
        normalize_trip_data_with(&data, shallow)["itinerary"],
        json!([])
    );
    assert_eq!(
        normalize_trip_data(&data)["itinerary"][0]["plan"][0]["placeName"],
        "Deep"
    );
}

// -----------------------------------------------------------------------
// normalize_trip
// -----------------------------------------------------------------------

#[test]
fn string_trip_data_is_parsed_and_normalized() {
    let trip = json!({
        "userSelection": {"location": "Paris"},
        "tripData": "Here you go:\n```json\n{\"hotels\": [{\"hotelName\": \"Le Petit\"}]}\n```"
    });
    let out = normalize_trip(&trip);

    assert_eq!(out["tripData"]["hotels"][0]["hotelName"], "Le Petit");
    assert_eq!(out["tripData"]["itinerary"], json!([]));
}

#[test]
fn unparseable_trip_data_string_is_kept_verbatim() {
    let trip = json!({"tripData": "Sorry, I cannot help with that."});
    let out = normalize_trip(&trip);

    assert_eq!(out["tripData"], "Sorry, I cannot help with that.");
}

#[test]
fn string_location_becomes_labelled_object() {
    let trip = json!({"userSelection": {"location": " Paris ", "budget": "Luxury"}});
    let out = normalize_trip(&trip);

    assert_eq!(out["userSelection"]["location"], json!({"label": "Paris"}));
    assert_eq!(out["userSelection"]["budget"], "Luxury");
}

#[test]
fn existing_location_label_is_preserved() {
    let trip = json!({
        "userSelection": {"location": {"label": "Rome", "placeId": "abc"}},
        "tripData": {"destination": "Milan"}
    });
    let out = normalize_trip(&trip);

    assert_eq!(
        out["userSelection"]["location"],
        json!({"label": "Rome", "placeId": "abc"})
    );
}

#[test]
fn location_label_falls_back_to_trip_destination() {
    let trip = json!({
        "userSelection": {"location": {"placeId": "abc"}},
        "tripData": {"destination": "Milan"}
    });
    let out = normalize_trip(&trip);

    assert_eq!(out["userSelection"]["location"]["label"], "Milan");
    assert_eq!(out["userSelection"]["location"]["placeId"], "abc");
}

#[test]
fn missing_selection_is_created_when_label_found() {
    let trip = json!({"tripData": {"location": "Lisbon"}});
    let out = normalize_trip(&trip);

    assert_eq!(out["userSelection"]["location"], json!({"label": "Lisbon"}));
}

#[test]
fn no_label_leaves_selection_untouched() {
    let trip = json!({"userSelection": {"noOfDays": 2}, "tripData": {}});
    let out = normalize_trip(&trip);

    assert_eq!(out["userSelection"], json!({"noOfDays": 2}));
    assert_eq!(out["tripData"], json!({"hotels": [], "itinerary": []}));
}

#[test]
fn non_object_trip_is_returned_unchanged() {
    assert_eq!(normalize_trip(&Value::Null), Value::Null);
    assert_eq!(normalize_trip(&json!(42)), json!(42));
}

#[test]
fn destination_label_reads_string_trip_data() {
    let trip = json!({"tripData": "{\"destination\": \"Oslo\"}"});

    assert_eq!(destination_label(&trip).as_deref(), Some("Oslo"));
    assert_eq!(destination_label(&json!({})), None);
}
