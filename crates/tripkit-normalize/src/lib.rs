//! Normalization of loosely-shaped LLM trip JSON into canonical itineraries,
//! and budget estimation over the result.
//!
//! Nothing in this crate fails on malformed trip data: unknown shapes degrade
//! to empty collections and default values. The only fallible entry point is
//! [`try_parse_trip_text`], whose never-failing counterpart is
//! [`parse_trip_text`].

pub mod amount;
pub mod budget;
pub mod error;
pub mod keys;
pub mod parse;
pub mod trip;

mod containers;
mod hotels;
mod itinerary;
mod places;
mod shape;

pub use amount::{extract_amount, normalize_days};
pub use budget::{calculate_budget_from_trip, calculate_budget_with, BudgetSettings};
pub use error::ParseError;
pub use parse::{parse_trip_text, try_parse_trip_text};
pub use trip::{
    destination_label, extract_canonical, extract_canonical_with, normalize_trip,
    normalize_trip_data, normalize_trip_data_with, normalize_trip_with, NormalizeOptions,
};
