//! Budget estimation over canonical (or raw) trip records.

use serde_json::{Map, Value};
use tripkit_core::{
    load_budget_rates, AppConfig, BudgetBreakdown, BudgetCategory, BudgetRates, BudgetTier,
    CategoryAmount, ConfigError,
};

use crate::amount::{extract_amount, first_positive, normalize_days, round_amount};
use crate::parse::parse_trip_text;
use crate::shape::coerce_entries;

const HOTEL_PRICE_KEYS: &[&str] = &["price", "cost", "amount"];
const TICKET_KEYS: &[&str] = &["ticketPricing", "ticketPrice"];
const TRANSPORT_KEYS: &[&str] = &["transportCost", "travelCost"];
const DAY_PLAN_KEYS: &[&str] = &["plan", "places", "activities"];

/// Explicit estimate fields, in priority order.
const SELECTION_ESTIMATE_KEYS: &[&str] = &[
    "estimatedBudget",
    "totalBudget",
    "budgetEstimate",
    "budgetAmount",
];
const TRIP_DATA_ESTIMATE_KEYS: &[&str] = &[
    "estimatedBudget",
    "totalBudget",
    "budgetEstimate",
    "estimatedCost",
    "totalEstimatedCost",
    "budget",
];

/// Rates and fallback tier used by [`calculate_budget_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSettings {
    pub rates: BudgetRates,
    /// Tier for budget labels that match no tier keyword.
    pub default_tier: BudgetTier,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            rates: BudgetRates::default(),
            default_tier: BudgetTier::Budget,
        }
    }
}

impl BudgetSettings {
    /// Builds settings from application config, loading the rates file when
    /// one is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured rates file cannot be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let rates = match &config.budget_rates_path {
            Some(path) => load_budget_rates(path)?,
            None => BudgetRates::default(),
        };
        Ok(Self {
            rates,
            default_tier: config.default_budget_tier,
        })
    }
}

#[derive(Debug, Default)]
struct Totals {
    hotels: f64,
    food: f64,
    tickets: f64,
    transport: f64,
}

impl Totals {
    fn get(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Hotels => self.hotels,
            BudgetCategory::Food => self.food,
            BudgetCategory::Tickets => self.tickets,
            BudgetCategory::Transport => self.transport,
        }
    }

    fn sum(&self) -> f64 {
        self.hotels + self.food + self.tickets + self.transport
    }
}

/// Budget breakdown with the built-in rate table.
#[must_use]
pub fn calculate_budget_from_trip(trip: &Value) -> BudgetBreakdown {
    calculate_budget_with(trip, &BudgetSettings::default())
}

/// Derives a categorized budget from hotel prices, place tickets and
/// transport costs, plus per-day food (and, when no transport cost is
/// present, transport) estimates for the selected tier.
#[must_use]
pub fn calculate_budget_with(trip: &Value, settings: &BudgetSettings) -> BudgetBreakdown {
    let selection = trip.get("userSelection");
    let parsed;
    let trip_data = match trip.get("tripData") {
        Some(Value::String(raw)) => {
            parsed = parse_trip_text(raw);
            parsed.as_ref()
        }
        other => other,
    };

    let mut totals = Totals::default();

    if let Some(hotels) = trip_data.and_then(|d| d.get("hotels")) {
        for hotel in hotel_records(hotels) {
            totals.hotels += first_positive(hotel, HOTEL_PRICE_KEYS);
        }
    }

    if let Some(itinerary) = trip_data.and_then(|d| d.get("itinerary")) {
        for day in coerce_entries(itinerary) {
            for place in day_places(day.value) {
                if let Some(place) = place.as_object() {
                    totals.tickets += first_positive(place, TICKET_KEYS);
                    totals.transport += first_positive(place, TRANSPORT_KEYS);
                }
            }
        }
    }

    let days = normalize_days(selection.and_then(|s| s.get("noOfDays")).unwrap_or(&Value::Null));
    let budget_level = selection
        .and_then(|s| s.get("budget"))
        .and_then(Value::as_str)
        .map(str::to_lowercase)
        .unwrap_or_default();
    let tier = BudgetTier::from_label(&budget_level).unwrap_or_else(|| {
        tracing::debug!(
            budget_level = %budget_level,
            fallback = %settings.default_tier,
            "budget label matches no tier; using fallback tier"
        );
        settings.default_tier
    });

    let day_count = f64::from(days);
    totals.food += settings.rates.food.for_tier(tier) * day_count;
    if totals.transport <= 0.0 {
        totals.transport += settings.rates.transport.for_tier(tier) * day_count;
    }

    let calculated_total = totals.sum();
    let category_breakdown = BudgetCategory::ALL
        .iter()
        .map(|&name| CategoryAmount {
            name,
            value: round_amount(totals.get(name)),
        })
        .collect();

    let estimated_budget = explicit_estimate(selection, trip_data)
        .map_or_else(|| round_amount(calculated_total), round_amount);

    BudgetBreakdown {
        estimated_budget,
        calculated_total: round_amount(calculated_total),
        category_breakdown,
        budget_level,
        days,
    }
}

/// Hotel objects of a hotel collection, one level of grouping deep (for
/// example hotels grouped by tier).
fn hotel_records(value: &Value) -> Vec<&Map<String, Value>> {
    coerce_entries(value)
        .into_iter()
        .flat_map(|entry| match entry.value {
            Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
            Value::Object(obj) => vec![obj],
            _ => Vec::new(),
        })
        .collect()
}

/// Places of one itinerary day: a bare array, or the first plan-like list of
/// a day object.
fn day_places(day: &Value) -> Vec<&Value> {
    match day {
        Value::Array(items) => items.iter().collect(),
        Value::Object(obj) => DAY_PLAN_KEYS
            .iter()
            .find_map(|key| obj.get(*key).filter(|v| v.is_array() || v.is_object()))
            .map(|list| coerce_entries(list).into_iter().map(|e| e.value).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn explicit_estimate(selection: Option<&Value>, trip_data: Option<&Value>) -> Option<f64> {
    estimate_fields(selection, SELECTION_ESTIMATE_KEYS)
        .chain(estimate_fields(trip_data, TRIP_DATA_ESTIMATE_KEYS))
        .map(extract_amount)
        .find(|amount| *amount > 0.0)
}

fn estimate_fields<'a>(
    source: Option<&'a Value>,
    keys: &'static [&'static str],
) -> impl Iterator<Item = &'a Value> {
    keys.iter()
        .filter_map(move |key| source.and_then(|s| s.get(*key)))
}

#[cfg(test)]
#[path = "budget_test.rs"]
mod tests;
