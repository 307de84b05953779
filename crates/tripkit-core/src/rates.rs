use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BudgetTier, ConfigError};

/// Per-day amounts for each [`BudgetTier`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRates {
    pub budget: f64,
    pub moderate: f64,
    pub luxury: f64,
}

impl TierRates {
    #[must_use]
    pub fn for_tier(&self, tier: BudgetTier) -> f64 {
        match tier {
            BudgetTier::Budget => self.budget,
            BudgetTier::Moderate => self.moderate,
            BudgetTier::Luxury => self.luxury,
        }
    }
}

/// Per-day food and transport rates used when a trip carries no explicit
/// figures for those categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRates {
    pub food: TierRates,
    pub transport: TierRates,
}

impl Default for BudgetRates {
    fn default() -> Self {
        Self {
            food: TierRates {
                budget: 1200.0,
                moderate: 2200.0,
                luxury: 4500.0,
            },
            transport: TierRates {
                budget: 600.0,
                moderate: 1200.0,
                luxury: 2500.0,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RatesFile {
    food: Option<TierOverrides>,
    transport: Option<TierOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TierOverrides {
    budget: Option<f64>,
    moderate: Option<f64>,
    luxury: Option<f64>,
}

impl TierOverrides {
    fn apply(&self, base: TierRates) -> TierRates {
        TierRates {
            budget: self.budget.unwrap_or(base.budget),
            moderate: self.moderate.unwrap_or(base.moderate),
            luxury: self.luxury.unwrap_or(base.luxury),
        }
    }
}

/// Load budget rates from a YAML file, layering its values over the defaults.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_budget_rates(path: &Path) -> Result<BudgetRates, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RatesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_budget_rates(&content)
}

/// Parse budget rates from YAML text. Omitted tiers keep their defaults.
///
/// # Errors
///
/// Returns `ConfigError::RatesFileParse` for malformed YAML and
/// `ConfigError::Validation` for negative or non-finite rates.
pub fn parse_budget_rates(content: &str) -> Result<BudgetRates, ConfigError> {
    let file: Option<RatesFile> = serde_yaml::from_str(content)?;
    let file = file.unwrap_or_default();
    let defaults = BudgetRates::default();

    let rates = BudgetRates {
        food: file
            .food
            .as_ref()
            .map_or(defaults.food, |o| o.apply(defaults.food)),
        transport: file
            .transport
            .as_ref()
            .map_or(defaults.transport, |o| o.apply(defaults.transport)),
    };

    validate_rates(&rates)?;
    Ok(rates)
}

fn validate_rates(rates: &BudgetRates) -> Result<(), ConfigError> {
    for (category, tiers) in [("food", &rates.food), ("transport", &rates.transport)] {
        for tier in [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::Luxury] {
            let value = tiers.for_tier(tier);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{category}.{tier} must be a finite non-negative number, got {value}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "rates_test.rs"]
mod tests;
