pub mod app_config;
pub mod budget;
pub mod config;
pub mod rates;
pub mod trip;

pub use app_config::{AppConfig, Environment};
pub use budget::{BudgetBreakdown, BudgetCategory, BudgetTier, CategoryAmount};
pub use config::{load_app_config, load_app_config_from_env};
pub use rates::{load_budget_rates, parse_budget_rates, BudgetRates, TierRates};
pub use trip::{CanonicalTrip, Day, Hotel, Place};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read budget rates file {path}: {source}")]
    RatesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse budget rates file: {0}")]
    RatesFileParse(#[from] serde_yaml::Error),

    #[error("budget rates validation failed: {0}")]
    Validation(String),
}
