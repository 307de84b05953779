use std::path::PathBuf;

use crate::BudgetTier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Optional YAML file overriding the built-in per-day rates.
    pub budget_rates_path: Option<PathBuf>,
    /// Tier applied when the selected budget label matches no tier keyword.
    pub default_budget_tier: BudgetTier,
    /// Upper bound on recursion when searching nested trip data.
    pub max_walk_depth: usize,
}
