use crate::app_config::{AppConfig, Environment};
use crate::{BudgetTier, ConfigError};

/// Default recursion bound for nested place and container search.
pub const DEFAULT_MAX_WALK_DEPTH: usize = 16;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("TRIPKIT_ENV", "development"));
    let log_level = or_default("TRIPKIT_LOG_LEVEL", "info");

    let budget_rates_path = lookup("TRIPKIT_BUDGET_RATES_PATH")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from);

    let raw_tier = or_default("TRIPKIT_DEFAULT_BUDGET_TIER", "budget");
    let default_budget_tier =
        raw_tier
            .parse::<BudgetTier>()
            .map_err(|reason| ConfigError::InvalidEnvVar {
                var: "TRIPKIT_DEFAULT_BUDGET_TIER".to_string(),
                reason,
            })?;

    let raw_depth = or_default(
        "TRIPKIT_MAX_WALK_DEPTH",
        &DEFAULT_MAX_WALK_DEPTH.to_string(),
    );
    let max_walk_depth = raw_depth
        .trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "TRIPKIT_MAX_WALK_DEPTH".to_string(),
            reason: e.to_string(),
        })?;
    if max_walk_depth == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRIPKIT_MAX_WALK_DEPTH".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        budget_rates_path,
        default_budget_tier,
        max_walk_depth,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
