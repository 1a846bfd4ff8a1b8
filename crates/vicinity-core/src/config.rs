use thiserror::Error;

use crate::app_config::AppConfig;

pub const DEFAULT_API_BASE_URL: &str = "https://api.yelp.com/v3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_key = require("VICINITY_API_KEY")?;
    let api_base_url = or_default("VICINITY_API_BASE_URL", DEFAULT_API_BASE_URL);
    let log_level = or_default("VICINITY_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("VICINITY_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VICINITY_USER_AGENT", "vicinity/0.1 (business-discovery)");

    let tick_interval_ms = parse_u64("VICINITY_TICK_INTERVAL_MS", "2000")?;
    let min_distance_m = parse_f64("VICINITY_MIN_DISTANCE_M", "10")?;
    let debounce_quiet_ms = parse_u64("VICINITY_DEBOUNCE_QUIET_MS", "1000")?;
    let fetch_spacing_ms = parse_u64("VICINITY_FETCH_SPACING_MS", "230")?;

    Ok(AppConfig {
        api_key,
        api_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        tick_interval_ms,
        min_distance_m,
        debounce_quiet_ms,
        fetch_spacing_ms,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
