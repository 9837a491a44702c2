use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let places_api_key = require("GOOGLE_PLACES_API_KEY")?;

    let env = parse_environment(&or_default("LEADSCOUT_ENV", "development"))?;

    let bind_addr = parse_addr("LEADSCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");
    let frontend_url = or_default("LEADSCOUT_FRONTEND_URL", "http://localhost:5173");

    let places_base_url = or_default("LEADSCOUT_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let places_request_timeout_secs = parse_u64("LEADSCOUT_PLACES_REQUEST_TIMEOUT_SECS", "30")?;
    let places_user_agent = or_default("LEADSCOUT_PLACES_USER_AGENT", "leadscout/0.1 (lead-search)");
    let places_details_concurrency = parse_usize("LEADSCOUT_PLACES_DETAILS_CONCURRENCY", "4")?;
    if places_details_concurrency == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_PLACES_DETAILS_CONCURRENCY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let rate_limit_per_minute = parse_usize("LEADSCOUT_RATE_LIMIT_PER_MINUTE", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        frontend_url,
        places_api_key,
        places_base_url,
        places_request_timeout_secs,
        places_user_agent,
        places_details_concurrency,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
