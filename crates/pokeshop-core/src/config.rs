use std::env::VarError;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment, HarvestConfig};
use crate::ConfigError;

const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2/";
const DEFAULT_HARVEST_USER_AGENT: &str = "pokeshop/0.1 (catalog-harvester)";

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

/// Load harvester configuration, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_harvest_config() -> Result<HarvestConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_harvest_config_from_env()
}

/// Load harvester configuration from the process environment only.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_harvest_config_from_env() -> Result<HarvestConfig, ConfigError> {
    build_harvest_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can pass a plain `HashMap`
/// lookup instead of mutating process state.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let database_url =
        lookup("DATABASE_URL").map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".into()))?;

    let env = parse_environment(&or_default(&lookup, "POKESHOP_ENV", "development"))?;
    let bind_addr: SocketAddr = parse_var(&lookup, "POKESHOP_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default(&lookup, "POKESHOP_LOG_LEVEL", "info");

    let page_size: u32 = parse_var(&lookup, "POKESHOP_PAGE_SIZE", "20")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "POKESHOP_PAGE_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let db_max_connections: u32 = parse_var(&lookup, "POKESHOP_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections: u32 = parse_var(&lookup, "POKESHOP_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "POKESHOP_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs: u64 =
        parse_var(&lookup, "POKESHOP_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        page_size,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

fn build_harvest_config<F>(lookup: F) -> Result<HarvestConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let env = parse_environment(&or_default(&lookup, "POKESHOP_ENV", "development"))?;
    let log_level = or_default(&lookup, "POKESHOP_LOG_LEVEL", "info");
    let pokeapi_base_url = or_default(&lookup, "POKESHOP_POKEAPI_BASE_URL", DEFAULT_POKEAPI_BASE_URL);
    let request_timeout_secs: u64 =
        parse_var(&lookup, "POKESHOP_HARVEST_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(&lookup, "POKESHOP_HARVEST_USER_AGENT", DEFAULT_HARVEST_USER_AGENT);

    Ok(HarvestConfig {
        env,
        log_level,
        pokeapi_base_url,
        request_timeout_secs,
        user_agent,
    })
}

fn or_default<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Result<String, VarError>,
{
    lookup(var).unwrap_or_else(|_| default.to_string())
}

fn parse_var<F, T>(lookup: &F, var: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = or_default(lookup, var, default);
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "POKESHOP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
