use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Decoupled from the real environment so tests can use a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;
    let log_level = or_default("STOREFRONT_LOG_LEVEL", env.default_log_level());
    let catalog_path = lookup("STOREFRONT_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let checkout_delay_ms = parse_u64("STOREFRONT_CHECKOUT_DELAY_MS", "1500")?;
    let feedback_ms = parse_u64("STOREFRONT_FEEDBACK_MS", "1000")?;
    let related_limit = parse_usize("STOREFRONT_RELATED_LIMIT", "4")?;

    let tax_rate = or_default("STOREFRONT_TAX_RATE", "0.08")
        .parse::<Decimal>()
        .map_err(|e| invalid("STOREFRONT_TAX_RATE", e.to_string()))?;
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
        return Err(invalid(
            "STOREFRONT_TAX_RATE",
            format!("{tax_rate} is outside 0..=1"),
        ));
    }

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        checkout_delay_ms,
        feedback_ms,
        tax_rate,
        related_limit,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
