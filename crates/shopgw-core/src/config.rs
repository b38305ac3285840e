use crate::app_config::{AppConfig, Environment, Provider};
use crate::ConfigError;

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
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
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

    let catalog_api_key = require("SHOPGW_CATALOG_API_KEY")?;
    let shop_id = require("SHOPGW_SHOP_ID")?;
    let cdn_account_hash = require("SHOPGW_CDN_ACCOUNT_HASH")?;

    let env = parse_environment(&or_default("SHOPGW_ENV", "development"));
    let provider = parse_provider(&or_default("SHOPGW_PROVIDER", "sellauth"))?;

    let bind_addr = parse_addr("SHOPGW_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPGW_LOG_LEVEL", "info");
    let catalog_base_url = lookup("SHOPGW_CATALOG_BASE_URL").ok();
    let checkout_base_url = or_default("SHOPGW_CHECKOUT_BASE_URL", "https://api.lemonsqueezy.com/v1");
    let checkout_api_key = lookup("SHOPGW_CHECKOUT_API_KEY").ok();
    let checkout_success_url = or_default(
        "SHOPGW_CHECKOUT_SUCCESS_URL",
        "https://example.com/thank-you",
    );
    let request_timeout_secs = parse_u64("SHOPGW_REQUEST_TIMEOUT_SECS", "12")?;
    let user_agent = or_default("SHOPGW_USER_AGENT", "shopgw/0.1 (storefront-gateway)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider,
        shop_id,
        catalog_api_key,
        catalog_base_url,
        cdn_account_hash,
        checkout_base_url,
        checkout_api_key,
        checkout_success_url,
        request_timeout_secs,
        user_agent,
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

/// Parse a string into a `Provider` variant.
///
/// Unlike [`parse_environment`], unrecognized values are a hard error: a shop
/// pointed at the wrong catalog dialect fails every request, so startup is the
/// place to catch the typo.
fn parse_provider(s: &str) -> Result<Provider, ConfigError> {
    match s {
        "sellauth" => Ok(Provider::SellAuth),
        "lemonsqueezy" => Ok(Provider::LemonSqueezy),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPGW_PROVIDER".to_string(),
            reason: format!("unknown provider \"{other}\" (expected sellauth or lemonsqueezy)"),
        }),
    }
}
