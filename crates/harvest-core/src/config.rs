use crate::app_config::{AppConfig, CatalogFilter, ClientHeaders};
use crate::ConfigError;

const DEFAULT_CATALOG_BASE_URL: &str = "https://ciago.furlenco.com/api/v1/catalogue/products";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

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
/// Every variable has a default, so an empty environment yields the stock
/// collection filter and header set.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must be non-empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let raw_base_url = non_empty("HARVEST_CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL)?;
    let catalog_base_url =
        reqwest::Url::parse(raw_base_url.trim_end_matches('/')).map_err(|e| {
            ConfigError::InvalidEnvVar {
                var: "HARVEST_CATALOG_BASE_URL".to_string(),
                reason: e.to_string(),
            }
        })?;
    if catalog_base_url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar {
            var: "HARVEST_CATALOG_BASE_URL".to_string(),
            reason: format!("\"{raw_base_url}\" cannot be used as a base URL"),
        });
    }

    let filter = CatalogFilter {
        collection_type: non_empty("HARVEST_COLLECTION_TYPE", "CATEGORY_RENT")?,
        city: non_empty("HARVEST_CITY", "noida")?,
        collection: non_empty("HARVEST_COLLECTION", "bedroom-furniture-on-rent")?,
    };

    let headers = ClientHeaders {
        city_id: non_empty("HARVEST_CITY_ID", "6")?,
        pincode: non_empty("HARVEST_PINCODE", "201010")?,
        client_id: non_empty("HARVEST_CLIENT_ID", "web-1.0")?,
        origin: non_empty("HARVEST_ORIGIN", "https://www.furlenco.com")?,
        user_agent: non_empty("HARVEST_USER_AGENT", DEFAULT_USER_AGENT)?,
    };

    let data_dir = PathBuf::from(non_empty("HARVEST_DATA_DIR", "./data")?);
    let poll_interval_secs = parse_positive_u64("HARVEST_POLL_INTERVAL_SECS", "300")?;
    let item_delay_ms = parse_u64("HARVEST_ITEM_DELAY_MS", "100")?;
    let request_timeout_secs = parse_positive_u64("HARVEST_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("HARVEST_LOG_LEVEL", "info");

    Ok(AppConfig {
        catalog_base_url,
        filter,
        headers,
        data_dir,
        poll_interval_secs,
        item_delay_ms,
        request_timeout_secs,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
