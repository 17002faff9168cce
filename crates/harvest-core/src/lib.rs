pub mod app_config;
pub mod config;
pub mod products;

pub use app_config::{AppConfig, CatalogFilter, ClientHeaders};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    DailyCatalog, EnrichedProduct, Image, MoneyAmount, PricingInfo, ProductDetail, ProductSummary,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
