pub mod app_config;
pub mod catalog;
pub mod config;
pub mod pricing;

pub use app_config::{AppConfig, Environment, HarvestConfig};
pub use catalog::{HarvestedRecord, MissingField, NewCatalogItem, NO_DESCRIPTION};
pub use config::{
    load_app_config, load_app_config_from_env, load_harvest_config, load_harvest_config_from_env,
};
pub use pricing::{PricingConfig, PricingError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
