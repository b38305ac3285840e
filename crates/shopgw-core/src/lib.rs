mod app_config;
mod config;
mod products;

pub use app_config::{AppConfig, Environment, Provider};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{BatchItemError, BatchResultItem, NormalizedProduct, ResolvedImage};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
