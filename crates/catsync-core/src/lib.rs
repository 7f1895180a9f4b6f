//! Shared types for the catsync workspace: the build-time catalog,
//! environment configuration, the persisted variant map, and the
//! configuration-block generator consumed by the injector.

mod app_config;
pub mod catalog;
pub mod codegen;
mod config;
pub mod variant_map;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
