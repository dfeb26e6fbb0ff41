//! Shared domain types and configuration for the Voyage review pipeline.

mod app_config;
mod config;
mod reviews;

pub use app_config::{AppConfig, ClassifierBackendKind, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use reviews::{NewReview, Review, SentimentSummary, MAX_RATING, MIN_RATING};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
