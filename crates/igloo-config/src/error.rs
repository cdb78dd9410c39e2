//! Configuration error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration key: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
