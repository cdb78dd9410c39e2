//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response is missing expected field '{field}'")]
    ResponseFormat { field: &'static str },

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("No active session")]
    NotAuthenticated,
}
