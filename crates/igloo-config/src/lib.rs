//! Igloo client configuration
//!
//! A community is addressed by six required values:
//! `API_ENDPOINT`, `COMMUNITY_KEY`, `ACCESS_KEY`, `API_KEY`, `API_USER`
//! and `API_PASSWORD`. They can come from a map, a JSON object or the
//! process environment. None of them are ever written anywhere.

mod config;
mod credentials;
mod error;

pub use config::{Config, ENV_PREFIX, REQUIRED_KEYS};
pub use credentials::Credentials;
pub use error::ConfigError;

pub type Result<T> = std::result::Result<T, ConfigError>;
