//! Community configuration

use std::collections::HashMap;

use serde_json::Value;
use url::Url;

use crate::credentials::{parse_endpoint, Credentials};
use crate::error::ConfigError;
use crate::Result;

/// Every key a configuration source must provide.
pub const REQUIRED_KEYS: &[&str] = &[
    "API_ENDPOINT",
    "COMMUNITY_KEY",
    "ACCESS_KEY",
    "API_KEY",
    "API_USER",
    "API_PASSWORD",
];

/// Prefix applied to [`REQUIRED_KEYS`] when reading the environment.
pub const ENV_PREFIX: &str = "IGLOO_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Community id used by the v2 search routes
    pub community_key: String,
    pub credentials: Credentials,
}

impl Config {
    pub fn new(community_key: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            community_key: community_key.into(),
            credentials,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.credentials.endpoint
    }

    /// Build a configuration from any key lookup.
    ///
    /// Absent and empty values are both reported as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let require = |key: &'static str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingField(key))
        };

        let endpoint = require("API_ENDPOINT")?;
        let community_key = require("COMMUNITY_KEY")?;
        let access_key = require("ACCESS_KEY")?;
        let api_key = require("API_KEY")?;
        let username = require("API_USER")?;
        let password = require("API_PASSWORD")?;

        let config = Self {
            community_key,
            credentials: Credentials {
                endpoint: parse_endpoint(&endpoint)?,
                access_key,
                api_key,
                username,
                password,
            },
        };

        tracing::debug!(endpoint = %config.endpoint(), "Loaded Igloo configuration");

        Ok(config)
    }

    pub fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        Self::from_lookup(|key| map.get(key).cloned())
    }

    /// Parse a JSON object whose values are all strings.
    pub fn from_json(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, Value> = serde_json::from_str(json)?;

        for &key in REQUIRED_KEYS {
            match object.get(key) {
                None | Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(ConfigError::InvalidField {
                        field: key,
                        reason: format!("expected a string, found {}", json_kind(other)),
                    });
                }
            }
        }

        Self::from_lookup(|key| object.get(key).and_then(Value::as_str).map(str::to_string))
    }

    /// Read `IGLOO_API_ENDPOINT`, `IGLOO_COMMUNITY_KEY`, and so on.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`Config::from_env`], reading variables through `var`, which
    /// is handed the full prefixed name.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| var(&format!("{ENV_PREFIX}{key}")))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
