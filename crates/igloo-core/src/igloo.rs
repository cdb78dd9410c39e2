//! Igloo client
//!
//! Construction always leaves the client authenticated, either through a
//! credential exchange or by adopting an existing token.

use std::fmt;

use serde_json::Value;
use url::Url;

use igloo_config::Config;
use igloo_session::{unwrap_field, ApiVersion, Session, SessionClient};

use crate::Result;

/// Reply wrapper used by most v1 routes
pub(crate) const RESPONSE: &str = "response";
/// Reply wrapper used by `apisync/view_usergroups`
pub(crate) const DICTIONARY: &str = "dictionary";

pub struct Igloo {
    config: Config,
    client: SessionClient,
}

impl Igloo {
    /// Create a session from the configured credentials.
    pub fn connect(config: Config, version: ApiVersion) -> Result<Self> {
        let mut client = SessionClient::new(config.endpoint().clone())?;
        client.connect(&config.credentials, version)?;

        Ok(Self { config, client })
    }

    /// Reuse a session token obtained elsewhere. Makes no request.
    pub fn adopt(config: Config, token: impl Into<String>) -> Result<Self> {
        let mut client = SessionClient::new(config.endpoint().clone())?;
        client.adopt(token)?;

        Ok(Self { config, client })
    }

    /// Exchange the credentials again, replacing the current cookie.
    pub fn reconnect(&mut self, version: ApiVersion) -> Result<&Session> {
        Ok(self.client.connect(&self.config.credentials, version)?)
    }

    pub fn adopt_token(&mut self, token: impl Into<String>) -> Result<&Session> {
        Ok(self.client.adopt(token)?)
    }

    pub fn session(&self) -> Option<&Session> {
        self.client.session()
    }

    pub fn community_key(&self) -> &str {
        &self.config.community_key
    }

    pub fn endpoint(&self) -> &Url {
        self.client.endpoint()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &SessionClient {
        &self.client
    }

    pub(crate) fn url(&self, version: ApiVersion, segments: &[&str]) -> Result<Url> {
        Ok(self.client.api_url(version, segments)?)
    }

    pub(crate) fn get(&self, url: Url, query: &[(&str, String)]) -> Result<Value> {
        Ok(self.client.get_json(url, query)?)
    }

    pub(crate) fn post(&self, url: Url, query: &[(&str, String)]) -> Result<Value> {
        Ok(self.client.post_json(url, query)?)
    }

    /// GET a v1 route and unwrap `key`
    pub(crate) fn v1_get(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        key: &'static str,
    ) -> Result<Value> {
        let url = self.url(ApiVersion::V1, segments)?;
        Ok(unwrap_field(self.get(url, query)?, key)?)
    }

    /// POST a v1 route and unwrap `key`
    pub(crate) fn v1_post(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        key: &'static str,
    ) -> Result<Value> {
        let url = self.url(ApiVersion::V1, segments)?;
        Ok(unwrap_field(self.post(url, query)?, key)?)
    }
}

impl fmt::Display for Igloo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Igloo @ {}>", self.endpoint())
    }
}

impl fmt::Debug for Igloo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Igloo")
            .field("community_key", &self.config.community_key)
            .field("client", &self.client)
            .finish()
    }
}
