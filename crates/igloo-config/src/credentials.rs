//! Credentials used to create a session

use std::fmt;

use url::Url;

use crate::error::ConfigError;
use crate::Result;

/// Values exchanged for a session token. Held in memory only.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Community base URL, always ending with `/`
    pub endpoint: Url,
    /// Application id (`ACCESS_KEY`)
    pub access_key: String,
    /// Application password (`API_KEY`)
    pub api_key: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        endpoint: &str,
        access_key: impl Into<String>,
        api_key: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            access_key: access_key.into(),
            api_key: api_key.into(),
            username: username.into(),
            password: password.into(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint.as_str())
            .field("access_key", &self.access_key)
            .field("api_key", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parse a community endpoint.
///
/// Only absolute http(s) URLs are accepted. Query and fragment are
/// dropped and the path gets a trailing `/` so API roots can be appended.
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let mut url =
        Url::parse(trimmed).map_err(|e| ConfigError::InvalidEndpoint(format!("{trimmed}: {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEndpoint(format!(
            "{trimmed}: unsupported scheme '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ConfigError::InvalidEndpoint(format!("{trimmed}: missing host")));
    }

    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_gets_trailing_slash() {
        let url = parse_endpoint("https://community.example.com").unwrap();
        assert_eq!(url.as_str(), "https://community.example.com/");

        let url = parse_endpoint(" https://example.com/intranet?x=1#top ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/intranet/");
    }

    #[test]
    fn test_endpoint_rejects_non_http() {
        assert!(matches!(
            parse_endpoint("ftp://example.com/"),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            parse_endpoint("community.example.com"),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new(
            "https://example.com/",
            "app-id",
            "app-secret",
            "alice",
            "hunter2",
        )
        .unwrap();

        let printed = format!("{creds:?}");
        assert!(printed.contains("app-id"));
        assert!(printed.contains("alice"));
        assert!(!printed.contains("app-secret"));
        assert!(!printed.contains("hunter2"));
    }
}
