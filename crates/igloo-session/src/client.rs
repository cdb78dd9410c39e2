//! Session client
//!
//! Owns the HTTP client and its cookie jar. The jar only holds cookies
//! the server sets; `iglooauth` always comes from the current
//! [`Session`] and is written into the `Cookie` header verbatim.

use std::sync::Arc;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderValue, ACCEPT, COOKIE};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use igloo_config::Credentials;

use crate::error::SessionError;
use crate::session::{Session, SessionState, AUTH_COOKIE};
use crate::version::{ApiVersion, SessionRequest};
use crate::Result;

const JSON: &str = "application/json";

pub struct SessionClient {
    http: Client,
    jar: Arc<Jar>,
    /// Community base URL, ends with `/`
    endpoint: Url,
    session: Option<Session>,
}

impl SessionClient {
    pub fn new(endpoint: Url) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self {
            http,
            jar,
            endpoint,
            session: None,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn state(&self) -> SessionState {
        match self.session {
            Some(_) => SessionState::Authenticated,
            None => SessionState::Unauthenticated,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(Session::token)
    }

    /// Exchange credentials for a session token.
    ///
    /// Any failure, including a reply without the token field, is an
    /// authentication error. On success the previous cookie is replaced.
    pub fn connect(&mut self, credentials: &Credentials, version: ApiVersion) -> Result<&Session> {
        let url = self.api_url(version, version.session_create_path())?;

        tracing::debug!(method = "POST", url = %url, version = %version, "Creating session");

        let request = match version.session_request(credentials) {
            SessionRequest::Form(params) => self.http.post(url).header(ACCEPT, JSON).form(&params),
            SessionRequest::Json(body) => self.http.post(url).json(&body),
        };

        let body = self
            .execute(request)
            .and_then(decode)
            .map_err(|e| match e {
                SessionError::Authentication(_) => e,
                other => SessionError::Authentication(format!("session create failed: {other}")),
            })?;

        let token = version.extract_token(&body).ok_or_else(|| {
            tracing::warn!(version = %version, "Session reply has no token");
            SessionError::Authentication(format!(
                "session reply is missing '{}'",
                version.token_field()
            ))
        })?;

        validate_token(token).map_err(|e| {
            SessionError::Authentication(format!("session reply token rejected: {e}"))
        })?;

        let session = Session::connected(token.to_string(), version);
        tracing::info!(endpoint = %self.endpoint, version = %version, "Established session");

        Ok(self.session.insert(session))
    }

    /// Use a token obtained elsewhere. No request is made and the token is
    /// not checked against the server, only against what a `Cookie` header
    /// can carry unchanged.
    pub fn adopt(&mut self, token: impl Into<String>) -> Result<&Session> {
        let token = token.into();
        validate_token(&token)?;

        tracing::info!(endpoint = %self.endpoint, "Adopted existing session");
        Ok(self.session.insert(Session::adopted(token)))
    }

    /// Build `{endpoint}{root}{segments...}`. Segments are percent-encoded.
    pub fn api_url(&self, version: ApiVersion, segments: &[&str]) -> Result<Url> {
        let mut url = self
            .endpoint
            .join(version.root())
            .map_err(|e| SessionError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| SessionError::InvalidUrl(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub fn get_json(&self, url: Url, query: &[(&str, String)]) -> Result<Value> {
        let cookie = self.cookie_header(&url)?;
        tracing::debug!(method = "GET", url = %url, "Igloo request");

        let request = self
            .http
            .get(url)
            .header(ACCEPT, JSON)
            .header(COOKIE, cookie)
            .query(query);
        decode(self.execute(request)?)
    }

    pub fn post_json(&self, url: Url, query: &[(&str, String)]) -> Result<Value> {
        let cookie = self.cookie_header(&url)?;
        tracing::debug!(method = "POST", url = %url, "Igloo request");

        let request = self
            .http
            .post(url)
            .header(ACCEPT, JSON)
            .header(COOKIE, cookie)
            .query(query);
        decode(self.execute(request)?)
    }

    /// Fetch a regular web page under the endpoint, e.g. `"wiki/home"`.
    pub fn get_text(&self, fragment: &str) -> Result<String> {
        let url = self
            .endpoint
            .join(fragment.trim_start_matches('/'))
            .map_err(|e| SessionError::InvalidUrl(format!("{fragment}: {e}")))?;
        let cookie = self.cookie_header(&url)?;
        tracing::debug!(method = "GET", url = %url, "Igloo page request");

        Ok(self.execute(self.http.get(url).header(COOKIE, cookie))?.text()?)
    }

    /// Server cookies for `url` followed by `iglooauth=<token>`. Any
    /// `iglooauth` the server set itself is left out.
    ///
    /// Setting the header explicitly keeps reqwest from adding the jar's
    /// cookies a second time.
    fn cookie_header(&self, url: &Url) -> Result<HeaderValue> {
        let session = self.session.as_ref().ok_or(SessionError::NotAuthenticated)?;

        let mut pairs: Vec<String> = self
            .jar
            .cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
            .map(|header| {
                header
                    .split(';')
                    .map(str::trim)
                    .filter(|pair| !pair.is_empty() && !is_auth_cookie(pair))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        pairs.push(session.cookie());

        HeaderValue::from_str(&pairs.join("; "))
            .map_err(|_| SessionError::InvalidToken("cookie header is not valid".to_string()))
    }

    fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(url = %response.url(), status = status.as_u16(), "Session rejected");
            return Err(SessionError::Authentication(format!(
                "server responded {status}"
            )));
        }

        if !status.is_success() {
            return Err(SessionError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        Ok(response)
    }
}

impl std::fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("session", &self.session)
            .finish()
    }
}

fn is_auth_cookie(pair: &str) -> bool {
    pair.split_once('=')
        .map_or(pair, |(name, _)| name)
        .trim()
        == AUTH_COOKIE
}

/// A token is usable when `iglooauth=<token>` reaches the server byte for
/// byte: no control characters and no surrounding whitespace.
fn validate_token(token: &str) -> Result<()> {
    if token.trim() != token {
        return Err(SessionError::InvalidToken(
            "token has leading or trailing whitespace".to_string(),
        ));
    }
    if HeaderValue::from_str(token).is_err() {
        return Err(SessionError::InvalidToken(
            "token contains characters not allowed in a header".to_string(),
        ));
    }
    Ok(())
}

fn decode(response: Response) -> Result<Value> {
    let text = response.text()?;
    Ok(serde_json::from_str(&text)?)
}

/// Take `key` out of a JSON object.
pub fn unwrap_field(mut body: Value, key: &'static str) -> Result<Value> {
    body.get_mut(key)
        .map(Value::take)
        .ok_or(SessionError::ResponseFormat { field: key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(endpoint: &str) -> SessionClient {
        SessionClient::new(Url::parse(endpoint).unwrap()).unwrap()
    }

    #[test]
    fn test_api_url() {
        let client = client("https://community.example.com/");

        let url = client
            .api_url(ApiVersion::V1, &["community", "view"])
            .unwrap();
        assert_eq!(url.as_str(), "https://community.example.com/.api/api.svc/community/view");

        let url = client
            .api_url(ApiVersion::V2, ApiVersion::V2.session_create_path())
            .unwrap();
        assert_eq!(url.as_str(), "https://community.example.com/.api2/api/Session/Create");
    }

    #[test]
    fn test_api_url_keeps_endpoint_path_and_escapes_segments() {
        let client = client("https://example.com/intranet/");

        let url = client
            .api_url(ApiVersion::V1, &["folders", "a b/c", "children", "view"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/intranet/.api/api.svc/folders/a%20b%2Fc/children/view"
        );
    }

    #[test]
    fn test_starts_unauthenticated() {
        let client = client("https://example.com/");
        assert_eq!(client.state(), SessionState::Unauthenticated);
        assert!(client.token().is_none());

        let url = client.api_url(ApiVersion::V1, &["community", "view"]).unwrap();
        assert!(matches!(
            client.get_json(url, &[]),
            Err(SessionError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_adopt_replaces_token() {
        let mut client = client("https://example.com/");
        client.adopt("first").unwrap();
        client.adopt("second").unwrap();

        assert_eq!(client.state(), SessionState::Authenticated);
        assert_eq!(client.token(), Some("second"));

        let header = client.cookie_header(client.endpoint()).unwrap();
        assert_eq!(header.to_str().unwrap(), "iglooauth=second");
    }

    #[test]
    fn test_server_auth_cookie_is_ignored() {
        let mut client = client("https://example.com/");
        let url = client.endpoint().clone();
        client.jar.add_cookie_str("theme=dark; Path=/", &url);
        client.jar.add_cookie_str("iglooauth=from-server; Path=/", &url);
        client.adopt("ours").unwrap();

        let header = client.cookie_header(&url).unwrap();
        assert_eq!(header.to_str().unwrap(), "theme=dark; iglooauth=ours");
    }

    #[test]
    fn test_unsendable_tokens_are_rejected() {
        let mut client = client("https://example.com/");
        client.adopt("kept").unwrap();

        for token in ["x\ny", " lead", "trail ", "tab\t"] {
            assert!(
                matches!(client.adopt(token), Err(SessionError::InvalidToken(_))),
                "{token:?} should be rejected"
            );
        }
        assert_eq!(client.token(), Some("kept"));

        // Separators are sent as-is
        client.adopt("a;b").unwrap();
        let header = client.cookie_header(client.endpoint()).unwrap();
        assert_eq!(header.to_str().unwrap(), "iglooauth=a;b");
    }

    #[test]
    fn test_is_auth_cookie() {
        assert!(is_auth_cookie("iglooauth=abc"));
        assert!(is_auth_cookie("iglooauth"));
        assert!(!is_auth_cookie("iglooauthx=abc"));
        assert!(!is_auth_cookie("theme=iglooauth"));
    }

    #[test]
    fn test_unwrap_field() {
        let body = json!({"response": {"id": 5}});
        assert_eq!(unwrap_field(body, "response").unwrap(), json!({"id": 5}));

        let body = json!({"dictionary": {}});
        assert!(matches!(
            unwrap_field(body, "response"),
            Err(SessionError::ResponseFormat { field: "response" })
        ));
    }
}
