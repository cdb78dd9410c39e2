//! API version strategy
//!
//! Igloo exposes two REST generations side by side. The version picked at
//! connect time decides where the session is created, how the
//! credentials are encoded and where the token sits in the reply.

use serde_json::{json, Value};

use igloo_config::Credentials;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// `/.api/api.svc/`, form-encoded requests, payloads under `response`
    V1,
    /// `/.api2/api/`, JSON requests
    #[default]
    V2,
}

/// Body of a session-create call.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionRequest {
    Form(Vec<(&'static str, String)>),
    Json(Value),
}

impl ApiVersion {
    /// Root prefix appended to the community endpoint
    pub fn root(&self) -> &'static str {
        match self {
            ApiVersion::V1 => ".api/api.svc/",
            ApiVersion::V2 => ".api2/api/",
        }
    }

    /// Path segments of the session-create route, relative to [`root`](Self::root)
    pub fn session_create_path(&self) -> &'static [&'static str] {
        match self {
            ApiVersion::V1 => &["session", "create"],
            ApiVersion::V2 => &["Session", "Create"],
        }
    }

    pub fn session_request(&self, credentials: &Credentials) -> SessionRequest {
        match self {
            ApiVersion::V1 => SessionRequest::Form(vec![
                ("appId", credentials.access_key.clone()),
                ("appPass", credentials.api_key.clone()),
                ("username", credentials.username.clone()),
                ("password", credentials.password.clone()),
                ("apiversion", "1".to_string()),
                ("community", credentials.endpoint.to_string()),
            ]),
            ApiVersion::V2 => SessionRequest::Json(json!({
                "AppId": credentials.access_key,
                "AppPassword": credentials.api_key,
                "UserName": credentials.username,
                "UserPassword": credentials.password,
                "instance": 0,
                "version": 1,
            })),
        }
    }

    /// Location of the token in the session-create reply
    pub fn token_path(&self) -> &'static [&'static str] {
        match self {
            ApiVersion::V1 => &["response", "sessionKey"],
            ApiVersion::V2 => &["TokenId"],
        }
    }

    pub fn token_field(&self) -> String {
        self.token_path().join(".")
    }

    /// Pull the token out of a session-create reply. Non-string values
    /// count as absent.
    pub fn extract_token<'a>(&self, body: &'a Value) -> Option<&'a str> {
        self.token_path()
            .iter()
            .try_fold(body, |value, key| value.get(key))
            .and_then(Value::as_str)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "v1" => Ok(ApiVersion::V1),
            "2" | "v2" => Ok(ApiVersion::V2),
            _ => Err(format!("Unknown API version: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new(
            "https://community.example.com",
            "app-id",
            "app-secret",
            "alice",
            "hunter2",
        )
        .unwrap()
    }

    #[test]
    fn test_default_is_v2() {
        assert_eq!(ApiVersion::default(), ApiVersion::V2);
    }

    #[test]
    fn test_v1_request_is_form() {
        let request = ApiVersion::V1.session_request(&credentials());

        let SessionRequest::Form(params) = request else {
            panic!("v1 should send form parameters");
        };
        assert_eq!(
            params,
            vec![
                ("appId", "app-id".to_string()),
                ("appPass", "app-secret".to_string()),
                ("username", "alice".to_string()),
                ("password", "hunter2".to_string()),
                ("apiversion", "1".to_string()),
                ("community", "https://community.example.com/".to_string()),
            ]
        );
    }

    #[test]
    fn test_v2_request_is_json() {
        let request = ApiVersion::V2.session_request(&credentials());

        assert_eq!(
            request,
            SessionRequest::Json(json!({
                "AppId": "app-id",
                "AppPassword": "app-secret",
                "UserName": "alice",
                "UserPassword": "hunter2",
                "instance": 0,
                "version": 1,
            }))
        );
    }

    #[test]
    fn test_extract_token() {
        let v2 = json!({"TokenId": "abc123"});
        assert_eq!(ApiVersion::V2.extract_token(&v2), Some("abc123"));
        assert_eq!(ApiVersion::V1.extract_token(&v2), None);

        let v1 = json!({"response": {"sessionKey": "xyz789"}});
        assert_eq!(ApiVersion::V1.extract_token(&v1), Some("xyz789"));
        assert_eq!(ApiVersion::V2.extract_token(&v1), None);

        let wrong_type = json!({"TokenId": 42});
        assert_eq!(ApiVersion::V2.extract_token(&wrong_type), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("v1".parse::<ApiVersion>(), Ok(ApiVersion::V1));
        assert_eq!("2".parse::<ApiVersion>(), Ok(ApiVersion::V2));
        assert_eq!("V2".parse::<ApiVersion>(), Ok(ApiVersion::V2));
        assert!("3".parse::<ApiVersion>().is_err());
        assert_eq!(ApiVersion::V1.token_field(), "response.sessionKey");
    }
}
