//! Session data structure

use chrono::{DateTime, Utc};

use crate::version::ApiVersion;

/// Name of the cookie carrying the session token
pub const AUTH_COOKIE: &str = "iglooauth";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Unauthenticated => "unauthenticated",
            SessionState::Authenticated => "authenticated",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    /// Version used to create the session, `None` when adopted
    version: Option<ApiVersion>,
    established_at: DateTime<Utc>,
}

impl Session {
    pub fn connected(token: String, version: ApiVersion) -> Self {
        Self {
            token,
            version: Some(version),
            established_at: Utc::now(),
        }
    }

    pub fn adopted(token: String) -> Self {
        Self {
            token,
            version: None,
            established_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn version(&self) -> Option<ApiVersion> {
        self.version
    }

    pub fn is_adopted(&self) -> bool {
        self.version.is_none()
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }

    /// `name=value` pair sent in the `Cookie` header
    pub fn cookie(&self) -> String {
        format!("{}={}", AUTH_COOKIE, self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("version", &self.version)
            .field("established_at", &self.established_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connected_session() {
        let session = Session::connected("abc123".to_string(), ApiVersion::V2);
        assert_eq!(session.token(), "abc123");
        assert_eq!(session.version(), Some(ApiVersion::V2));
        assert!(!session.is_adopted());
        assert_eq!(session.cookie(), "iglooauth=abc123");
    }

    #[test]
    fn test_adopted_session() {
        let session = Session::adopted("reused".to_string());
        assert!(session.is_adopted());
        assert_eq!(session.version(), None);
        assert!(!format!("{session:?}").contains("reused"));
    }
}
