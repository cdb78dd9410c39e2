//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] igloo_config::ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] igloo_session::SessionError),
}

impl CoreError {
    /// True when the reply lacked the field a method unwraps
    pub fn is_response_format(&self) -> bool {
        matches!(
            self,
            CoreError::Session(igloo_session::SessionError::ResponseFormat { .. })
        )
    }

    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            CoreError::Session(igloo_session::SessionError::Authentication(_))
        )
    }
}
