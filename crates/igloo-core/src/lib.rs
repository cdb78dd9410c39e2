//! Igloo Core
//!
//! The [`Igloo`] client: one authenticated session plus a method per
//! community API route. Each method issues exactly one request and hands
//! back the relevant part of the JSON reply untouched.
//!
//! ```no_run
//! use igloo_core::{ApiVersion, Config, Igloo};
//!
//! # fn main() -> igloo_core::Result<()> {
//! let config = Config::from_env()?;
//! let igloo = Igloo::connect(config, ApiVersion::V2)?;
//! let object = igloo.objects_by_path("/wiki/home", None)?;
//! println!("{}", object["id"]);
//! # Ok(())
//! # }
//! ```

mod community;
mod error;
mod igloo;
mod labels;
mod objects;
mod search;

pub use error::CoreError;
pub use igloo::Igloo;

// Re-export core components
pub use igloo_config::{Config, ConfigError, Credentials};
pub use igloo_session::{ApiVersion, Session, SessionError, SessionState, AUTH_COOKIE};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
