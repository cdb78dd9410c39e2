//! Igloo session management
//!
//! A session is a single `iglooauth` cookie. It is obtained either by
//! exchanging credentials (`connect`) or by adopting a token issued
//! elsewhere (`adopt`):
//!
//! ```text
//! Unauthenticated
//!   ↓ connect | adopt
//! Authenticated ⟲ connect | adopt (cookie replaced)
//! ```
//!
//! The remote server owns expiry. A stale token shows up as an
//! authentication error on the next request.

mod client;
mod error;
mod session;
mod version;

pub use client::{unwrap_field, SessionClient};
pub use error::SessionError;
pub use session::{Session, SessionState, AUTH_COOKIE};
pub use version::{ApiVersion, SessionRequest};

pub type Result<T> = std::result::Result<T, SessionError>;
