//! Self-hosted backend. Links point at this service's own `/verify` route
//! and sessions are HS256 JWTs signed with the configured secret.

pub mod authority;
pub mod client_factory;
pub mod credentials;
pub mod session;

pub use authority::{LocalAuthority, LocalAuthorityError};
pub use client_factory::{LocalClientFactory, LocalUserClient};
pub use session::{SessionClaims, SessionConfig, SessionError};
