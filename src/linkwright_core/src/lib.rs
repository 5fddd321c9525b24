pub mod domain;
pub mod http_abstraction;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    access_token::{AccessToken, Session},
    action_link::{ActionLink, EmailChangeLinks},
    email::{Email, EmailError},
    email_change::{ConfirmationState, EmailChangeRequest, RequestId},
    error::AuthError,
    identity::{Identity, IdentityId},
    password::{Password, PasswordError},
    verification_link::{LinkRole, LinkTarget, LinkToken, VerificationLink},
};

pub use ports::{
    repositories::{AuthStore, AuthStoreError, Redemption, StoredIdentity},
    services::{CurrentUser, LinkGenerator, VerificationAuthority},
};

pub use strategies::client_factory::{ClientFactory, bearer_credential};

pub use http_abstraction::{AuthRequest, AuthResponseBuilder, AuthResponseHelpers, status_for};
