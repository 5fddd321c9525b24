use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    email_change::{EmailChangeRequest, RequestId},
    error::AuthError,
    identity::{Identity, IdentityId},
    verification_link::{LinkRole, LinkToken, VerificationLink},
};

// AuthStore port trait and errors
#[derive(Debug, Error)]
pub enum AuthStoreError {
    #[error("User already registered")]
    IdentityAlreadyExists,
    #[error("User not found")]
    IdentityNotFound,
    #[error("A user with this email address has already been registered")]
    EmailTaken,
    #[error(transparent)]
    Rejected(#[from] AuthError),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AuthStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::IdentityAlreadyExists, Self::IdentityAlreadyExists) => true,
            (Self::IdentityNotFound, Self::IdentityNotFound) => true,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::Rejected(a), Self::Rejected(b)) => a == b,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// An identity together with its stored credential.
#[derive(Debug, Clone)]
pub struct StoredIdentity {
    pub identity: Identity,
    pub password_hash: String,
}

/// Outcome of a successful link redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption {
    SignupConfirmed {
        identity_id: IdentityId,
        email: Email,
    },
    CurrentConfirmed {
        request_id: RequestId,
        email: Email,
    },
    /// The identity's address now equals `email`.
    Completed {
        request_id: RequestId,
        email: Email,
    },
}

impl Redemption {
    pub fn status(&self) -> &'static str {
        match self {
            Redemption::SignupConfirmed { .. } => "signup_confirmed",
            Redemption::CurrentConfirmed { .. } => "current_confirmed",
            Redemption::Completed { .. } => "completed",
        }
    }

    pub fn email(&self) -> &Email {
        match self {
            Redemption::SignupConfirmed { email, .. }
            | Redemption::CurrentConfirmed { email, .. }
            | Redemption::Completed { email, .. } => email,
        }
    }
}

/// Backing store for identities, email change requests and verification links.
///
/// Every method is a single atomic operation with respect to every other.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Creates an unconfirmed identity, or re-keys an existing unconfirmed one
    /// with a new credential, and issues its signup link. Earlier signup links
    /// of that identity are revoked.
    async fn register_pending(
        &self,
        email: Email,
        password_hash: String,
        link_expires_at: DateTime<Utc>,
    ) -> Result<VerificationLink, AuthStoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<StoredIdentity, AuthStoreError>;

    async fn find_by_id(&self, id: IdentityId) -> Result<StoredIdentity, AuthStoreError>;

    /// Stores `request` with its two links, superseding the identity's active
    /// request if there is one.
    async fn open_email_change(
        &self,
        request: EmailChangeRequest,
        links: [VerificationLink; 2],
    ) -> Result<(), AuthStoreError>;

    /// Check-and-set redemption of `token`. A link presented under the wrong
    /// `role` is unknown and stays unused.
    async fn redeem(
        &self,
        token: &LinkToken,
        role: LinkRole,
        now: DateTime<Utc>,
    ) -> Result<Redemption, AuthStoreError>;
}
