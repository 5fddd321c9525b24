use async_trait::async_trait;

use crate::{
    domain::{
        access_token::Session,
        action_link::{ActionLink, EmailChangeLinks},
        email::Email,
        error::AuthError,
        identity::Identity,
        password::Password,
        verification_link::{LinkRole, LinkToken},
    },
    ports::repositories::Redemption,
};

/// Elevated-privilege link issuance.
///
/// Implementations hold service-level credentials and must never be reachable
/// from caller input other than through these two operations.
#[async_trait]
pub trait LinkGenerator: Send + Sync {
    /// Creates (or refreshes) an unconfirmed identity and issues its signup link.
    async fn generate_signup_link(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<ActionLink, AuthError>;

    /// Opens an email change request for the identity owning `current` and
    /// issues both confirmation links.
    async fn generate_change_links(
        &self,
        current: &Email,
        new: &Email,
    ) -> Result<EmailChangeLinks, AuthError>;
}

/// Caller-scoped view of the backend: only knows who the caller is.
#[async_trait]
pub trait CurrentUser: Send + Sync {
    async fn get_user(&self) -> Result<Identity, AuthError>;
}

/// The authority action links point at.
#[async_trait]
pub trait VerificationAuthority: Send + Sync {
    /// Redeems a link; `role` is the verification type carried by the URL and
    /// must match the one the token was issued for.
    async fn redeem(&self, token: &LinkToken, role: LinkRole) -> Result<Redemption, AuthError>;

    async fn sign_in(&self, email: &Email, password: &Password) -> Result<Session, AuthError>;

    /// Where a browser lands after a successful redemption.
    fn redirect_to(&self) -> Option<&str> {
        None
    }
}
