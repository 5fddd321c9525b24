use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use secrecy::Secret;
use thiserror::Error;
use tokio::sync::OnceCell;

use linkwright_core::{
    ActionLink, AuthError, AuthStore, AuthStoreError, Email, EmailChangeLinks, EmailChangeRequest,
    LinkGenerator, LinkRole, LinkToken, Password, Redemption, Session, VerificationAuthority,
    VerificationLink,
};

use super::{
    credentials::{compute_password_hash, verify_password_hash},
    session::{SessionConfig, issue_session},
};
use crate::config::{LocalSettings, local::VERIFY_PATH};

const INVALID_CREDENTIALS: &str = "Invalid login credentials";

#[derive(Debug, Error)]
pub enum LocalAuthorityError {
    #[error("Invalid public url: {0}")]
    InvalidPublicUrl(String),
    #[error("Invalid lifetime: {0}s")]
    InvalidLifetime(i64),
}

struct LocalAuthorityConfig {
    verify_url: Url,
    link_ttl: TimeDelta,
    session: SessionConfig,
    redirect_to: Option<String>,
    // Verified against on unknown addresses so sign-in costs one argon2 run either way.
    dummy_hash: OnceCell<String>,
}

/// Self-hosted stand-in for GoTrue: issues action links that point back at
/// this service and applies them to an [`AuthStore`].
pub struct LocalAuthority<S> {
    store: S,
    config: Arc<LocalAuthorityConfig>,
}

impl<S: Clone> Clone for LocalAuthority<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: AuthStore> LocalAuthority<S> {
    pub fn new(store: S, settings: &LocalSettings) -> Result<Self, LocalAuthorityError> {
        let mut base = settings.public_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let verify_url = Url::parse(&base)
            .and_then(|base| base.join(VERIFY_PATH))
            .map_err(|e| LocalAuthorityError::InvalidPublicUrl(e.to_string()))?;

        let link_ttl = TimeDelta::try_seconds(settings.link_ttl_in_seconds)
            .ok_or(LocalAuthorityError::InvalidLifetime(settings.link_ttl_in_seconds))?;

        let session = match &settings.jwt_secret {
            Some(secret) => SessionConfig {
                jwt_secret: Secret::clone(secret),
                session_ttl_in_seconds: settings.session_ttl_in_seconds,
            },
            None => {
                tracing::warn!("No jwt secret configured, sessions will not survive a restart");
                SessionConfig::with_random_secret(settings.session_ttl_in_seconds)
            }
        };

        Ok(Self {
            store,
            config: Arc::new(LocalAuthorityConfig {
                verify_url,
                link_ttl,
                session,
                redirect_to: settings.redirect_to.clone(),
                dummy_hash: OnceCell::new(),
            }),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.config.session
    }

    fn action_link(&self, link: &VerificationLink) -> ActionLink {
        let mut url = self.config.verify_url.clone();
        url.query_pairs_mut()
            .append_pair("token", link.token().as_str())
            .append_pair("type", link.role().as_str());

        ActionLink::new(url.into(), link.role())
    }

    fn link_expiry(&self) -> Result<DateTime<Utc>, AuthError> {
        Utc::now()
            .checked_add_signed(self.config.link_ttl)
            .ok_or_else(|| AuthError::Unexpected("Link lifetime out of range".to_string()))
    }

    async fn dummy_hash(&self) -> Result<&str, AuthError> {
        self.config
            .dummy_hash
            .get_or_try_init(|| async {
                let filler: String = rand::rng()
                    .sample_iter(&Alphanumeric)
                    .take(32)
                    .map(char::from)
                    .collect();
                match Password::try_from(Secret::new(filler)) {
                    Ok(filler) => compute_password_hash(filler).await,
                    Err(e) => Err(AuthError::from(e)),
                }
            })
            .await
            .map(String::as_str)
    }
}

fn generation_error(error: AuthStoreError) -> AuthError {
    match error {
        AuthStoreError::Rejected(e) => e,
        AuthStoreError::UnexpectedError(e) => AuthError::Unexpected(e),
        other => AuthError::LinkGenerationFailed(other.to_string()),
    }
}

fn redemption_error(error: AuthStoreError) -> AuthError {
    match error {
        AuthStoreError::Rejected(e) => e,
        AuthStoreError::IdentityNotFound => AuthError::InvalidLink,
        other => AuthError::Unexpected(other.to_string()),
    }
}

#[async_trait]
impl<S: AuthStore> LinkGenerator for LocalAuthority<S> {
    #[tracing::instrument(name = "LocalAuthority::generate_signup_link", skip_all)]
    async fn generate_signup_link(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<ActionLink, AuthError> {
        let password_hash = compute_password_hash(password.clone()).await?;
        let expires_at = self.link_expiry()?;

        let link = self
            .store
            .register_pending(email.clone(), password_hash, expires_at)
            .await
            .map_err(generation_error)?;

        Ok(self.action_link(&link))
    }

    #[tracing::instrument(name = "LocalAuthority::generate_change_links", skip_all)]
    async fn generate_change_links(
        &self,
        current: &Email,
        new: &Email,
    ) -> Result<EmailChangeLinks, AuthError> {
        let stored = self
            .store
            .find_by_email(current)
            .await
            .map_err(generation_error)?;
        if !stored.identity.is_confirmed() {
            return Err(AuthError::LinkGenerationFailed(
                "Email not confirmed".to_string(),
            ));
        }

        let request = EmailChangeRequest::new(
            stored.identity.id(),
            current.clone(),
            new.clone(),
            Utc::now(),
            self.config.link_ttl,
        )?;
        let links = VerificationLink::for_email_change(&request);
        let [current_link, new_link] = [self.action_link(&links[0]), self.action_link(&links[1])];

        self.store
            .open_email_change(request, links)
            .await
            .map_err(generation_error)?;

        Ok(EmailChangeLinks {
            current: current_link,
            new: new_link,
        })
    }
}

#[async_trait]
impl<S: AuthStore> VerificationAuthority for LocalAuthority<S> {
    #[tracing::instrument(name = "LocalAuthority::redeem", skip(self, token))]
    async fn redeem(&self, token: &LinkToken, role: LinkRole) -> Result<Redemption, AuthError> {
        self.store
            .redeem(token, role, Utc::now())
            .await
            .map_err(redemption_error)
    }

    #[tracing::instrument(name = "LocalAuthority::sign_in", skip_all)]
    async fn sign_in(&self, email: &Email, password: &Password) -> Result<Session, AuthError> {
        let stored = match self.store.find_by_email(email).await {
            Ok(stored) => stored,
            Err(AuthStoreError::IdentityNotFound) => {
                let dummy = self.dummy_hash().await?.to_owned();
                verify_password_hash(dummy, password.clone()).await?;
                return Err(AuthError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
            }
            Err(e) => return Err(AuthError::Unexpected(e.to_string())),
        };

        if !verify_password_hash(stored.password_hash, password.clone()).await? {
            return Err(AuthError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        }
        if !stored.identity.is_confirmed() {
            return Err(AuthError::Unauthenticated("Email not confirmed".to_string()));
        }

        issue_session(&stored.identity, &self.config.session).map_err(AuthError::from)
    }

    fn redirect_to(&self) -> Option<&str> {
        self.config.redirect_to.as_deref()
    }
}
