use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::{Rng, distr::Alphanumeric};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use linkwright_core::{AccessToken, AuthError, Identity, IdentityId, Session};

const GENERATED_SECRET_LENGTH: usize = 64;
const AUTHENTICATED_ROLE: &str = "authenticated";

#[derive(Clone)]
pub struct SessionConfig {
    pub jwt_secret: Secret<String>,
    pub session_ttl_in_seconds: i64,
}

impl SessionConfig {
    /// Sessions signed with a per-process key do not survive a restart.
    pub fn with_random_secret(session_ttl_in_seconds: i64) -> Self {
        let secret: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(GENERATED_SECRET_LENGTH)
            .map(char::from)
            .collect();

        Self {
            jwt_secret: Secret::new(secret),
            session_ttl_in_seconds,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid subject claim")]
    InvalidSubject,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<SessionError> for AuthError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::UnexpectedError(e) => AuthError::Unexpected(e),
            other => AuthError::Unauthenticated(format!("invalid JWT: {other}")),
        }
    }
}

/// Claim set modelled on the access tokens GoTrue issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

impl SessionClaims {
    pub fn identity_id(&self) -> Result<IdentityId, SessionError> {
        Uuid::parse_str(&self.sub)
            .map(IdentityId::from)
            .map_err(|_| SessionError::InvalidSubject)
    }
}

pub fn issue_session(identity: &Identity, config: &SessionConfig) -> Result<Session, SessionError> {
    let ttl = TimeDelta::try_seconds(config.session_ttl_in_seconds).ok_or_else(|| {
        SessionError::UnexpectedError("Failed to create session duration".to_string())
    })?;

    let exp = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| SessionError::UnexpectedError("Duration out of range".to_string()))?
        .timestamp();
    let exp: usize = exp
        .try_into()
        .map_err(|_| SessionError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = SessionClaims {
        sub: identity.id().to_string(),
        email: identity.email().as_str().to_string(),
        role: AUTHENTICATED_ROLE.to_string(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )?;

    Ok(Session {
        access_token: AccessToken::new(token),
        expires_in_seconds: config.session_ttl_in_seconds,
    })
}

pub fn validate_session_token(
    token: &AccessToken,
    config: &SessionConfig,
) -> Result<SessionClaims, SessionError> {
    let claims = decode::<SessionClaims>(
        token.as_ref().expose_secret(),
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )?
    .claims;

    Ok(claims)
}
