use thiserror::Error;

use crate::domain::{email::EmailError, password::PasswordError};

/// Every way a link flow can fail.
///
/// Handlers map each variant to exactly one HTTP status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Link generation failed: {0}")]
    LinkGenerationFailed(String),

    #[error("Invalid or unknown link")]
    InvalidLink,

    #[error("Link has already been used")]
    LinkAlreadyUsed,

    #[error("Link has expired")]
    LinkExpired,

    #[error("The current email address must be confirmed first")]
    OutOfOrderConfirmation,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AuthError {
    /// The link-issuing routes answer a rejected request with a generation
    /// failure. A missing or invalid caller stays `Unauthenticated`.
    pub fn into_issuance_failure(self) -> Self {
        match self {
            AuthError::InvalidInput(reason) => AuthError::LinkGenerationFailed(reason),
            other => other,
        }
    }
}

impl From<EmailError> for AuthError {
    fn from(error: EmailError) -> Self {
        AuthError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(error: PasswordError) -> Self {
        AuthError::InvalidInput(error.to_string())
    }
}
