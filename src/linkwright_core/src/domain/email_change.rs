use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    email::Email, error::AuthError, identity::IdentityId, verification_link::LinkRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Confirmation state of one email change request.
///
/// ```text
/// Pending --current--> CurrentConfirmed --new--> Completed
///    \                        |
///     +------ expiry ---------+----> Expired
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationState {
    Pending,
    CurrentConfirmed,
    Completed,
    Expired,
}

#[derive(Debug, Clone)]
pub struct EmailChangeRequest {
    id: RequestId,
    identity_id: IdentityId,
    current_email: Email,
    new_email: Email,
    expires_at: DateTime<Utc>,
    state: ConfirmationState,
}

impl EmailChangeRequest {
    /// Opens a new request in `Pending`.
    ///
    /// Rejects a new address equal to the current one.
    pub fn new(
        identity_id: IdentityId,
        current_email: Email,
        new_email: Email,
        now: DateTime<Utc>,
        ttl: TimeDelta,
    ) -> Result<Self, AuthError> {
        if current_email == new_email {
            return Err(AuthError::InvalidInput(
                "New email address must differ from the current one".to_string(),
            ));
        }

        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Unexpected("Link lifetime out of range".to_string()))?;

        Ok(Self {
            id: RequestId::new(),
            identity_id,
            current_email,
            new_email,
            expires_at,
            state: ConfirmationState::Pending,
        })
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn identity_id(&self) -> IdentityId {
        self.identity_id
    }

    pub fn current_email(&self) -> &Email {
        &self.current_email
    }

    pub fn new_email(&self) -> &Email {
        &self.new_email
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        matches!(
            self.state,
            ConfirmationState::Pending | ConfirmationState::CurrentConfirmed
        ) && now < self.expires_at
    }

    /// Applies the redemption of a link with `role` at `now`.
    ///
    /// On error the state is unchanged, except that an elapsed request is
    /// moved to `Expired`.
    pub fn confirm(
        &mut self,
        role: LinkRole,
        now: DateTime<Utc>,
    ) -> Result<ConfirmationState, AuthError> {
        if self.state == ConfirmationState::Completed {
            return Err(AuthError::LinkAlreadyUsed);
        }
        if self.state == ConfirmationState::Expired || now >= self.expires_at {
            self.state = ConfirmationState::Expired;
            return Err(AuthError::LinkExpired);
        }

        let next = match (role, self.state) {
            (LinkRole::EmailChangeCurrent, ConfirmationState::Pending) => {
                ConfirmationState::CurrentConfirmed
            }
            (LinkRole::EmailChangeCurrent, _) => return Err(AuthError::LinkAlreadyUsed),
            (LinkRole::EmailChangeNew, ConfirmationState::Pending) => {
                return Err(AuthError::OutOfOrderConfirmation);
            }
            (LinkRole::EmailChangeNew, _) => ConfirmationState::Completed,
            (LinkRole::Signup, _) => return Err(AuthError::InvalidLink),
        };

        self.state = next;
        Ok(next)
    }
}
