use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};

use crate::domain::{
    email_change::{EmailChangeRequest, RequestId},
    error::AuthError,
    identity::IdentityId,
};

const LINK_TOKEN_LENGTH: usize = 48;

/// The confirmation purpose a link is scoped to.
///
/// The serialized names match GoTrue's `generate_link` types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRole {
    Signup,
    EmailChangeCurrent,
    EmailChangeNew,
}

impl LinkRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkRole::Signup => "signup",
            LinkRole::EmailChangeCurrent => "email_change_current",
            LinkRole::EmailChangeNew => "email_change_new",
        }
    }
}

impl fmt::Display for LinkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkRole {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(LinkRole::Signup),
            "email_change_current" => Ok(LinkRole::EmailChangeCurrent),
            "email_change_new" => Ok(LinkRole::EmailChangeNew),
            other => Err(AuthError::InvalidInput(format!(
                "Unknown verification type: {other}"
            ))),
        }
    }
}

/// Unguessable single-use token carried by an action link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkToken(String);

impl LinkToken {
    pub fn generate() -> Self {
        let token = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(LINK_TOKEN_LENGTH)
            .map(char::from)
            .collect();
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LinkToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for LinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What redeeming a link acts upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Signup(IdentityId),
    EmailChange(RequestId),
}

#[derive(Debug, Clone)]
pub struct VerificationLink {
    token: LinkToken,
    role: LinkRole,
    identity_id: IdentityId,
    target: LinkTarget,
    expires_at: DateTime<Utc>,
    used: bool,
    revoked: bool,
}

impl VerificationLink {
    pub fn for_signup(identity_id: IdentityId, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: LinkToken::generate(),
            role: LinkRole::Signup,
            identity_id,
            target: LinkTarget::Signup(identity_id),
            expires_at,
            used: false,
            revoked: false,
        }
    }

    /// Mints the two links of an email change request, current-address first.
    pub fn for_email_change(request: &EmailChangeRequest) -> [Self; 2] {
        let link = |role| Self {
            token: LinkToken::generate(),
            role,
            identity_id: request.identity_id(),
            target: LinkTarget::EmailChange(request.id()),
            expires_at: request.expires_at(),
            used: false,
            revoked: false,
        };

        [
            link(LinkRole::EmailChangeCurrent),
            link(LinkRole::EmailChangeNew),
        ]
    }

    pub fn token(&self) -> &LinkToken {
        &self.token
    }

    pub fn role(&self) -> LinkRole {
        self.role
    }

    pub fn identity_id(&self) -> IdentityId {
        self.identity_id
    }

    pub fn target(&self) -> LinkTarget {
        self.target
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Replay is reported before expiry so a second redemption always reads
    /// as `LinkAlreadyUsed`.
    pub fn ensure_redeemable(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.used {
            return Err(AuthError::LinkAlreadyUsed);
        }
        if self.revoked || now >= self.expires_at {
            return Err(AuthError::LinkExpired);
        }
        Ok(())
    }

    pub fn mark_used(&mut self) {
        self.used = true;
    }

    /// Invalidates an unredeemed link that has been superseded.
    pub fn revoke(&mut self) {
        if !self.used {
            self.revoked = true;
        }
    }
}
