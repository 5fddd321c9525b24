use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::email::Email;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityId(Uuid);

impl IdentityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for IdentityId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered principal as seen by the handlers.
///
/// The credential never leaves the backend, so it is not part of this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: IdentityId,
    email: Email,
    confirmed: bool,
}

impl Identity {
    pub fn new(id: IdentityId, email: Email, confirmed: bool) -> Self {
        Self {
            id,
            email,
            confirmed,
        }
    }

    pub fn id(&self) -> IdentityId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}
