use std::fmt;

use crate::domain::verification_link::LinkRole;

/// A fully-qualified, single-use URL that performs an auth state transition
/// when visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionLink {
    url: String,
    role: LinkRole,
}

impl ActionLink {
    pub fn new(url: String, role: LinkRole) -> Self {
        Self { url, role }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn role(&self) -> LinkRole {
        self.role
    }

    pub fn into_url(self) -> String {
        self.url
    }
}

impl fmt::Display for ActionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The pair of links issued for one email change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailChangeLinks {
    pub current: ActionLink,
    pub new: ActionLink,
}
