use secrecy::{ExposeSecret, Secret};

/// Bearer credential presented by a caller.
#[derive(Debug, Clone)]
pub struct AccessToken(Secret<String>);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(Secret::new(token))
    }

    /// Value for an `Authorization` header.
    pub fn to_header_value(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl AsRef<Secret<String>> for AccessToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// Result of a password sign-in against the local authority.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: AccessToken,
    pub expires_in_seconds: i64,
}
