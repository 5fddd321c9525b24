use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

/// GoTrue's default minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password should be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,
}

#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
