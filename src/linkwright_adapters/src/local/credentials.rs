use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher, SaltString, rand_core},
};
use linkwright_core::{AuthError, Password};
use secrecy::ExposeSecret;

fn hasher() -> Result<Argon2<'static>, AuthError> {
    let params =
        Params::new(15000, 2, 1, None).map_err(|e| AuthError::Unexpected(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(password: Password) -> Result<String, AuthError> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let salt = SaltString::generate(rand_core::OsRng);
            hasher()?
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AuthError::Unexpected(e.to_string()))
        })
    })
    .await
    .map_err(|e| AuthError::Unexpected(e.to_string()))?
}

/// `Ok(false)` on a mismatch; `Err` only when the stored hash is unusable.
#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected_hash: String,
    candidate: Password,
) -> Result<bool, AuthError> {
    let current_span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected = PasswordHash::new(&expected_hash)
                .map_err(|e| AuthError::Unexpected(e.to_string()))?;

            match hasher()?.verify_password(candidate.as_ref().expose_secret().as_bytes(), &expected)
            {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(AuthError::Unexpected(e.to_string())),
            }
        })
    })
    .await
    .map_err(|e| AuthError::Unexpected(e.to_string()))?
}
