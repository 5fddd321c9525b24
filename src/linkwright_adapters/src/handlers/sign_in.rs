//! Framework-agnostic sign-in handler for the local backend.

use linkwright_application::SignInUseCase;
use linkwright_core::{
    AuthError, AuthResponseBuilder, AuthResponseHelpers, Email, Password, VerificationAuthority,
};
use secrecy::ExposeSecret;

/// Exchanges a confirmed identity's password for a bearer token, shaped like
/// GoTrue's `/token?grant_type=password` response.
pub async fn handle_sign_in<V, B>(
    authority: &V,
    email: Email,
    password: Password,
    builder: B,
) -> Result<B::Response, AuthError>
where
    V: VerificationAuthority,
    B: AuthResponseBuilder,
{
    let use_case = SignInUseCase::new(authority);
    let session = use_case.execute(email, password).await?;

    Ok(builder.ok_json(serde_json::json!({
        "accessToken": session.access_token.as_ref().expose_secret(),
        "tokenType": "bearer",
        "expiresIn": session.expires_in_seconds,
    })))
}
