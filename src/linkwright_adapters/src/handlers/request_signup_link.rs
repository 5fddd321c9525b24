//! Framework-agnostic signup link handler.
//!
//! Every failure, including a body that does not validate, is reported as
//! `LinkGenerationFailed`.

use linkwright_application::RequestSignupLinkUseCase;
use linkwright_core::{AuthError, AuthResponseBuilder, AuthResponseHelpers, Email, LinkGenerator, Password};
use secrecy::Secret;

/// Validated request data for a signup link.
pub struct SignupLinkData {
    pub email: Email,
    pub password: Password,
}

impl SignupLinkData {
    pub fn parse(email: Secret<String>, password: Secret<String>) -> Result<Self, AuthError> {
        Ok(Self {
            email: Email::try_from(email)?,
            password: Password::try_from(password)?,
        })
    }
}

/// Registers a pending identity through the admin client and returns its
/// confirmation link as `{ "signupLink": ... }`.
///
/// # Type Parameters
/// * `G` - Elevated-privilege link generator
/// * `B` - Response builder for the framework being used
pub async fn handle_request_signup_link<G, B>(
    link_generator: &G,
    data: Result<SignupLinkData, AuthError>,
    builder: B,
) -> Result<B::Response, AuthError>
where
    G: LinkGenerator,
    B: AuthResponseBuilder,
{
    let data = data.map_err(AuthError::into_issuance_failure)?;

    let use_case = RequestSignupLinkUseCase::new(link_generator);
    let link = use_case
        .execute(data.email, data.password)
        .await
        .map_err(AuthError::into_issuance_failure)?;

    Ok(builder.ok_json(serde_json::json!({
        "signupLink": link.into_url(),
    })))
}
