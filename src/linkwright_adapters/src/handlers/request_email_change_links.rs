//! Framework-agnostic email change handler.
//!
//! The caller is identified before the body is looked at, so an
//! unauthenticated request is rejected with 401 whatever it carries. Every
//! other failure is reported as `LinkGenerationFailed`.

use linkwright_application::RequestEmailChangeLinksUseCase;
use linkwright_core::{
    AuthError, AuthRequest, AuthResponseBuilder, AuthResponseHelpers, ClientFactory, Email,
};
use secrecy::Secret;

/// Issues the two confirmation links of an email change as
/// `{ "currentEmailAddressLink": ..., "newEmailAddressLink": ... }`.
///
/// # Arguments
/// * `factory` - Builds the caller-scoped and admin clients
/// * `request` - Inbound request; only its `Authorization` header is read
/// * `new_email` - The body's new address, or the reason it could not be read
/// * `builder` - HTTP response builder
pub async fn handle_request_email_change_links<F, R, B>(
    factory: &F,
    request: &R,
    new_email: Result<Secret<String>, AuthError>,
    builder: B,
) -> Result<B::Response, AuthError>
where
    F: ClientFactory,
    R: AuthRequest,
    B: AuthResponseBuilder,
{
    let caller = factory.caller_client(request.authorization())?;

    let new_email = new_email
        .and_then(|email| Email::try_from(email).map_err(AuthError::from))
        .map_err(AuthError::into_issuance_failure)?;

    let use_case = RequestEmailChangeLinksUseCase::new(factory.admin_client());
    let links = use_case
        .execute(&caller, new_email)
        .await
        .map_err(AuthError::into_issuance_failure)?;

    Ok(builder.ok_json(serde_json::json!({
        "currentEmailAddressLink": links.current.into_url(),
        "newEmailAddressLink": links.new.into_url(),
    })))
}
