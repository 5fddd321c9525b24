//! Framework-agnostic link redemption handler.

use linkwright_application::RedeemLinkUseCase;
use linkwright_core::{
    AuthError, AuthResponseBuilder, AuthResponseHelpers, LinkRole, LinkToken,
    VerificationAuthority,
};

/// Redeems one action link.
///
/// Redirects with 303 when the authority has a landing page configured,
/// otherwise answers `{ "status": ..., "emailAddress": ... }`.
pub async fn handle_redeem_link<V, B>(
    authority: &V,
    token: LinkToken,
    role: LinkRole,
    builder: B,
) -> Result<B::Response, AuthError>
where
    V: VerificationAuthority,
    B: AuthResponseBuilder,
{
    let use_case = RedeemLinkUseCase::new(authority);
    let redemption = use_case.execute(token, role).await?;

    if let Some(location) = authority.redirect_to() {
        return Ok(builder.see_other(location));
    }

    Ok(builder.ok_json(serde_json::json!({
        "status": redemption.status(),
        "emailAddress": redemption.email().as_str(),
    })))
}
