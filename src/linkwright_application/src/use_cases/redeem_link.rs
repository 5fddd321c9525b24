use linkwright_core::{AuthError, LinkRole, LinkToken, Redemption, VerificationAuthority};

/// Redeem link use case - applies one action link to the verification state machine
pub struct RedeemLinkUseCase<'a, V>
where
    V: VerificationAuthority,
{
    authority: &'a V,
}

impl<'a, V> RedeemLinkUseCase<'a, V>
where
    V: VerificationAuthority,
{
    pub fn new(authority: &'a V) -> Self {
        Self { authority }
    }

    #[tracing::instrument(name = "RedeemLinkUseCase::execute", skip(self, token))]
    pub async fn execute(&self, token: LinkToken, role: LinkRole) -> Result<Redemption, AuthError> {
        let result = self.authority.redeem(&token, role).await;

        match &result {
            Ok(redemption) => tracing::info!(status = redemption.status(), "Link redeemed"),
            Err(e) => tracing::warn!(error = %e, "Link redemption rejected"),
        }

        result
    }
}
