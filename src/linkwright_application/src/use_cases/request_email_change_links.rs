use linkwright_core::{AuthError, CurrentUser, Email, EmailChangeLinks, LinkGenerator};

/// Email change use case - identifies the caller and issues both confirmation links
pub struct RequestEmailChangeLinksUseCase<'a, G>
where
    G: LinkGenerator,
{
    link_generator: &'a G,
}

impl<'a, G> RequestEmailChangeLinksUseCase<'a, G>
where
    G: LinkGenerator,
{
    pub fn new(link_generator: &'a G) -> Self {
        Self { link_generator }
    }

    /// Execute the email change use case
    ///
    /// The current address always comes from `caller`, never from the request.
    ///
    /// # Arguments
    /// * `caller` - Caller-scoped client for the authenticated principal
    /// * `new_email` - The address the caller wants to move to
    ///
    /// # Returns
    /// Links for the current and the new address, or an `AuthError`
    #[tracing::instrument(name = "RequestEmailChangeLinksUseCase::execute", skip(self, caller))]
    pub async fn execute<C>(
        &self,
        caller: &C,
        new_email: Email,
    ) -> Result<EmailChangeLinks, AuthError>
    where
        C: CurrentUser,
    {
        let identity = caller.get_user().await?;

        if !identity.is_confirmed() {
            return Err(AuthError::Unauthenticated(
                "Email address has not been confirmed".to_string(),
            ));
        }

        let current_email = identity.email();
        if *current_email == new_email {
            return Err(AuthError::InvalidInput(
                "New email address must differ from the current one".to_string(),
            ));
        }

        let links = self
            .link_generator
            .generate_change_links(current_email, &new_email)
            .await?;

        tracing::info!(identity_id = %identity.id(), "Email change links issued");
        Ok(links)
    }
}
