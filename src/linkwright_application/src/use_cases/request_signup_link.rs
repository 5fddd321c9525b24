use linkwright_core::{ActionLink, AuthError, Email, LinkGenerator, Password};

/// Signup link use case - registers a pending identity and returns its confirmation link
pub struct RequestSignupLinkUseCase<'a, G>
where
    G: LinkGenerator,
{
    link_generator: &'a G,
}

impl<'a, G> RequestSignupLinkUseCase<'a, G>
where
    G: LinkGenerator,
{
    pub fn new(link_generator: &'a G) -> Self {
        Self { link_generator }
    }

    /// Execute the signup link use case
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Validated password
    ///
    /// # Returns
    /// The signup action link, or `LinkGenerationFailed` if the address is
    /// already registered and confirmed
    #[tracing::instrument(name = "RequestSignupLinkUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<ActionLink, AuthError> {
        let link = self
            .link_generator
            .generate_signup_link(&email, &password)
            .await?;

        tracing::info!(role = %link.role(), "Signup link issued");
        Ok(link)
    }
}
