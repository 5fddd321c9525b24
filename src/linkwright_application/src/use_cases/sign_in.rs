use linkwright_core::{AuthError, Email, Password, Session, VerificationAuthority};

/// Sign-in use case - exchanges a confirmed identity's credential for a bearer token
pub struct SignInUseCase<'a, V>
where
    V: VerificationAuthority,
{
    authority: &'a V,
}

impl<'a, V> SignInUseCase<'a, V>
where
    V: VerificationAuthority,
{
    pub fn new(authority: &'a V) -> Self {
        Self { authority }
    }

    #[tracing::instrument(name = "SignInUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<Session, AuthError> {
        self.authority.sign_in(&email, &password).await
    }
}
