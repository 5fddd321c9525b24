use async_trait::async_trait;

use linkwright_core::{
    AccessToken, AuthError, AuthStore, AuthStoreError, ClientFactory, CurrentUser, Identity,
    bearer_credential,
};

use super::{
    authority::LocalAuthority,
    session::{SessionConfig, validate_session_token},
};

/// Caller client for the local backend: resolves the bearer JWT to an identity.
pub struct LocalUserClient<S> {
    store: S,
    session: SessionConfig,
    token: AccessToken,
}

#[async_trait]
impl<S: AuthStore> CurrentUser for LocalUserClient<S> {
    #[tracing::instrument(name = "LocalUserClient::get_user", skip_all)]
    async fn get_user(&self) -> Result<Identity, AuthError> {
        let claims = validate_session_token(&self.token, &self.session)?;
        let identity_id = claims.identity_id()?;

        match self.store.find_by_id(identity_id).await {
            Ok(stored) => Ok(stored.identity),
            Err(AuthStoreError::IdentityNotFound) => Err(AuthError::Unauthenticated(
                "User from sub claim in JWT does not exist".to_string(),
            )),
            Err(e) => Err(AuthError::Unexpected(e.to_string())),
        }
    }
}

pub struct LocalClientFactory<S> {
    authority: LocalAuthority<S>,
}

impl<S: Clone> Clone for LocalClientFactory<S> {
    fn clone(&self) -> Self {
        Self {
            authority: self.authority.clone(),
        }
    }
}

impl<S> LocalClientFactory<S> {
    pub fn new(authority: LocalAuthority<S>) -> Self {
        Self { authority }
    }
}

impl<S> ClientFactory for LocalClientFactory<S>
where
    S: AuthStore + Clone + 'static,
{
    type Caller = LocalUserClient<S>;
    type Admin = LocalAuthority<S>;

    fn caller_client(&self, authorization: Option<&str>) -> Result<Self::Caller, AuthError> {
        let token = bearer_credential(authorization)?;

        Ok(LocalUserClient {
            store: self.authority.store().clone(),
            session: self.authority.session_config().clone(),
            token,
        })
    }

    fn admin_client(&self) -> &Self::Admin {
        &self.authority
    }
}
