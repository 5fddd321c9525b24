use async_trait::async_trait;
use reqwest::{Client, Url, header::AUTHORIZATION};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use uuid::Uuid;

use linkwright_core::{AccessToken, AuthError, CurrentUser, Email, Identity, IdentityId};

use super::error::error_message;
use crate::config::supabase::API_KEY_HEADER;

/// Acts as the caller: anon key plus the caller's own bearer token.
pub struct SupabaseUserClient {
    http_client: Client,
    user_url: Url,
    anon_key: Secret<String>,
    token: AccessToken,
}

impl SupabaseUserClient {
    pub fn new(http_client: Client, user_url: Url, anon_key: Secret<String>, token: AccessToken) -> Self {
        Self {
            http_client,
            user_url,
            anon_key,
            token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: Uuid,
    email: Option<String>,
    email_confirmed_at: Option<String>,
    confirmed_at: Option<String>,
}

impl TryFrom<GoTrueUser> for Identity {
    type Error = AuthError;

    fn try_from(user: GoTrueUser) -> Result<Self, Self::Error> {
        let email = user
            .email
            .as_deref()
            .filter(|email| !email.is_empty())
            .ok_or_else(|| AuthError::Unauthenticated("User has no email address".to_string()))?;
        let email = Email::try_from(email)
            .map_err(|e| AuthError::Unexpected(format!("Supabase returned {e}")))?;
        let confirmed = user.email_confirmed_at.is_some() || user.confirmed_at.is_some();

        Ok(Identity::new(IdentityId::from(user.id), email, confirmed))
    }
}

#[async_trait]
impl CurrentUser for SupabaseUserClient {
    #[tracing::instrument(name = "SupabaseUserClient::get_user", skip_all)]
    async fn get_user(&self) -> Result<Identity, AuthError> {
        let response = self
            .http_client
            .get(self.user_url.clone())
            .header(API_KEY_HEADER, self.anon_key.expose_secret())
            .header(AUTHORIZATION, self.token.to_header_value())
            .send()
            .await
            .map_err(|e| AuthError::Unauthenticated(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::Unauthenticated(error_message(response).await));
        }

        let user: GoTrueUser = response
            .json()
            .await
            .map_err(|e| AuthError::Unexpected(e.to_string()))?;

        user.try_into()
    }
}
