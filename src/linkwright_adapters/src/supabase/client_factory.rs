use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use secrecy::Secret;

use linkwright_core::{AuthError, ClientFactory, bearer_credential};

use super::{
    admin_client::SupabaseAdminClient, error::SupabaseClientError, user_client::SupabaseUserClient,
};
use crate::config::{
    SupabaseSettings,
    supabase::{GENERATE_LINK_PATH, USER_PATH},
};

/// Hands out caller clients per request and shares one admin client.
#[derive(Clone)]
pub struct SupabaseClientFactory {
    http_client: Client,
    user_url: Url,
    anon_key: Secret<String>,
    admin: Arc<SupabaseAdminClient>,
}

impl SupabaseClientFactory {
    pub fn new(settings: &SupabaseSettings) -> Result<Self, SupabaseClientError> {
        let base = Url::parse(&settings.url)
            .map_err(|e| SupabaseClientError::InvalidUrl(e.to_string()))?;
        let user_url = base
            .join(USER_PATH)
            .map_err(|e| SupabaseClientError::InvalidUrl(e.to_string()))?;
        let generate_link_url = base
            .join(GENERATE_LINK_PATH)
            .map_err(|e| SupabaseClientError::InvalidUrl(e.to_string()))?;

        let http_client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_in_millis))
            .build()?;

        let admin = SupabaseAdminClient::new(
            http_client.clone(),
            generate_link_url,
            settings.service_role_key.clone(),
            settings.redirect_to.clone(),
        );

        Ok(Self {
            http_client,
            user_url,
            anon_key: settings.anon_key.clone(),
            admin: Arc::new(admin),
        })
    }
}

impl ClientFactory for SupabaseClientFactory {
    type Caller = SupabaseUserClient;
    type Admin = SupabaseAdminClient;

    fn caller_client(&self, authorization: Option<&str>) -> Result<Self::Caller, AuthError> {
        let token = bearer_credential(authorization)?;

        Ok(SupabaseUserClient::new(
            self.http_client.clone(),
            self.user_url.clone(),
            self.anon_key.clone(),
            token,
        ))
    }

    fn admin_client(&self) -> &Self::Admin {
        &self.admin
    }
}
