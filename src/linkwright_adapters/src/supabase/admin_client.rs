use async_trait::async_trait;
use reqwest::{Client, Url, header::AUTHORIZATION};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use linkwright_core::{
    ActionLink, AuthError, Email, EmailChangeLinks, LinkGenerator, LinkRole, Password,
};

use super::error::error_message;
use crate::config::supabase::API_KEY_HEADER;

/// Service-role client for the GoTrue admin API. Holds no session.
pub struct SupabaseAdminClient {
    http_client: Client,
    generate_link_url: Url,
    service_role_key: Secret<String>,
    redirect_to: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateLinkParams<'a> {
    #[serde(rename = "type")]
    link_type: LinkRole,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_to: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct LinkProperties {
    action_link: String,
}

/// Older GoTrue releases nest the link under `properties`.
#[derive(Debug, Deserialize)]
struct GenerateLinkResponse {
    action_link: Option<String>,
    properties: Option<LinkProperties>,
}

impl GenerateLinkResponse {
    fn into_action_link(self) -> Option<String> {
        self.action_link
            .or(self.properties.map(|properties| properties.action_link))
    }
}

impl SupabaseAdminClient {
    pub fn new(
        http_client: Client,
        generate_link_url: Url,
        service_role_key: Secret<String>,
        redirect_to: Option<String>,
    ) -> Self {
        Self {
            http_client,
            generate_link_url,
            service_role_key,
            redirect_to,
        }
    }

    #[tracing::instrument(name = "Generating link", skip_all, fields(link_type = %role))]
    async fn generate_link(
        &self,
        role: LinkRole,
        email: &Email,
        password: Option<&Password>,
        new_email: Option<&Email>,
    ) -> Result<ActionLink, AuthError> {
        let params = GenerateLinkParams {
            link_type: role,
            email: email.as_str(),
            password: password.map(|p| p.as_ref().expose_secret().as_str()),
            new_email: new_email.map(Email::as_str),
            redirect_to: self.redirect_to.as_deref(),
        };

        let response = self
            .http_client
            .post(self.generate_link_url.clone())
            .header(API_KEY_HEADER, self.service_role_key.expose_secret())
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.service_role_key.expose_secret()),
            )
            .json(&params)
            .send()
            .await
            .map_err(|e| AuthError::LinkGenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::LinkGenerationFailed(error_message(response).await));
        }

        let url = response
            .json::<GenerateLinkResponse>()
            .await
            .map_err(|e| AuthError::LinkGenerationFailed(e.to_string()))?
            .into_action_link()
            .ok_or_else(|| {
                AuthError::LinkGenerationFailed("Response carried no action link".to_string())
            })?;

        Ok(ActionLink::new(url, role))
    }
}

#[async_trait]
impl LinkGenerator for SupabaseAdminClient {
    async fn generate_signup_link(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<ActionLink, AuthError> {
        self.generate_link(LinkRole::Signup, email, Some(password), None)
            .await
    }

    /// Two sequential calls. If the second fails the first link has already
    /// been issued and stays valid on the GoTrue side.
    async fn generate_change_links(
        &self,
        current: &Email,
        new: &Email,
    ) -> Result<EmailChangeLinks, AuthError> {
        let current_link = self
            .generate_link(LinkRole::EmailChangeCurrent, current, None, Some(new))
            .await?;
        let new_link = self
            .generate_link(LinkRole::EmailChangeNew, current, None, Some(new))
            .await?;

        Ok(EmailChangeLinks {
            current: current_link,
            new: new_link,
        })
    }
}
