//! Axum-specific signup link route.

use axum::{Json, extract::State, extract::rejection::JsonRejection, response::Response};
use linkwright_adapters::handlers::{self, SignupLinkData};
use linkwright_core::{AuthError, ClientFactory};
use secrecy::Secret;
use serde::Deserialize;

use crate::{adapters::response_builder, error::ApiError};

/// `POST /request-signup-link`. Needs no authentication.
#[tracing::instrument(name = "Request signup link", skip_all)]
pub async fn request_signup_link<F>(
    State(factory): State<F>,
    body: Result<Json<SignupLinkRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    F: ClientFactory,
{
    let data = body
        .map_err(|rejection| AuthError::InvalidInput(rejection.body_text()))
        .and_then(|Json(request)| SignupLinkData::parse(request.email_address, request.password));

    let response =
        handlers::handle_request_signup_link(factory.admin_client(), data, response_builder())
            .await?;

    Ok(response)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupLinkRequest {
    pub email_address: Secret<String>,
    pub password: Secret<String>,
}
