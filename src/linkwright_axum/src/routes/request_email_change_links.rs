//! Axum-specific email change route.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::request::Parts,
    response::Response,
};
use linkwright_adapters::handlers;
use linkwright_core::{AuthError, ClientFactory};
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    adapters::{AxumRequestParts, response_builder},
    error::ApiError,
};

/// `POST /request-change-email-address-links`, bearer-authenticated.
///
/// A body that fails to parse is only reported once the caller has been
/// authenticated.
#[tracing::instrument(name = "Request email change links", skip_all)]
pub async fn request_email_change_links<F>(
    State(factory): State<F>,
    parts: Parts,
    body: Result<Json<ChangeEmailLinksRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    F: ClientFactory,
{
    let request = AxumRequestParts::from(parts);
    let new_email = body
        .map(|Json(body)| body.new_email_address)
        .map_err(|rejection| AuthError::InvalidInput(rejection.body_text()));

    let response = handlers::handle_request_email_change_links(
        &factory,
        &request,
        new_email,
        response_builder(),
    )
    .await?;

    Ok(response)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEmailLinksRequest {
    pub new_email_address: Secret<String>,
}
