//! Axum-specific sign-in route for the local backend.

use axum::{Json, extract::State, extract::rejection::JsonRejection, response::Response};
use linkwright_adapters::handlers;
use linkwright_core::{AuthError, Email, Password, VerificationAuthority};
use secrecy::Secret;
use serde::Deserialize;

use crate::{adapters::response_builder, error::ApiError};

/// `POST /token`. Issues the bearer token the email change route expects.
#[tracing::instrument(name = "Sign in", skip_all)]
pub async fn token<V>(
    State(authority): State<V>,
    body: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    V: VerificationAuthority + Clone + 'static,
{
    let Json(request) = body?;

    let email = Email::try_from(request.email_address).map_err(AuthError::from)?;
    let password = Password::try_from(request.password).map_err(AuthError::from)?;

    let response = handlers::handle_sign_in(&authority, email, password, response_builder()).await?;
    Ok(response)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub email_address: Secret<String>,
    pub password: Secret<String>,
}
