//! Axum-specific link redemption route for the local backend.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Response,
};
use linkwright_adapters::handlers;
use linkwright_core::{LinkRole, LinkToken, VerificationAuthority};
use serde::Deserialize;

use crate::{adapters::response_builder, error::ApiError};

/// `GET /verify?token=...&type=...`, the target of locally issued links.
#[tracing::instrument(name = "Verify link", skip_all, fields(link_type))]
pub async fn verify<V>(
    State(authority): State<V>,
    query: Result<Query<VerifyParams>, QueryRejection>,
) -> Result<Response, ApiError>
where
    V: VerificationAuthority + Clone + 'static,
{
    let Query(params) = query?;
    tracing::Span::current().record("link_type", params.link_type.as_str());

    let role: LinkRole = params.link_type.parse()?;
    let token = LinkToken::from(params.token);

    let response = handlers::handle_redeem_link(&authority, token, role, response_builder()).await?;
    Ok(response)
}

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub token: String,
    #[serde(rename = "type")]
    pub link_type: String,
}
