use crate::{
    domain::{access_token::AccessToken, error::AuthError},
    ports::services::{CurrentUser, LinkGenerator},
};

// ============================================================================
// Client Factory
// ============================================================================

/// Builds the two differently-scoped backend handles the handlers need.
///
/// - A **caller-scoped** client, built per request from the inbound
///   `Authorization` header. It acts as the requesting principal and has no
///   elevated rights; all it can do is tell who the caller is.
/// - A single **admin** client holding service-level credentials. It is built
///   once at startup, shared by every request and never handed to callers.
///   It keeps no session between calls.
///
/// The factory itself is cheap to clone so it can live in router state.
pub trait ClientFactory: Clone + Send + Sync + 'static {
    /// Caller-scoped client type
    type Caller: CurrentUser;

    /// Elevated-privilege client type
    type Admin: LinkGenerator;

    /// Build a caller-scoped client from the raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// `AuthError::Unauthenticated` when the header is missing or is not a
    /// bearer credential. No backend call is made in that case.
    fn caller_client(&self, authorization: Option<&str>) -> Result<Self::Caller, AuthError>;

    /// The process-wide admin client.
    fn admin_client(&self) -> &Self::Admin;
}

/// Extracts the bearer credential from an `Authorization` header value.
pub fn bearer_credential(authorization: Option<&str>) -> Result<AccessToken, AuthError> {
    let header = authorization
        .ok_or_else(|| AuthError::Unauthenticated("Missing authorization header".to_string()))?;

    let (scheme, token) = header.trim().split_once(' ').ok_or_else(|| {
        AuthError::Unauthenticated("Malformed authorization header".to_string())
    })?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::Unauthenticated(
            "Authorization header is not a bearer token".to_string(),
        ));
    }

    Ok(AccessToken::new(token.to_string()))
}
