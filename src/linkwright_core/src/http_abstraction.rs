//! Zero-cost HTTP abstraction traits for the link handlers.
//!
//! This module defines trait-based HTTP abstractions that frameworks implement directly
//! on their own types (via newtype wrappers), avoiding any allocation or copying overhead.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  linkwright_core: Defines HTTP traits    │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  linkwright_axum: Newtype wrappers       │
//! │  struct AxumRequestParts(Parts)          │
//! │  impl AuthRequest for AxumRequestParts   │  ← Zero cost!
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  Handlers use AuthRequest / builder      │
//! │  trait methods (generic over framework)  │
//! └──────────────────────────────────────────┘
//! ```

use crate::domain::error::AuthError;

/// Trait for HTTP requests the handlers can read credentials from.
///
/// Web frameworks implement this trait on newtype wrappers of their request types.
///
/// # Implementation Notes
///
/// - Return `&str` references directly from the framework's data structures
/// - Case-insensitive header lookup should be handled by implementor
pub trait AuthRequest {
    /// Get a header value by name.
    ///
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// The raw `Authorization` header, if any.
    fn authorization(&self) -> Option<&str> {
        self.header("authorization")
    }
}

/// Trait for building HTTP responses.
///
/// This follows the builder pattern, allowing method chaining:
/// ```ignore
/// builder
///     .status(200)
///     .header("x-request-id", "...")
///     .json_body(json!({"signupLink": "..."}))
///     .build()
/// ```
pub trait AuthResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Set a JSON body with Content-Type header
    fn json_body(self, body: serde_json::Value) -> Self;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// HTTP status for each error kind.
pub fn status_for(error: &AuthError) -> u16 {
    match error {
        AuthError::Unauthenticated(_) => 401,
        AuthError::InvalidInput(_) => 400,
        AuthError::InvalidLink => 404,
        AuthError::LinkAlreadyUsed | AuthError::OutOfOrderConfirmation => 409,
        AuthError::LinkExpired => 410,
        AuthError::LinkGenerationFailed(_) | AuthError::Unexpected(_) => 500,
    }
}

/// Helper methods for creating common responses.
///
/// Automatically implemented for all types that implement `AuthResponseBuilder`.
pub trait AuthResponseHelpers: AuthResponseBuilder {
    /// Create a 200 OK JSON response
    fn ok_json(self, body: serde_json::Value) -> Self::Response {
        self.status(200).json_body(body).build()
    }

    /// Create a 303 See Other redirect
    fn see_other(self, location: &str) -> Self::Response {
        self.status(303).header("location", location).build()
    }
}

// Blanket implementation for all AuthResponseBuilder types
impl<T: AuthResponseBuilder> AuthResponseHelpers for T {}
