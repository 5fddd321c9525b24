//! Axum implementations of the `linkwright_core` HTTP traits.
//!
//! Routes read the request head through [`AxumRequestParts`], a
//! `repr(transparent)` newtype over `http::request::Parts`, and build
//! responses with [`AxumResponseBuilder`].

use axum::body::Body;
use axum::http::{Response, StatusCode, request::Parts};
use linkwright_core::{AuthRequest, AuthResponseBuilder};

#[repr(transparent)]
pub struct AxumRequestParts(pub Parts);

impl From<Parts> for AxumRequestParts {
    fn from(parts: Parts) -> Self {
        AxumRequestParts(parts)
    }
}

impl AuthRequest for AxumRequestParts {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers.get(name)?.to_str().ok()
    }
}

pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn json_body(mut self, body: serde_json::Value) -> Self {
        self.builder = self.builder.header("content-type", "application/json");
        self.body = Some(body.to_string());
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        self.builder.body(Body::from(body)).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Invalid response parts");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        })
    }
}

pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}
