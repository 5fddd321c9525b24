//! The linkwright HTTP service: routes, CORS, request tracing and the
//! standalone server.

pub mod link_service;
pub mod tracing;

pub use link_service::{LinkService, ServiceError};
