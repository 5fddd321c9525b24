//! Axum integration for the linkwright handlers.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  linkwright_core: HTTP trait definitions │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  linkwright_axum: Axum implementations   │
//! │  - AxumRequestParts newtype wrapper      │
//! │  - AxumResponseBuilder                   │
//! │  - ApiError                              │
//! │  - Axum route handlers                   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use linkwright_axum::routes;
//!
//! let app = Router::new()
//!     .route("/request-signup-link", post(routes::request_signup_link::<F>))
//!     .with_state(factory);
//! ```

pub mod adapters;
pub mod error;
pub mod routes;

pub use adapters::{AxumRequestParts, AxumResponseBuilder, response_builder};
pub use error::{ApiError, ErrorResponse};
