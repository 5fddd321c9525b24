//! Axum-specific routes.
//!
//! Each route uses Axum's extractors to read the request, calls the
//! framework-agnostic handler, and converts the result to an Axum response.

pub mod request_email_change_links;
pub mod request_signup_link;
pub mod token;
pub mod verify;

pub use request_email_change_links::request_email_change_links;
pub use request_signup_link::request_signup_link;
pub use token::token;
pub use verify::verify;
