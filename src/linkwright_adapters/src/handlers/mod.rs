//! Framework-agnostic handlers.
//!
//! Routes extract data from requests, call these handlers, and convert the
//! results back to framework responses. Errors come back as `AuthError` so
//! every framework maps them to the same status codes.

pub mod redeem_link;
pub mod request_email_change_links;
pub mod request_signup_link;
pub mod sign_in;

pub use redeem_link::handle_redeem_link;
pub use request_email_change_links::handle_request_email_change_links;
pub use request_signup_link::{SignupLinkData, handle_request_signup_link};
pub use sign_in::handle_sign_in;

#[cfg(test)]
mod test_support;
