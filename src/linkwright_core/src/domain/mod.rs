pub mod access_token;
pub mod action_link;
pub mod email;
pub mod email_change;
pub mod error;
pub mod identity;
pub mod password;
pub mod verification_link;
