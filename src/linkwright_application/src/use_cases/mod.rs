pub mod redeem_link;
pub mod request_email_change_links;
pub mod request_signup_link;
pub mod sign_in;
