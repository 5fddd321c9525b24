mod cors;
mod helpers;
mod request_email_change_links;
mod request_signup_link;
mod supabase_backend;
mod verify;
