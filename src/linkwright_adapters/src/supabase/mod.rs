//! Hosted backend: GoTrue's REST API on a Supabase project.

pub mod admin_client;
pub mod client_factory;
pub mod error;
pub mod user_client;

pub use admin_client::SupabaseAdminClient;
pub use client_factory::SupabaseClientFactory;
pub use error::SupabaseClientError;
pub use user_client::SupabaseUserClient;
