//! # Linkwright - magic link issuance
//!
//! Facade crate re-exporting the public APIs of the linkwright components.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `ActionLink`, `EmailChangeRequest`, etc.
//! - **Ports**: `AuthStore`, `LinkGenerator`, `CurrentUser`, `VerificationAuthority`
//! - **Use cases**: `RequestSignupLinkUseCase`, `RequestEmailChangeLinksUseCase`, etc.
//! - **Adapters**: the Supabase and local backends, `HashMapAuthStore`, `Settings`
//! - **Service**: `LinkService`, the router and standalone server

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use linkwright_core::*;
}

pub use linkwright_core::{
    AccessToken, ActionLink, AuthError, ConfirmationState, Email, EmailChangeLinks,
    EmailChangeRequest, Identity, IdentityId, LinkRole, LinkToken, Password, Redemption,
    RequestId, Session, VerificationLink,
};

// ============================================================================
// Ports
// ============================================================================

pub use linkwright_core::{
    AuthStore, AuthStoreError, ClientFactory, CurrentUser, LinkGenerator, VerificationAuthority,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use linkwright_application::*;
}

pub use linkwright_application::{
    RedeemLinkUseCase, RequestEmailChangeLinksUseCase, RequestSignupLinkUseCase, SignInUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    pub use linkwright_adapters::{config, handlers, local, persistence, supabase};

    /// Axum routes and response plumbing
    pub mod axum {
        pub use linkwright_axum::*;
    }
}

pub use linkwright_adapters::{
    config::Settings,
    local::{LocalAuthority, LocalClientFactory},
    persistence::HashMapAuthStore,
    supabase::SupabaseClientFactory,
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use linkwright_service::{LinkService, ServiceError};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
