use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::{get, post},
};
use linkwright_adapters::{
    config::{BackendKind, CorsSettings, Settings, cors::ALLOWED_HEADERS},
    local::{LocalAuthority, LocalAuthorityError, LocalClientFactory},
    persistence::HashMapAuthStore,
    supabase::{SupabaseClientError, SupabaseClientFactory},
};
use linkwright_axum::routes::{request_email_change_links, request_signup_link, token, verify};
use linkwright_core::{ClientFactory, VerificationAuthority};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("The supabase backend is selected but not configured")]
    MissingSupabaseSettings,
    #[error(transparent)]
    Supabase(#[from] SupabaseClientError),
    #[error(transparent)]
    Local(#[from] LocalAuthorityError),
}

/// The link-issuing routes, optionally joined by the local verification routes.
pub struct LinkService {
    router: Router,
}

impl LinkService {
    /// Link routes backed by `factory`. The factory is the only state they
    /// share; its admin client is built once and lives as long as the router.
    pub fn new<F>(factory: F) -> Self
    where
        F: ClientFactory,
    {
        let router = Router::new()
            .route("/request-signup-link", post(request_signup_link::<F>))
            .route(
                "/request-change-email-address-links",
                post(request_email_change_links::<F>),
            )
            .with_state(factory);

        Self { router }
    }

    /// Adds `GET /verify` and `POST /token` for a self-hosted authority.
    pub fn with_verification<V>(mut self, authority: V) -> Self
    where
        V: VerificationAuthority + Clone + 'static,
    {
        let verification = Router::new()
            .route("/verify", get(verify::<V>))
            .route("/token", post(token::<V>))
            .with_state(authority);

        self.router = self.router.merge(verification);
        self
    }

    /// Wires the backend selected in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self, ServiceError> {
        match settings.backend {
            BackendKind::Supabase => {
                let supabase = settings
                    .supabase
                    .as_ref()
                    .ok_or(ServiceError::MissingSupabaseSettings)?;
                Ok(Self::new(SupabaseClientFactory::new(supabase)?))
            }
            BackendKind::Local => {
                let authority = LocalAuthority::new(HashMapAuthStore::new(), &settings.local)?;
                Ok(Self::new(LocalClientFactory::new(authority.clone())).with_verification(authority))
            }
        }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the service into a router that can be mounted on another router
    pub fn as_nested_router(mut self, cors: &CorsSettings) -> Router {
        self.router = self.router.layer(cors_layer(cors));
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        cors: &CorsSettings,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(cors);

        tracing::info!("Link service listening on {}", listener.local_addr()?);

        axum_server::Server::<std::net::SocketAddr>::from_listener(listener)
            .serve(router.into_make_service())
            .await
    }
}

/// Browser clients call from arbitrary origins unless a list is configured.
fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static));

    if settings.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
