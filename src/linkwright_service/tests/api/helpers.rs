use linkwright_adapters::{
    config::{CorsSettings, LocalSettings, test},
    local::{LocalAuthority, LocalClientFactory},
    persistence::HashMapAuthStore,
};
use linkwright_core::ClientFactory;
use linkwright_service::LinkService;
use reqwest::{Client, Response, redirect::Policy};
use secrecy::Secret;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
}

pub fn local_settings() -> LocalSettings {
    LocalSettings {
        public_url: "http://localhost:3000".to_string(),
        link_ttl_in_seconds: 3600,
        session_ttl_in_seconds: 600,
        jwt_secret: Some(Secret::from("test-secret".to_owned())),
        redirect_to: None,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_local_settings(local_settings()).await
    }

    pub async fn with_local_settings(settings: LocalSettings) -> Self {
        let authority = LocalAuthority::new(HashMapAuthStore::new(), &settings)
            .expect("Failed to build local authority");
        let service =
            LinkService::new(LocalClientFactory::new(authority.clone())).with_verification(authority);
        Self::spawn(service).await
    }

    pub async fn with_factory<F: ClientFactory>(factory: F) -> Self {
        Self::spawn(LinkService::new(factory)).await
    }

    async fn spawn(service: LinkService) -> Self {
        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            service
                .run_standalone(listener, &CorsSettings::default())
                .await
                .expect("Failed to run link service");
        });

        let http_client = Client::builder()
            .redirect(Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
        }
    }

    pub async fn post_signup_link(&self, body: &Value) -> Response {
        self.http_client
            .post(format!("{}/request-signup-link", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_change_links(&self, body: &Value, bearer: Option<&str>) -> Response {
        let mut request = self
            .http_client
            .post(format!("{}/request-change-email-address-links", self.address))
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn post_token(&self, body: &Value) -> Response {
        self.http_client
            .post(format!("{}/token", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Follows an action link against this server, whatever host it names.
    pub async fn follow(&self, link: &str) -> Response {
        let url = reqwest::Url::parse(link).expect("Link is not a url");
        let query = url.query().unwrap_or_default();
        self.http_client
            .get(format!("{}{}?{}", self.address, url.path(), query))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Signs `email` up, confirms it and returns a bearer token for it.
    pub async fn confirmed_user(&self, email: &str) -> String {
        let body: Value = self
            .post_signup_link(&json!({ "emailAddress": email, "password": PASSWORD }))
            .await
            .json()
            .await
            .unwrap();
        let link = body["signupLink"].as_str().unwrap();
        assert_eq!(self.follow(link).await.status().as_u16(), 200);

        let body: Value = self
            .post_token(&json!({ "emailAddress": email, "password": PASSWORD }))
            .await
            .json()
            .await
            .unwrap();
        body["accessToken"].as_str().unwrap().to_string()
    }
}

pub async fn error_of(response: Response) -> String {
    let body: Value = response.json().await.expect("Error body is not json");
    body["error"].as_str().unwrap_or_default().to_string()
}
