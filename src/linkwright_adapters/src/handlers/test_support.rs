use std::collections::HashMap;

use linkwright_core::{
    AuthRequest, AuthResponseBuilder, Email, LinkGenerator, LinkRole, LinkToken, Password,
    VerificationAuthority,
};
use reqwest::Url;
use secrecy::Secret;

use crate::{
    config::LocalSettings,
    local::{LocalAuthority, LocalClientFactory},
    persistence::HashMapAuthStore,
};

pub type TestAuthority = LocalAuthority<HashMapAuthStore>;
pub type TestFactory = LocalClientFactory<HashMapAuthStore>;

#[derive(Default)]
pub struct MockRequest {
    headers: HashMap<String, String>,
}

impl MockRequest {
    pub fn with_authorization(value: &str) -> Self {
        Self {
            headers: HashMap::from([("authorization".to_string(), value.to_string())]),
        }
    }
}

impl AuthRequest for MockRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .map(String::as_str)
    }
}

#[derive(Debug, Default)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl AuthResponseBuilder for MockResponse {
    type Response = MockResponse;

    fn status(mut self, code: u16) -> Self {
        self.status = code;
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    fn build(self) -> Self::Response {
        self
    }
}

pub fn local_settings() -> LocalSettings {
    LocalSettings {
        public_url: "http://localhost:3000".to_string(),
        link_ttl_in_seconds: 3600,
        session_ttl_in_seconds: 600,
        jwt_secret: Some(Secret::from("secret".to_owned())),
        redirect_to: None,
    }
}

pub fn local_authority() -> TestAuthority {
    LocalAuthority::new(HashMapAuthStore::new(), &local_settings()).unwrap()
}

pub fn local_factory() -> TestFactory {
    LocalClientFactory::new(local_authority())
}

pub fn password() -> Password {
    Password::try_from(Secret::from("password123".to_string())).unwrap()
}

pub fn token_of(url: &str) -> (LinkToken, LinkRole) {
    let url = Url::parse(url).unwrap();
    let query = |key: &str| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .unwrap()
    };
    (LinkToken::from(query("token")), query("type").parse().unwrap())
}

/// Signs `email` up with [`password`] and redeems the signup link.
pub async fn confirm(authority: &TestAuthority, email: &str) {
    let link = authority
        .generate_signup_link(&Email::try_from(email).unwrap(), &password())
        .await
        .unwrap();
    let (token, role) = token_of(link.url());
    authority.redeem(&token, role).await.unwrap();
}
