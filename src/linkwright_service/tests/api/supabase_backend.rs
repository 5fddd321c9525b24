use linkwright_adapters::{
    config::{
        SupabaseSettings,
        supabase::{GENERATE_LINK_PATH, USER_PATH},
        test::supabase::{ANON_KEY, SERVICE_ROLE_KEY, TIMEOUT},
    },
    supabase::SupabaseClientFactory,
};
use secrecy::Secret;
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, body_partial_json, header, method, path},
};

use crate::helpers::{PASSWORD, TestApp, error_of};

async fn app_against(server: &MockServer) -> TestApp {
    let factory = SupabaseClientFactory::new(&SupabaseSettings {
        url: server.uri(),
        anon_key: Secret::from(ANON_KEY.to_string()),
        service_role_key: Secret::from(SERVICE_ROLE_KEY.to_string()),
        timeout_in_millis: TIMEOUT.as_millis() as u64,
        redirect_to: None,
    })
    .expect("Failed to build supabase client factory");

    TestApp::with_factory(factory).await
}

#[tokio::test]
async fn should_proxy_signup_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_LINK_PATH))
        .and(header("apikey", SERVICE_ROLE_KEY))
        .and(body_partial_json(json!({
            "type": "signup",
            "email": "a@test.com",
            "password": PASSWORD,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "action_link": "https://project.supabase.co/auth/v1/verify?token=s&type=signup",
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_against(&server).await;

    let response = app
        .post_signup_link(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["signupLink"],
        "https://project.supabase.co/auth/v1/verify?token=s&type=signup"
    );
}

#[tokio::test]
async fn should_identify_caller_then_issue_both_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", "Bearer caller-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "6d0c3f0a-5d1e-4c2b-9a7e-2b8f3c4d5e6f",
            "email": "a@test.com",
            "email_confirmed_at": "2024-01-01T00:00:00Z",
        })))
        .expect(1)
        .mount(&server)
        .await;
    for (link_type, link) in [
        ("email_change_current", "https://x/verify?token=c"),
        ("email_change_new", "https://x/verify?token=n"),
    ] {
        Mock::given(method("POST"))
            .and(path(GENERATE_LINK_PATH))
            .and(body_partial_json(json!({
                "type": link_type,
                "email": "a@test.com",
                "new_email": "b@test.com",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "action_link": link })))
            .expect(1)
            .mount(&server)
            .await;
    }
    let app = app_against(&server).await;

    let response = app
        .post_change_links(&json!({ "newEmailAddress": "b@test.com" }), Some("caller-jwt"))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "currentEmailAddressLink": "https://x/verify?token=c",
            "newEmailAddressLink": "https://x/verify?token=n",
        })
    );
}

#[tokio::test]
async fn should_not_call_backend_without_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = app_against(&server).await;

    let response = app
        .post_change_links(&json!({ "newEmailAddress": "b@test.com" }), None)
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_401_when_caller_token_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "msg": "invalid JWT" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = app_against(&server).await;

    let response = app
        .post_change_links(&json!({ "newEmailAddress": "b@test.com" }), Some("expired"))
        .await;

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(error_of(response).await, "Unauthenticated: invalid JWT");
}

#[tokio::test]
async fn should_return_500_when_generation_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_LINK_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "code": 422,
            "msg": "Signups not allowed for this instance",
        })))
        .mount(&server)
        .await;
    let app = app_against(&server).await;

    let response = app
        .post_signup_link(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        error_of(response).await,
        "Link generation failed: Signups not allowed for this instance"
    );
}
