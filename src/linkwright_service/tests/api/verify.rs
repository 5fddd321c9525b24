use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, local_settings};

#[tokio::test]
async fn should_return_404_for_unknown_token() {
    let app = TestApp::new().await;

    let response = app
        .follow("http://localhost:3000/verify?token=unknown&type=signup")
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_return_400_for_bad_query() {
    let app = TestApp::new().await;

    for query in ["token=abc&type=recovery", "token=abc", "type=signup"] {
        let response = app
            .follow(&format!("http://localhost:3000/verify?{query}"))
            .await;
        assert_eq!(response.status().as_u16(), 400, "Failed for query: {query}");
    }
}

#[tokio::test]
async fn should_return_404_for_mismatched_type() {
    let app = TestApp::new().await;
    let body: Value = app
        .post_signup_link(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await
        .json()
        .await
        .unwrap();
    let link = body["signupLink"].as_str().unwrap();

    let wrong = app
        .follow(&link.replace("type=signup", "type=email_change_new"))
        .await;
    assert_eq!(wrong.status().as_u16(), 404);

    let right = app.follow(link).await;
    assert_eq!(right.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_410_for_expired_link() {
    let mut settings = local_settings();
    settings.link_ttl_in_seconds = 0;
    let app = TestApp::with_local_settings(settings).await;

    let body: Value = app
        .post_signup_link(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await
        .json()
        .await
        .unwrap();

    let response = app.follow(body["signupLink"].as_str().unwrap()).await;
    assert_eq!(response.status().as_u16(), 410);
}

#[tokio::test]
async fn should_redirect_when_configured() {
    let mut settings = local_settings();
    settings.redirect_to = Some("https://app.test/welcome".to_string());
    let app = TestApp::with_local_settings(settings).await;

    let body: Value = app
        .post_signup_link(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await
        .json()
        .await
        .unwrap();

    let response = app.follow(body["signupLink"].as_str().unwrap()).await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        response.headers().get("location").unwrap(),
        "https://app.test/welcome"
    );
}

#[tokio::test]
async fn should_reject_sign_in_before_confirmation() {
    let app = TestApp::new().await;
    app.post_signup_link(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await;

    let response = app
        .post_token(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await;
    assert_eq!(response.status().as_u16(), 401);
}
