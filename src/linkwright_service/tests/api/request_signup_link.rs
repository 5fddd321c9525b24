use serde_json::{Value, json};

use crate::helpers::{PASSWORD, TestApp, error_of};

#[tokio::test]
async fn should_return_200_with_signup_link() {
    let app = TestApp::new().await;

    let response = app
        .post_signup_link(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let link = body["signupLink"].as_str().unwrap();
    assert!(link.starts_with("http://localhost:3000/verify?token="));
    assert!(link.ends_with("type=signup"));
}

#[tokio::test]
async fn should_return_500_for_invalid_input() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "emailAddress": "", "password": PASSWORD }),
        json!({ "emailAddress": "not-an-email", "password": PASSWORD }),
        json!({ "emailAddress": "a@test.com", "password": "short" }),
    ];

    for case in cases {
        let response = app.post_signup_link(&case).await;
        assert_eq!(response.status().as_u16(), 500, "Failed for input: {case}");
        assert!(error_of(response).await.starts_with("Link generation failed"));
    }
}

#[tokio::test]
async fn should_reject_malformed_body() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "password": PASSWORD }),
        json!({ "emailAddress": "a@test.com" }),
        json!({ "emailAddress": true, "password": PASSWORD }),
    ];

    for case in cases {
        let response = app.post_signup_link(&case).await;
        assert_eq!(response.status().as_u16(), 500, "Failed for input: {case}");
        assert!(error_of(response).await.starts_with("Link generation failed"));
    }
}

#[tokio::test]
async fn should_refresh_link_for_unconfirmed_address() {
    let app = TestApp::new().await;
    let body = json!({ "emailAddress": "a@test.com", "password": PASSWORD });

    let first: Value = app.post_signup_link(&body).await.json().await.unwrap();
    let second: Value = app.post_signup_link(&body).await.json().await.unwrap();

    let stale = app.follow(first["signupLink"].as_str().unwrap()).await;
    assert_eq!(stale.status().as_u16(), 410);
    let fresh = app.follow(second["signupLink"].as_str().unwrap()).await;
    assert_eq!(fresh.status().as_u16(), 200);
}

#[tokio::test]
async fn should_return_500_for_confirmed_address() {
    let app = TestApp::new().await;
    app.confirmed_user("a@test.com").await;

    let response = app
        .post_signup_link(&json!({ "emailAddress": "a@test.com", "password": PASSWORD }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        error_of(response).await,
        "Link generation failed: User already registered"
    );
}
