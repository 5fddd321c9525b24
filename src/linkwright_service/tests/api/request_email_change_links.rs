use serde_json::{Value, json};

use crate::helpers::{TestApp, error_of};

#[tokio::test]
async fn should_return_401_without_bearer_token() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "newEmailAddress": "b@test.com" }),
        json!({}),
        json!({ "newEmailAddress": 42 }),
    ];

    for case in cases {
        let response = app.post_change_links(&case, None).await;
        assert_eq!(response.status().as_u16(), 401, "Failed for input: {case}");
    }
}

#[tokio::test]
async fn should_return_401_for_invalid_token() {
    let app = TestApp::new().await;

    let response = app
        .post_change_links(&json!({ "newEmailAddress": "b@test.com" }), Some("garbage"))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn should_return_500_for_invalid_new_address() {
    let app = TestApp::new().await;
    let token = app.confirmed_user("a@test.com").await;

    for case in [
        json!({ "newEmailAddress": "not-an-email" }),
        json!({ "newEmailAddress": "a@test.com" }),
        json!({}),
    ] {
        let response = app.post_change_links(&case, Some(&token)).await;
        assert_eq!(response.status().as_u16(), 500, "Failed for input: {case}");
        assert!(error_of(response).await.starts_with("Link generation failed"));
    }
}

#[tokio::test]
async fn should_return_500_when_new_address_is_registered() {
    let app = TestApp::new().await;
    let token = app.confirmed_user("a@test.com").await;
    app.confirmed_user("b@test.com").await;

    let response = app
        .post_change_links(&json!({ "newEmailAddress": "b@test.com" }), Some(&token))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        error_of(response).await,
        "Link generation failed: A user with this email address has already been registered"
    );
}

#[tokio::test]
async fn should_complete_email_change_in_order() {
    let app = TestApp::new().await;
    let token = app.confirmed_user("a@test.com").await;

    let response = app
        .post_change_links(&json!({ "newEmailAddress": "b@test.com" }), Some(&token))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let links: Value = response.json().await.unwrap();
    let current = links["currentEmailAddressLink"].as_str().unwrap();
    let new = links["newEmailAddressLink"].as_str().unwrap();
    assert_ne!(current, new);

    let early = app.follow(new).await;
    assert_eq!(early.status().as_u16(), 409);

    let response = app.follow(current).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "current_confirmed", "emailAddress": "a@test.com" }));

    let response = app.follow(new).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "completed", "emailAddress": "b@test.com" }));

    let replay = app.follow(current).await;
    assert_eq!(replay.status().as_u16(), 409);
    assert_eq!(error_of(replay).await, "Link has already been used");

    // The old session still names the same identity, now under its new address
    let response = app
        .post_change_links(&json!({ "newEmailAddress": "c@test.com" }), Some(&token))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn should_expire_superseded_request() {
    let app = TestApp::new().await;
    let token = app.confirmed_user("a@test.com").await;

    let first: Value = app
        .post_change_links(&json!({ "newEmailAddress": "b@test.com" }), Some(&token))
        .await
        .json()
        .await
        .unwrap();
    let second: Value = app
        .post_change_links(&json!({ "newEmailAddress": "c@test.com" }), Some(&token))
        .await
        .json()
        .await
        .unwrap();

    let stale = app
        .follow(first["currentEmailAddressLink"].as_str().unwrap())
        .await;
    assert_eq!(stale.status().as_u16(), 410);

    let fresh = app
        .follow(second["currentEmailAddressLink"].as_str().unwrap())
        .await;
    assert_eq!(fresh.status().as_u16(), 200);
}
