use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn should_answer_preflight() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/request-change-email-address-links", app.address),
        )
        .header("Origin", "https://app.test")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "authorization, content-type")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let headers = response.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    let allowed = headers
        .get("access-control-allow-headers")
        .unwrap()
        .to_str()
        .unwrap();
    for header in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(header), "{header} missing from {allowed}");
    }
}

#[tokio::test]
async fn should_mirror_cors_headers_on_errors() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/request-change-email-address-links", app.address))
        .header("Origin", "https://app.test")
        .json(&json!({ "newEmailAddress": "b@test.com" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}
