//! Walks a running local-backend server through signup and an email change,
//! following every link it is handed.

use color_eyre::eyre::{Result, eyre};
use reqwest::{Client, redirect::Policy};
use serde_json::{Value, json};
use uuid::Uuid;

const DEMO_URL_ENV_VAR: &str = "LINKWRIGHT_DEMO_URL";
const DEFAULT_DEMO_URL: &str = "http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().compact().init();

    let base_url = std::env::var(DEMO_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_DEMO_URL.into());
    let http_client = Client::builder().redirect(Policy::none()).build()?;

    let email_address = format!("{}@test.com", Uuid::new_v4());
    let password = Uuid::new_v4().to_string();

    let body = post_json(
        &http_client,
        &format!("{base_url}/request-signup-link"),
        None,
        json!({ "emailAddress": email_address, "password": password }),
    )
    .await?;
    let signup_link = string_field(&body, "signupLink")?;
    tracing::info!(%signup_link, "Signup link");
    follow(&http_client, &signup_link).await?;

    let body = post_json(
        &http_client,
        &format!("{base_url}/token"),
        None,
        json!({ "emailAddress": email_address, "password": password }),
    )
    .await?;
    let access_token = string_field(&body, "accessToken")?;

    let new_email_address = format!("{}@test.com", Uuid::new_v4());
    let body = post_json(
        &http_client,
        &format!("{base_url}/request-change-email-address-links"),
        Some(&access_token),
        json!({ "newEmailAddress": new_email_address }),
    )
    .await?;

    for field in ["currentEmailAddressLink", "newEmailAddressLink"] {
        let link = string_field(&body, field)?;
        tracing::info!(%link, "{field}");
        follow(&http_client, &link).await?;
    }

    Ok(())
}

async fn post_json(
    http_client: &Client,
    url: &str,
    bearer: Option<&str>,
    body: Value,
) -> Result<Value> {
    let mut request = http_client.post(url).json(&body);
    if let Some(token) = bearer {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    tracing::info!(%url, %status, %body, "Response");

    if !status.is_success() {
        return Err(eyre!("{url} answered {status}: {body}"));
    }
    Ok(body)
}

async fn follow(http_client: &Client, link: &str) -> Result<()> {
    let response = http_client.get(link).send().await?;
    let status = response.status();
    let body = response.text().await?;
    tracing::info!(%link, %status, %body, "Followed link");
    Ok(())
}

fn string_field(body: &Value, field: &str) -> Result<String> {
    body[field]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| eyre!("response has no {field}"))
}
