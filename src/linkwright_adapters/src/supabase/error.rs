use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupabaseClientError {
    #[error("Invalid supabase url: {0}")]
    InvalidUrl(String),
    #[error("Failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// GoTrue has used each of these fields for its error text at some point.
#[derive(Debug, Default, Deserialize)]
struct GoTrueErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl GoTrueErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
    }
}

/// Extracts the error text from a failed GoTrue response.
pub(crate) async fn error_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    serde_json::from_str::<GoTrueErrorBody>(&body)
        .ok()
        .and_then(GoTrueErrorBody::into_message)
        .unwrap_or_else(|| format!("Supabase responded with {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(body: &str) -> Option<String> {
        serde_json::from_str::<GoTrueErrorBody>(body)
            .ok()
            .and_then(GoTrueErrorBody::into_message)
    }

    #[test]
    fn test_msg_wins() {
        assert_eq!(
            message_of(r#"{"code":422,"msg":"Email rate limit exceeded","error":"x"}"#).as_deref(),
            Some("Email rate limit exceeded")
        );
    }

    #[test]
    fn test_oauth_style_body() {
        assert_eq!(
            message_of(r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#)
                .as_deref(),
            Some("Invalid Refresh Token")
        );
    }

    #[test]
    fn test_unrecognised_body() {
        assert_eq!(message_of(r#"{"code":500}"#), None);
        assert_eq!(message_of("<html>"), None);
    }
}
