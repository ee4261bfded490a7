//! Credential test calls.
//!
//! One-shot "test connection" request used by the settings surface to
//! verify a key against an endpoint before saving it.

use tracing::debug;

use lexipane_protocols::command::CommandAck;

use crate::api::ApiErrorBody;

/// Fires single test requests against provider endpoints.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTester {
    http: reqwest::Client,
}

impl ConnectionTester {
    pub fn new() -> Self {
        Self { http: reqwest::Client::new() }
    }

    /// POST a minimal chat request and report whether the endpoint accepts
    /// the credential.
    pub async fn test(&self, url: &str, api_key: &str, model: &str) -> CommandAck {
        debug!("Testing credential against {url}");

        let body = serde_json::json!({
            "model": model,
            "messages": [{"role": "user", "content": "Test connection"}]
        });

        let response = match self.http.post(url).bearer_auth(api_key).json(&body).send().await {
            Ok(response) => response,
            Err(e) => return CommandAck::err(e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            return CommandAck::ok();
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|parsed| parsed.error)
            .and_then(|detail| detail.message)
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        CommandAck::err(message)
    }
}
