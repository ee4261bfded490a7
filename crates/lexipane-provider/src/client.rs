//! Provider request client.
//!
//! Executes exactly one HTTP call to one endpoint and classifies the
//! outcome from the HTTP status at the point of detection. Cancellation is
//! owned by the caller: dropping the returned future aborts the request.

use reqwest::StatusCode;
use tracing::debug;

use lexipane_protocols::error::ExplainError;

use crate::api::{ApiErrorBody, ChatMessage, ChatRequest, ChatResponse, FreeReply, FreeRequest};
use crate::endpoints::Endpoint;
use crate::prompt::{SYSTEM_INSTRUCTION, build_prompt};

const MAX_TOKENS: u32 = 800;
const TEMPERATURE: f32 = 0.7;

/// HTTP client for a single endpoint call.
#[derive(Debug, Clone, Default)]
pub struct EndpointClient {
    http: reqwest::Client,
}

impl EndpointClient {
    pub fn new() -> Self {
        Self { http: reqwest::Client::new() }
    }

    /// One chat-completion call. Returns the assistant reply body.
    pub async fn chat_reply(
        &self,
        endpoint: &Endpoint,
        credential: Option<&str>,
        text: &str,
    ) -> Result<String, ExplainError> {
        let request = ChatRequest {
            model: endpoint.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(build_prompt(text)),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!("POST {} (model {})", endpoint.url, endpoint.model);

        let mut builder = self.http.post(&endpoint.url).json(&request);
        if let Some(key) = credential {
            builder = builder.bearer_auth(key);
        }

        let body = Self::read_body(builder.send().await).await?;
        let response: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| ExplainError::MalformedResponse(format!("invalid reply body: {e}")))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ExplainError::MalformedResponse("reply carries no message content".to_string())
            })
    }

    /// One free-tier call. Returns the explanation body.
    pub async fn free_reply(&self, endpoint: &Endpoint, text: &str) -> Result<String, ExplainError> {
        let request = FreeRequest {
            text: text.to_string(),
            prompt: build_prompt(text),
            max_tokens: MAX_TOKENS,
        };

        debug!("POST {} (free tier)", endpoint.url);

        let body = Self::read_body(self.http.post(&endpoint.url).json(&request).send().await).await?;
        let reply: FreeReply = serde_json::from_str(&body)
            .map_err(|e| ExplainError::MalformedResponse(format!("invalid reply body: {e}")))?;

        reply.explanation.ok_or_else(|| {
            ExplainError::MalformedResponse("reply carries no explanation".to_string())
        })
    }

    /// Resolve the transport result into a 2xx body or a classified error.
    async fn read_body(
        result: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<String, ExplainError> {
        let response = result.map_err(|e| ExplainError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExplainError::Network(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        Err(ExplainError::from_status(
            status.as_u16(),
            Self::error_message(status, &body),
        ))
    }

    /// Pull a human-readable message out of an error body, falling back to
    /// the raw text.
    fn error_message(status: StatusCode, body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
            if let Some(message) = parsed.error.and_then(|d| d.message) {
                return message;
            }
        }
        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
