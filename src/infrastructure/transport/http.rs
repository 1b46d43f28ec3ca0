//! HTTP answer endpoint adapter

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::application::ports::{AnswerClient, TransportError};
use crate::domain::answer::AnswerPayload;

// Wire types for the answer endpoint

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerResponse {
    transcript: Option<String>,
    audio_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

/// Client for the remote answer pipeline. One POST per question; the body
/// is the base64-encoded audio itself, with no envelope.
pub struct HttpAnswerClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpAnswerClient {
    /// Create a new client for the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Get the configured endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Pull a human-readable message out of a failure body, falling back
    /// to the status line.
    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.error.or(e.message))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| match status.canonical_reason() {
                Some(reason) => format!("HTTP {} {}", status.as_u16(), reason),
                None => format!("HTTP {}", status.as_u16()),
            })
    }
}

#[async_trait]
impl AnswerClient for HttpAnswerClient {
    async fn send(&self, payload: &str) -> Result<AnswerPayload, TransportError> {
        debug!(bytes = payload.len(), "posting encoded question");

        let response = self
            .client
            .post(&self.endpoint)
            .body(payload.to_owned())
            .send()
            .await
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::RemoteError(Self::error_message(
                status, &body,
            )));
        }

        let raw: AnswerResponse = response
            .json()
            .await
            .map_err(|e| TransportError::InvalidResponseShape(e.to_string()))?;

        info!(status = status.as_u16(), "answer received");
        AnswerPayload::from_parts(raw.transcript, raw.audio_url)
            .map_err(|e| TransportError::InvalidResponseShape(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_error_field() {
        let message = HttpAnswerClient::error_message(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"upstream failure","message":"ignored"}"#,
        );
        assert_eq!(message, "upstream failure");
    }

    #[test]
    fn error_message_falls_back_to_message_field() {
        let message = HttpAnswerClient::error_message(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message":"audio too short"}"#,
        );
        assert_eq!(message, "audio too short");
    }

    #[test]
    fn error_message_falls_back_to_status_line() {
        let message = HttpAnswerClient::error_message(
            reqwest::StatusCode::SERVICE_UNAVAILABLE,
            "backend exploded",
        );
        assert_eq!(message, "HTTP 503 Service Unavailable");
    }

    #[test]
    fn blank_error_field_uses_status_line() {
        let message =
            HttpAnswerClient::error_message(reqwest::StatusCode::BAD_GATEWAY, r#"{"error":"  "}"#);
        assert_eq!(message, "HTTP 502 Bad Gateway");
    }

    #[test]
    fn client_keeps_endpoint() {
        let client = HttpAnswerClient::new("https://api.example/ask");
        assert_eq!(client.endpoint(), "https://api.example/ask");
    }
}
