//! Answer transport port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::answer::AnswerPayload;

/// Transport errors
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Failed to encode audio for upload: {0}")]
    EncodingFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    // The remote message is shown verbatim to the user.
    #[error("{0}")]
    RemoteError(String),

    #[error("Malformed answer from server: {0}")]
    InvalidResponseShape(String),
}

/// Port for the question/answer exchange
#[async_trait]
pub trait AnswerClient: Send + Sync {
    /// Send one encoded question and wait for the validated answer.
    ///
    /// Exactly one request per call; no retry, no timeout, no caching.
    async fn send(&self, payload: &str) -> Result<AnswerPayload, TransportError>;
}
