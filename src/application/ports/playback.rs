//! Answer playback port interface

use async_trait::async_trait;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Failed to fetch answer audio: {0}")]
    FetchFailed(String),

    #[error("Audio output device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for playing the spoken answer referenced by an answer payload
#[async_trait]
pub trait AnswerPlayer: Send + Sync {
    /// Fetch and play the audio behind the given locator, blocking the
    /// caller's async flow until playback finishes.
    async fn play(&self, audio_url: &str) -> Result<(), PlaybackError>;
}

/// Blanket implementation for boxed player types
#[async_trait]
impl AnswerPlayer for Box<dyn AnswerPlayer> {
    async fn play(&self, audio_url: &str) -> Result<(), PlaybackError> {
        self.as_ref().play(audio_url).await
    }
}
