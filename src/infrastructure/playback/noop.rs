//! No-op answer player
//!
//! Used when playback is disabled; the audio reference is still rendered
//! by the presenter.

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{AnswerPlayer, PlaybackError};

/// Player that does nothing
pub struct NoopAnswerPlayer;

#[async_trait]
impl AnswerPlayer for NoopAnswerPlayer {
    async fn play(&self, audio_url: &str) -> Result<(), PlaybackError> {
        debug!(url = audio_url, "playback disabled, skipping");
        Ok(())
    }
}
