//! Rodio-based answer playback adapter
//!
//! Fetches the spoken answer behind the payload's audio locator and plays
//! it on the default output device.

use std::io::Cursor;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tracing::debug;

use crate::application::ports::{AnswerPlayer, PlaybackError};

/// Answer player using rodio
pub struct RodioAnswerPlayer {
    client: reqwest::Client,
}

impl RodioAnswerPlayer {
    /// Create a new rodio-based player
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for RodioAnswerPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerPlayer for RodioAnswerPlayer {
    async fn play(&self, audio_url: &str) -> Result<(), PlaybackError> {
        debug!(url = audio_url, "fetching answer audio");

        let bytes = self
            .client
            .get(audio_url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PlaybackError::FetchFailed(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| PlaybackError::FetchFailed(e.to_string()))?;

        // Audio output blocks until playback ends; keep it off the runtime.
        tokio::task::spawn_blocking(move || play_bytes(bytes.to_vec()))
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}

/// Play a fetched audio body synchronously (called from spawn_blocking)
fn play_bytes(bytes: Vec<u8>) -> Result<(), PlaybackError> {
    let (_stream, stream_handle) =
        OutputStream::try_default().map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;

    let sink =
        Sink::try_new(&stream_handle).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    let source =
        Decoder::new(Cursor::new(bytes)).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    sink.append(source);
    sink.sleep_until_end();

    Ok(())
}
