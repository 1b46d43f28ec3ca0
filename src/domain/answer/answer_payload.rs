//! Answer payload value object

use thiserror::Error;

/// Error when a required answer field is missing or empty
#[derive(Debug, Clone, Error)]
#[error("missing required field \"{field}\"")]
pub struct IncompleteAnswer {
    pub field: &'static str,
}

/// Validated result of one question round trip: the answer transcript plus
/// a locator for its synthesized speech audio. Both fields are required;
/// an incomplete record cannot be constructed and is never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerPayload {
    transcript: String,
    audio_url: String,
}

impl AnswerPayload {
    /// Validate the raw fields of a remote answer
    pub fn from_parts(
        transcript: Option<String>,
        audio_url: Option<String>,
    ) -> Result<Self, IncompleteAnswer> {
        let transcript = transcript
            .filter(|t| !t.trim().is_empty())
            .ok_or(IncompleteAnswer {
                field: "transcript",
            })?;
        let audio_url = audio_url
            .filter(|u| !u.trim().is_empty())
            .ok_or(IncompleteAnswer { field: "audioUrl" })?;

        Ok(Self {
            transcript,
            audio_url,
        })
    }

    /// Get the answer text
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Get the locator of the spoken answer audio
    pub fn audio_url(&self) -> &str {
        &self.audio_url
    }
}
