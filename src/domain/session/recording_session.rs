//! Recording session state machine

use std::fmt;
use std::time::Instant;

use thiserror::Error;

use crate::domain::audio::{AudioFormat, CapturedAudio};

/// Phases of one capture-and-ask cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Requesting,
    Recording,
    Stopping,
    Processing,
}

impl SessionPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Recording => "recording",
            Self::Stopping => "stopping",
            Self::Processing => "processing",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid phase transition is attempted
#[derive(Debug, Clone, Error)]
#[error("invalid phase transition: cannot {action} while in {current_phase} phase")]
pub struct InvalidPhaseTransition {
    pub current_phase: SessionPhase,
    pub action: String,
}

/// One capture attempt, from access request to finalization.
///
/// Phase machine:
///   IDLE -> REQUESTING (begin_request)
///   REQUESTING -> RECORDING (grant)
///   RECORDING -> STOPPING (request_stop)
///   STOPPING -> PROCESSING (begin_processing)
///
/// Transitions are monotonic; no phase is revisited. A new cycle always
/// uses a fresh session.
#[derive(Debug)]
pub struct RecordingSession {
    phase: SessionPhase,
    audio: Option<CapturedAudio>,
    started_at: Instant,
}

impl RecordingSession {
    /// Create a new session in idle phase
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            audio: None,
            started_at: Instant::now(),
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Get the negotiated format, if access has been granted
    pub fn format(&self) -> Option<AudioFormat> {
        self.audio.as_ref().map(|a| a.format())
    }

    /// Time since the session was created
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Number of chunks captured so far
    pub fn chunk_count(&self) -> usize {
        self.audio.as_ref().map(|a| a.chunk_count()).unwrap_or(0)
    }

    /// Transition from IDLE to REQUESTING
    pub fn begin_request(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.phase != SessionPhase::Idle {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "request capture".to_string(),
            });
        }
        self.phase = SessionPhase::Requesting;
        Ok(())
    }

    /// Transition from REQUESTING to RECORDING. The negotiated format is
    /// fixed here and immutable for the rest of the session.
    pub fn grant(&mut self, format: AudioFormat) -> Result<(), InvalidPhaseTransition> {
        if self.phase != SessionPhase::Requesting {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "grant capture".to_string(),
            });
        }
        self.audio = Some(CapturedAudio::new(format));
        self.phase = SessionPhase::Recording;
        Ok(())
    }

    /// Append a captured chunk to the session's ordered sequence.
    /// Empty chunks are dropped; chunks outside an active capture are
    /// dropped as well.
    pub fn append_chunk(&mut self, chunk: Vec<u8>) {
        if !matches!(self.phase, SessionPhase::Recording | SessionPhase::Stopping) {
            return;
        }
        if let Some(audio) = self.audio.as_mut() {
            audio.push_chunk(chunk);
        }
    }

    /// Transition from RECORDING to STOPPING
    pub fn request_stop(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.phase != SessionPhase::Recording {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "stop recording".to_string(),
            });
        }
        self.phase = SessionPhase::Stopping;
        Ok(())
    }

    /// Transition from STOPPING to PROCESSING
    pub fn begin_processing(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.phase != SessionPhase::Stopping {
            return Err(InvalidPhaseTransition {
                current_phase: self.phase,
                action: "process capture".to_string(),
            });
        }
        self.phase = SessionPhase::Processing;
        Ok(())
    }

    /// Take the captured audio out of the session. The chunk sequence is
    /// consumed at most once per cycle.
    pub fn take_audio(&mut self) -> Option<CapturedAudio> {
        self.audio.take()
    }
}

impl Default for RecordingSession {
    fn default() -> Self {
        Self::new()
    }
}
