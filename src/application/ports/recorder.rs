//! Capture port interfaces

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::domain::audio::AudioFormat;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Microphone access denied")]
    PermissionDenied,

    #[error("No audio input device available")]
    DeviceUnavailable,

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("No audio captured")]
    NoAudioCaptured,
}

/// Events produced by an active capture.
///
/// Chunks arrive in capture order; exactly one terminal event (`Finalized`
/// or `Failed`) follows the last chunk. A closed stream without a terminal
/// event is treated as finalized.
#[derive(Debug)]
pub enum CaptureEvent {
    Chunk(Vec<u8>),
    Finalized,
    Failed(CaptureError),
}

/// Stop control for an in-progress capture. Dropping it also signals
/// stop, so the device is released on every exit path.
pub struct CaptureStop(Option<oneshot::Sender<()>>);

impl CaptureStop {
    /// Request end of capture. Idempotent. The capture source releases the
    /// device and then delivers any remaining chunks followed by the
    /// finalization event.
    pub fn stop(&mut self) {
        if let Some(stop) = self.0.take() {
            let _ = stop.send(());
        }
    }

    /// Whether stop has already been requested
    pub fn is_stopped(&self) -> bool {
        self.0.is_none()
    }
}

/// Handle to an in-progress capture: the negotiated format, the ordered
/// event stream, and the stop control.
pub struct ActiveCapture {
    format: AudioFormat,
    events: mpsc::Receiver<CaptureEvent>,
    stop: CaptureStop,
}

impl ActiveCapture {
    pub fn new(
        format: AudioFormat,
        events: mpsc::Receiver<CaptureEvent>,
        stop: oneshot::Sender<()>,
    ) -> Self {
        Self {
            format,
            events,
            stop: CaptureStop(Some(stop)),
        }
    }

    /// Get the format negotiated at capture start
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Request end of capture; see [`CaptureStop::stop`]
    pub fn stop(&mut self) {
        self.stop.stop();
    }

    /// Whether stop has already been requested
    pub fn is_stopping(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Next capture event; None once the stream has closed.
    pub async fn next_event(&mut self) -> Option<CaptureEvent> {
        self.events.recv().await
    }

    /// Split the handle into its event stream and stop control, so a
    /// consumer can wait on events while holding the stop control apart.
    pub fn split(self) -> (mpsc::Receiver<CaptureEvent>, CaptureStop) {
        (self.events, self.stop)
    }
}

/// Port for microphone capture
#[async_trait]
pub trait VoiceRecorder: Send + Sync {
    /// Ask the platform for microphone access and begin capturing.
    ///
    /// Resolves once access is granted (with the format negotiated from
    /// the preference list) or refused. Access failures are surfaced, not
    /// retried.
    async fn request_capture(&self) -> Result<ActiveCapture, CaptureError>;
}
