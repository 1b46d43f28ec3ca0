//! Ask use case: the interaction state machine behind the single control
//!
//! One control maps to two actions: pressing it while idle starts a
//! capture cycle, pressing it while recording stops the capture and sends
//! the question. Presses in any other phase are ignored. Every outcome,
//! answer or failure, returns the machine to idle, so the control is
//! always usable again.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::domain::session::{InvalidPhaseTransition, RecordingSession, SessionPhase};
use crate::domain::status::UiStatus;

use super::ports::{
    AnswerClient, AnswerPlayer, CaptureError, CaptureEvent, NotificationIcon, Notifier,
    StatusPresenter, TransportError, VoiceRecorder,
};

/// Errors that end a cycle early. Each is surfaced exactly once as an
/// error status, then the machine is idle again.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Phase(#[from] InvalidPhaseTransition),
}

/// Feature toggles for a session
#[derive(Debug, Clone)]
pub struct AskConfig {
    /// Whether to play the spoken answer after rendering it
    pub enable_playback: bool,
    /// Whether to show desktop notifications
    pub enable_notify: bool,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            enable_playback: true,
            enable_notify: false,
        }
    }
}

/// Ask use case. Owns the single source of truth for what the client is
/// doing right now and coordinates recorder, transport, playback, and
/// presentation.
pub struct AskUseCase<R, C, P, N, V>
where
    R: VoiceRecorder,
    C: AnswerClient,
    P: AnswerPlayer,
    N: Notifier,
    V: StatusPresenter,
{
    recorder: R,
    client: C,
    player: P,
    notifier: N,
    view: V,
    phase: Arc<Mutex<SessionPhase>>,
    config: AskConfig,
}

impl<R, C, P, N, V> AskUseCase<R, C, P, N, V>
where
    R: VoiceRecorder,
    C: AnswerClient,
    P: AnswerPlayer,
    N: Notifier,
    V: StatusPresenter,
{
    /// Create a new use case instance
    pub fn new(recorder: R, client: C, player: P, notifier: N, view: V, config: AskConfig) -> Self {
        Self {
            recorder,
            client,
            player,
            notifier,
            view,
            phase: Arc::new(Mutex::new(SessionPhase::Idle)),
            config,
        }
    }

    /// Get the current phase
    pub async fn phase(&self) -> SessionPhase {
        *self.phase.lock().await
    }

    async fn set_phase(&self, phase: SessionPhase) {
        debug!(%phase, "phase change");
        *self.phase.lock().await = phase;
    }

    async fn show(&self, status: UiStatus) {
        self.view.status(&status).await;
    }

    /// Run the machine until the control stream closes.
    ///
    /// Each press received while idle starts a cycle; the cycle consumes
    /// further presses itself. Presses that land while the machine is busy
    /// in a non-pressable phase are drained and dropped.
    pub async fn run(&self, mut presses: mpsc::Receiver<()>) {
        while presses.recv().await.is_some() {
            if let Err(e) = self.cycle(&mut presses).await {
                self.report_failure(&e).await;
            }
            self.set_phase(SessionPhase::Idle).await;
            drain(&mut presses);
        }
    }

    /// One full cycle: request access, record, stop, encode, exchange,
    /// render. Always leaves the device released.
    async fn cycle(&self, presses: &mut mpsc::Receiver<()>) -> Result<(), CycleError> {
        let mut session = RecordingSession::new();

        session.begin_request()?;
        self.set_phase(SessionPhase::Requesting).await;
        self.show(UiStatus::info("Requesting microphone access...")).await;

        let capture = self.recorder.request_capture().await?;
        // Presses made while waiting for the grant are ignored.
        drain(presses);

        session.grant(capture.format())?;
        self.set_phase(SessionPhase::Recording).await;
        self.show(UiStatus::info("Listening... press Enter to stop")).await;
        self.notify("Recording", "Listening for your question", NotificationIcon::Recording)
            .await;

        let (mut events, mut stopper) = capture.split();
        let mut presses_open = true;
        loop {
            tokio::select! {
                pressed = presses.recv(), if presses_open => {
                    if pressed.is_none() {
                        // The control went away; treat it as a final stop.
                        presses_open = false;
                    }
                    if session.phase() == SessionPhase::Recording {
                        stopper.stop();
                        session.request_stop()?;
                        self.set_phase(SessionPhase::Stopping).await;
                        self.show(UiStatus::info("Finishing recording...")).await;
                    }
                    // Presses after the stop request are ignored.
                }
                event = events.recv() => match event {
                    Some(CaptureEvent::Chunk(chunk)) => session.append_chunk(chunk),
                    Some(CaptureEvent::Failed(err)) => return Err(err.into()),
                    Some(CaptureEvent::Finalized) | None => break,
                },
            }
        }

        if session.phase() == SessionPhase::Recording {
            // The capture source finalized on its own (device gone quiet);
            // fold it into the normal stop path.
            stopper.stop();
            session.request_stop()?;
            self.set_phase(SessionPhase::Stopping).await;
        }

        let audio = session.take_audio().ok_or_else(|| {
            CaptureError::RecordingFailed("capture finalized before access was granted".into())
        })?;
        if audio.is_empty() {
            return Err(CaptureError::NoAudioCaptured.into());
        }
        info!(
            chunks = audio.chunk_count(),
            bytes = audio.total_bytes(),
            format = %audio.format(),
            elapsed_ms = session.elapsed().as_millis() as u64,
            "capture finalized"
        );

        session.begin_processing()?;
        self.set_phase(SessionPhase::Processing).await;
        self.show(UiStatus::info("Sending your question...")).await;
        self.notify("Thinking", "Question sent, waiting for the answer", NotificationIcon::Processing)
            .await;

        let payload = tokio::task::spawn_blocking(move || audio.to_base64())
            .await
            .map_err(|e| TransportError::EncodingFailed(e.to_string()))?;

        let answer = self.client.send(&payload).await?;

        self.show(UiStatus::info("Answer ready")).await;
        self.view.answer(&answer).await;
        self.notify("Answer ready", answer.transcript(), NotificationIcon::Success)
            .await;

        if self.config.enable_playback {
            if let Err(e) = self.player.play(answer.audio_url()).await {
                // Playback is a convenience; the answer is already rendered.
                warn!(error = %e, "answer playback failed");
                self.show(UiStatus::error(format!("Playback unavailable: {}", e)))
                    .await;
            }
        }

        Ok(())
    }

    async fn report_failure(&self, err: &CycleError) {
        warn!(error = %err, "cycle failed");
        self.show(UiStatus::error(err.to_string())).await;
        self.notify("voice-ask", &err.to_string(), NotificationIcon::Error)
            .await;
    }

    async fn notify(&self, title: &str, message: &str, icon: NotificationIcon) {
        if !self.config.enable_notify {
            return;
        }
        if let Err(e) = self.notifier.notify(title, message, icon).await {
            debug!(error = %e, "notification failed");
        }
    }
}

fn drain(presses: &mut mpsc::Receiver<()>) {
    while presses.try_recv().is_ok() {}
}
