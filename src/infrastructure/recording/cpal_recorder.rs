//! Microphone capture adapter using cpal
//!
//! The cpal stream is not Send, so each capture runs on a dedicated
//! thread that owns the device for the whole session. Samples are mixed
//! down to mono i16 at the device rate; on stop the take is encoded into
//! the negotiated container and handed over as ordered chunks followed by
//! one finalization event.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

use crate::application::ports::{ActiveCapture, CaptureError, CaptureEvent, VoiceRecorder};
use crate::domain::audio::AudioFormat;

use super::encode::{encode_take, negotiate_format};

/// Size of the encoded chunks handed to the session
const CHUNK_BYTES: usize = 32 * 1024;

/// How often the capture thread checks for the stop signal
const STOP_POLL: Duration = Duration::from_millis(50);

/// Microphone recorder backed by cpal
pub struct CpalVoiceRecorder;

impl CpalVoiceRecorder {
    /// Create a new cpal-based recorder
    pub fn new() -> Self {
        Self
    }

    /// Whether the platform exposes any default input device. Used to
    /// disable recording actions entirely when the capability is absent.
    pub fn device_available() -> bool {
        cpal::default_host().default_input_device().is_some()
    }
}

impl Default for CpalVoiceRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VoiceRecorder for CpalVoiceRecorder {
    async fn request_capture(&self) -> Result<ActiveCapture, CaptureError> {
        let format = negotiate_format()?;

        let (event_tx, event_rx) = mpsc::channel(64);
        let (stop_tx, stop_rx) = oneshot::channel();
        let (ready_tx, ready_rx) = oneshot::channel();

        std::thread::spawn(move || capture_thread(format, event_tx, stop_rx, ready_tx));

        match ready_rx.await {
            Ok(Ok(())) => Ok(ActiveCapture::new(format, event_rx, stop_tx)),
            Ok(Err(err)) => Err(err),
            // The thread died before reporting readiness.
            Err(_) => Err(CaptureError::DeviceUnavailable),
        }
    }
}

/// Owns the device from grant to release. Reports readiness (or a
/// classified refusal) once, then holds the stream until stopped, the
/// handle is dropped, or the stream errors.
fn capture_thread(
    format: AudioFormat,
    events: mpsc::Sender<CaptureEvent>,
    mut stop: oneshot::Receiver<()>,
    ready: oneshot::Sender<Result<(), CaptureError>>,
) {
    let host = cpal::default_host();
    let Some(device) = host.default_input_device() else {
        let _ = ready.send(Err(CaptureError::DeviceUnavailable));
        return;
    };
    let supported = match device.default_input_config() {
        Ok(config) => config,
        Err(err) => {
            let _ = ready.send(Err(classify_config_error(&err)));
            return;
        }
    };

    let sample_rate = supported.sample_rate().0;
    let channels = supported.channels();
    let sample_format = supported.sample_format();
    let stream_config = supported.config();
    info!(
        device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
        rate = sample_rate,
        channels,
        %format,
        "recording from input device"
    );

    let samples: Arc<StdMutex<Vec<i16>>> = Arc::new(StdMutex::new(Vec::new()));
    let stream_error: Arc<StdMutex<Option<String>>> = Arc::new(StdMutex::new(None));

    let err_store = Arc::clone(&stream_error);
    let err_fn = move |err: cpal::StreamError| {
        error!(%err, "input stream error");
        if let Ok(mut slot) = err_store.lock() {
            slot.get_or_insert(err.to_string());
        }
    };

    let built = match sample_format {
        SampleFormat::I16 => {
            let buffer = Arc::clone(&samples);
            device.build_input_stream(
                &stream_config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    push_samples(&buffer, data, channels);
                },
                err_fn,
                None,
            )
        }
        SampleFormat::F32 => {
            let buffer = Arc::clone(&samples);
            device.build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let converted: Vec<i16> = data
                        .iter()
                        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
                        .collect();
                    push_samples(&buffer, &converted, channels);
                },
                err_fn,
                None,
            )
        }
        other => {
            let _ = ready.send(Err(CaptureError::RecordingFailed(format!(
                "unsupported sample format: {:?}",
                other
            ))));
            return;
        }
    };

    let stream = match built {
        Ok(stream) => stream,
        Err(err) => {
            let _ = ready.send(Err(classify_build_error(&err)));
            return;
        }
    };
    if let Err(err) = stream.play() {
        let _ = ready.send(Err(CaptureError::RecordingFailed(err.to_string())));
        return;
    }
    let _ = ready.send(Ok(()));

    // Hold the device until stopped, abandoned, or broken.
    loop {
        match stop.try_recv() {
            Ok(()) | Err(oneshot::error::TryRecvError::Closed) => break,
            Err(oneshot::error::TryRecvError::Empty) => {}
        }
        if stream_error.lock().map(|g| g.is_some()).unwrap_or(true) {
            break;
        }
        std::thread::sleep(STOP_POLL);
    }

    // Release the device before any finalization work, on every path.
    drop(stream);

    if let Some(reason) = stream_error.lock().ok().and_then(|mut g| g.take()) {
        let _ = events.blocking_send(CaptureEvent::Failed(CaptureError::RecordingFailed(reason)));
        return;
    }

    let pcm = match samples.lock() {
        Ok(mut guard) => std::mem::take(&mut *guard),
        Err(_) => Vec::new(),
    };
    if pcm.is_empty() {
        // Nothing captured; finalize with zero chunks.
        let _ = events.blocking_send(CaptureEvent::Finalized);
        return;
    }

    match encode_take(&pcm, sample_rate, format) {
        Ok(bytes) => {
            for chunk in bytes.chunks(CHUNK_BYTES) {
                if events
                    .blocking_send(CaptureEvent::Chunk(chunk.to_vec()))
                    .is_err()
                {
                    return;
                }
            }
            let _ = events.blocking_send(CaptureEvent::Finalized);
        }
        Err(err) => {
            let _ = events.blocking_send(CaptureEvent::Failed(CaptureError::RecordingFailed(
                err.to_string(),
            )));
        }
    }
}

fn push_samples(buffer: &Arc<StdMutex<Vec<i16>>>, data: &[i16], channels: u16) {
    if data.is_empty() {
        return;
    }
    let mono = mix_to_mono(data, channels);
    if let Ok(mut guard) = buffer.lock() {
        guard.extend_from_slice(&mono);
    }
}

/// Average interleaved channels down to mono
fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels as usize)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect()
}

fn classify_config_error(err: &cpal::DefaultStreamConfigError) -> CaptureError {
    match err {
        cpal::DefaultStreamConfigError::DeviceNotAvailable => CaptureError::DeviceUnavailable,
        other => classify_message(&other.to_string()),
    }
}

fn classify_build_error(err: &cpal::BuildStreamError) -> CaptureError {
    match err {
        cpal::BuildStreamError::DeviceNotAvailable => CaptureError::DeviceUnavailable,
        other => classify_message(&other.to_string()),
    }
}

/// Backends report permission refusals as free-form text only.
fn classify_message(message: &str) -> CaptureError {
    let lower = message.to_lowercase();
    if lower.contains("permission") || lower.contains("denied") || lower.contains("not allowed") {
        CaptureError::PermissionDenied
    } else {
        CaptureError::RecordingFailed(message.to_string())
    }
}
