//! Take encoding: negotiated-format containers for captured PCM
//!
//! FLAC is the preferred capture format (lossless, roughly 40% of WAV
//! size); WAV is the always-available fallback container.

use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex as StdMutex};

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use hound::{SampleFormat as WavSampleFormat, WavSpec, WavWriter};

use crate::application::ports::CaptureError;
use crate::domain::audio::AudioFormat;

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: usize = 16;

/// Number of channels (mono)
const CHANNELS: usize = 1;

/// Take-encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("FLAC config error: {0}")]
    Config(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),

    #[error("container write failed: {0}")]
    Write(String),
}

/// Walk the format preference list and return the first encoder that is
/// actually available. An exhausted list means there is no usable capture
/// pipeline at all.
pub fn negotiate_format() -> Result<AudioFormat, CaptureError> {
    for format in AudioFormat::PREFERENCE {
        if encoder_available(*format) {
            return Ok(*format);
        }
    }
    Err(CaptureError::DeviceUnavailable)
}

fn encoder_available(format: AudioFormat) -> bool {
    match format {
        AudioFormat::Flac => config::Encoder::default().into_verified().is_ok(),
        AudioFormat::Wav => true,
    }
}

/// Encode a mono i16 take into the negotiated container
pub fn encode_take(
    pcm: &[i16],
    sample_rate: u32,
    format: AudioFormat,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        AudioFormat::Flac => encode_flac(pcm, sample_rate),
        AudioFormat::Wav => encode_wav(pcm, sample_rate),
    }
}

/// Encode PCM samples to FLAC
fn encode_flac(pcm: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    // flacenc works on i32 samples internally
    let samples_i32: Vec<i32> = pcm.iter().map(|&s| s as i32).collect();

    let config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| EncodeError::Config(format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        &samples_i32,
        CHANNELS,
        BITS_PER_SAMPLE,
        sample_rate as usize,
    );

    let flac_stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| EncodeError::Encode(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    flac_stream
        .write(&mut sink)
        .map_err(|e| EncodeError::Write(e.to_string()))?;

    Ok(sink.into_inner())
}

/// In-memory target for hound, which needs Seek and consumes its writer on
/// finalize. A cloned handle keeps access to the bytes afterwards.
#[derive(Clone)]
struct SharedCursor {
    inner: Arc<StdMutex<Cursor<Vec<u8>>>>,
}

impl SharedCursor {
    fn new() -> Self {
        Self {
            inner: Arc::new(StdMutex::new(Cursor::new(Vec::with_capacity(8 * 1024)))),
        }
    }

    fn into_bytes(self) -> Result<Vec<u8>, EncodeError> {
        let owned = Arc::try_unwrap(self.inner)
            .map_err(|_| EncodeError::Write("capture buffer still shared".into()))?;
        let cursor = owned
            .into_inner()
            .map_err(|_| EncodeError::Write("capture buffer lock poisoned".into()))?;
        Ok(cursor.into_inner())
    }
}

impl Seek for SharedCursor {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer lock poisoned"))?
            .seek(pos)
    }
}

impl Write for SharedCursor {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer lock poisoned"))?
            .flush()
    }
}

/// Wrap PCM samples in a WAV container
fn encode_wav(pcm: &[i16], sample_rate: u32) -> Result<Vec<u8>, EncodeError> {
    let spec = WavSpec {
        channels: CHANNELS as u16,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE as u16,
        sample_format: WavSampleFormat::Int,
    };

    let buffer = SharedCursor::new();
    let mut writer =
        WavWriter::new(buffer.clone(), spec).map_err(|e| EncodeError::Write(e.to_string()))?;
    for &sample in pcm {
        writer
            .write_sample(sample)
            .map_err(|e| EncodeError::Write(e.to_string()))?;
    }
    // Finalize patches the RIFF framing before we take the bytes out.
    writer
        .finalize()
        .map_err(|e| EncodeError::Write(e.to_string()))?;

    buffer.into_bytes()
}
