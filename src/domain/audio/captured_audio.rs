//! Captured audio value objects

use std::fmt;

/// Negotiated capture encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Flac,
    Wav,
}

impl AudioFormat {
    /// Preference order tried at capture start: the compressed format
    /// first, the platform default container last.
    pub const PREFERENCE: &'static [AudioFormat] = &[AudioFormat::Flac, AudioFormat::Wav];

    /// Get the MIME-like tag
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Flac => "flac",
            Self::Wav => "wav",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::Flac
    }
}

/// The ordered chunk sequence captured during one session, tagged with the
/// format negotiated at capture start. Append-only; empty chunks are
/// dropped on append.
#[derive(Debug, Clone)]
pub struct CapturedAudio {
    format: AudioFormat,
    chunks: Vec<Vec<u8>>,
}

impl CapturedAudio {
    /// Create an empty chunk sequence for the given format
    pub fn new(format: AudioFormat) -> Self {
        Self {
            format,
            chunks: Vec::new(),
        }
    }

    /// Append a chunk. Zero-length chunks are ignored.
    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        if chunk.is_empty() {
            return;
        }
        self.chunks.push(chunk);
    }

    /// Get the negotiated format
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of chunks captured
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total captured size in bytes
    pub fn total_bytes(&self) -> usize {
        self.chunks.iter().map(|c| c.len()).sum()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.total_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Concatenate the chunks, in arrival order, into one binary object
    pub fn concat(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.total_bytes());
        for chunk in &self.chunks {
            data.extend_from_slice(chunk);
        }
        data
    }

    /// Encode the concatenated chunks as base64. Lossless: decoding the
    /// result yields exactly the concatenated bytes.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(self.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_as_str() {
        assert_eq!(AudioFormat::Flac.as_str(), "audio/flac");
        assert_eq!(AudioFormat::Wav.as_str(), "audio/wav");
    }

    #[test]
    fn format_extension() {
        assert_eq!(AudioFormat::Flac.extension(), "flac");
        assert_eq!(AudioFormat::Wav.extension(), "wav");
    }

    #[test]
    fn preference_starts_with_compressed_format() {
        assert_eq!(AudioFormat::PREFERENCE.first(), Some(&AudioFormat::Flac));
        assert_eq!(AudioFormat::PREFERENCE.last(), Some(&AudioFormat::Wav));
    }

    #[test]
    fn push_ignores_empty_chunks() {
        let mut audio = CapturedAudio::new(AudioFormat::Wav);
        audio.push_chunk(Vec::new());
        audio.push_chunk(vec![1]);
        audio.push_chunk(Vec::new());

        assert_eq!(audio.chunk_count(), 1);
        assert_eq!(audio.total_bytes(), 1);
    }

    #[test]
    fn concat_preserves_arrival_order() {
        let mut audio = CapturedAudio::new(AudioFormat::Flac);
        audio.push_chunk(vec![1, 2]);
        audio.push_chunk(vec![3]);
        audio.push_chunk(vec![4, 5]);

        assert_eq!(audio.concat(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn base64_round_trip_is_lossless() {
        use base64::Engine;

        let mut audio = CapturedAudio::new(AudioFormat::Flac);
        audio.push_chunk(vec![0xDE, 0xAD]);
        audio.push_chunk(vec![0xBE, 0xEF, 0x01]);

        let encoded = audio.to_base64();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&encoded)
            .unwrap();

        assert_eq!(decoded.len(), audio.total_bytes());
        assert_eq!(decoded, audio.concat());
    }

    #[test]
    fn empty_sequence_encodes_to_empty_string() {
        let audio = CapturedAudio::new(AudioFormat::Wav);
        assert!(audio.is_empty());
        assert_eq!(audio.to_base64(), "");
    }

    #[test]
    fn human_readable_size_bytes() {
        let mut audio = CapturedAudio::new(AudioFormat::Wav);
        audio.push_chunk(vec![0u8; 500]);
        assert_eq!(audio.human_readable_size(), "500 B");
    }

    #[test]
    fn human_readable_size_kb() {
        let mut audio = CapturedAudio::new(AudioFormat::Wav);
        audio.push_chunk(vec![0u8; 2048]);
        assert_eq!(audio.human_readable_size(), "2.0 KB");
    }
}
