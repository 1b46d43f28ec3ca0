//! Captured audio domain module

mod captured_audio;

pub use captured_audio::{AudioFormat, CapturedAudio};
