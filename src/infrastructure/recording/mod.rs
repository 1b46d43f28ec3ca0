//! Recording adapters

mod cpal_recorder;
mod encode;

pub use cpal_recorder::CpalVoiceRecorder;
pub use encode::{encode_take, negotiate_format, EncodeError};
