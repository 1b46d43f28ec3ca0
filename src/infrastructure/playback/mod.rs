//! Answer playback adapters

mod noop;
mod rodio_player;

pub use noop::NoopAnswerPlayer;
pub use rodio_player::RodioAnswerPlayer;
