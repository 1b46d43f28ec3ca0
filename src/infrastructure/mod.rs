//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like cpal, the answer endpoint,
//! rodio, and desktop notifications.

pub mod config;
pub mod notification;
pub mod playback;
pub mod recording;
pub mod transport;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::{DesktopNotifier, NoopNotifier};
pub use playback::{NoopAnswerPlayer, RodioAnswerPlayer};
pub use recording::CpalVoiceRecorder;
pub use transport::HttpAnswerClient;
