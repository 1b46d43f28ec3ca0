//! Recording session domain module

mod recording_session;

pub use recording_session::{InvalidPhaseTransition, RecordingSession, SessionPhase};
