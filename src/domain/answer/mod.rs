//! Answer domain module

mod answer_payload;

pub use answer_payload::{AnswerPayload, IncompleteAnswer};
