//! Presentation port interface

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::answer::AnswerPayload;
use crate::domain::status::UiStatus;

/// Port for rendering machine state to the user.
///
/// Only one status is visible at a time: `status` replaces the previous
/// message, it never appends. Only validated answers reach `answer`.
#[async_trait]
pub trait StatusPresenter: Send + Sync {
    /// Render the current status, replacing the previous one
    async fn status(&self, status: &UiStatus);

    /// Render a validated answer: transcript text plus the audio reference
    async fn answer(&self, answer: &AnswerPayload);
}

/// Blanket implementation for shared presenter handles
#[async_trait]
impl<T: StatusPresenter + ?Sized> StatusPresenter for Arc<T> {
    async fn status(&self, status: &UiStatus) {
        self.as_ref().status(status).await;
    }

    async fn answer(&self, answer: &AnswerPayload) {
        self.as_ref().answer(answer).await;
    }
}
