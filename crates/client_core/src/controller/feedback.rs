use std::{sync::Arc, time::Duration};

use shared::protocol::FeedbackEntry;
use tokio::{task::JoinHandle, time::Instant};
use tracing::{info, warn};

use crate::{
    controller::events::{UiError, UiErrorCategory, UiErrorContext},
    view::{SharedView, ViewState},
    AssessmentBackend, ClientError,
};

pub const CONFIRMATION_DISPLAY: Duration = Duration::from_millis(3000);
pub const SUBMIT_FAILED_PREFIX: &str = "フィードバックの送信に失敗しました: ";
pub const REJECTED_PREFIX: &str = "エラー: ";
pub const UNKNOWN_ERROR: &str = "不明なエラー";
pub const SOURCE_SEPARATOR: &str = ", ";

pub struct FeedbackController {
    backend: Arc<dyn AssessmentBackend>,
    view: SharedView,
}

impl FeedbackController {
    pub fn new(backend: Arc<dyn AssessmentBackend>, view: SharedView) -> Self {
        Self { backend, view }
    }

    /// Sends the rating, comment and the report currently on screen.
    ///
    /// On success the confirmation is hidden again by a background timer; its handle
    /// is returned so callers can wait for it.
    pub async fn submit(&self) -> Result<JoinHandle<()>, UiError> {
        let entry = self.view.lock().await.feedback_entry();

        let outcome = match self.backend.submit_feedback(&entry).await {
            Ok(response) if response.success => Ok(response.message.unwrap_or_default()),
            Ok(response) => Err(UiError::new(
                UiErrorCategory::Application,
                UiErrorContext::SubmitFeedback,
                format!("{REJECTED_PREFIX}{}", response.error.unwrap_or_default()),
            )),
            Err(ClientError::Status { error, .. }) => Err(UiError::new(
                UiErrorCategory::Application,
                UiErrorContext::SubmitFeedback,
                format!(
                    "{SUBMIT_FAILED_PREFIX}{}",
                    error
                        .filter(|message| !message.is_empty())
                        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
                ),
            )),
            Err(error) => Err(UiError::new(
                UiError::category_of(&error),
                UiErrorContext::SubmitFeedback,
                format!("{SUBMIT_FAILED_PREFIX}{error}"),
            )),
        };

        let mut view = self.view.lock().await;
        match outcome {
            Ok(message) => {
                view.confirmation_seq += 1;
                let seq = view.confirmation_seq;
                view.feedback_confirmation = Some(message);
                view.feedback_comment.clear();
                view.feedback_rating.take();
                info!(rating = %entry.rating, "feedback recorded");
                Ok(self.schedule_hide(seq))
            }
            Err(error) => {
                warn!(
                    category = ?error.category(),
                    context = ?error.context(),
                    reason = error.message(),
                    "feedback submission failed"
                );
                view.notify(error.message());
                Err(error)
            }
        }
    }

    fn schedule_hide(&self, seq: u64) -> JoinHandle<()> {
        let view = Arc::clone(&self.view);
        let deadline = Instant::now() + CONFIRMATION_DISPLAY;
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut view = view.lock().await;
            if view.confirmation_seq == seq {
                view.feedback_confirmation = None;
            }
        })
    }
}

impl ViewState {
    /// The feedback payload as the page currently shows it.
    pub fn feedback_entry(&self) -> FeedbackEntry {
        FeedbackEntry {
            report: self.output.rendered_html(),
            rating: self
                .feedback_rating
                .map(|rating| rating.value().to_string())
                .unwrap_or_default(),
            comment: self.feedback_comment.clone(),
            sources: self.sources.join(SOURCE_SEPARATOR),
        }
    }
}

#[cfg(test)]
#[path = "tests/feedback_tests.rs"]
mod tests;
