//! Controller layer: one controller per page workflow, all mutating a shared view model.

pub mod auth;
pub mod events;
pub mod feedback;
pub mod form;
pub mod report;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use crate::{session::Session, view::SharedView, AssessmentBackend};

use self::{auth::AuthController, feedback::FeedbackController, report::ReportController};

/// Everything one page needs: the view, the session and the three controllers wired to
/// the same backend.
pub struct AssessmentApp {
    pub view: SharedView,
    pub session: Session,
    pub auth: AuthController,
    pub report: ReportController,
    pub feedback: FeedbackController,
}

impl AssessmentApp {
    /// Builds the score form; call once per page.
    pub async fn start(backend: Arc<dyn AssessmentBackend>) -> Self {
        let view = crate::view::shared_view();
        let session = Session::new();
        form::build_score_form(&mut *view.lock().await);

        Self {
            auth: AuthController::new(Arc::clone(&backend), view.clone(), session.clone()),
            report: ReportController::new(Arc::clone(&backend), view.clone(), session.clone()),
            feedback: FeedbackController::new(backend, view.clone()),
            view,
            session,
        }
    }
}
