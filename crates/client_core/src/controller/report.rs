use std::sync::Arc;

use chrono::Utc;
use shared::protocol::ReportResult;
use tracing::{debug, info, warn};

use crate::{
    controller::{
        events::{UiError, UiErrorCategory, UiErrorContext},
        form,
        validator::validate_scores,
    },
    session::Session,
    view::{OutputArea, ReportHeader, SharedView},
    AssessmentBackend, ClientError,
};

pub const FAILURE_PREFIX: &str = "エラーが発生しました: ";
pub const SERVER_ERROR_PREFIX: &str = "サーバーエラー: ";

/// Lifecycle of the report workflow. The rendered states are resting states: controls
/// are enabled again and the next generate or reset moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    RenderedSuccess,
    RenderedError,
}

pub struct ReportController {
    backend: Arc<dyn AssessmentBackend>,
    view: SharedView,
    session: Session,
}

impl ReportController {
    pub fn new(backend: Arc<dyn AssessmentBackend>, view: SharedView, session: Session) -> Self {
        Self {
            backend,
            view,
            session,
        }
    }

    pub async fn generate(&self) -> Result<(), UiError> {
        let scores = {
            let mut view = self.view.lock().await;
            let resting_phase = view.report_phase;
            view.report_phase = ReportPhase::Validating;
            let scores = view.score_entry();
            if let Err(error) = validate_scores(&scores) {
                debug!(%error, "score validation blocked submission");
                view.notify(error.notice());
                view.report_phase = resting_phase;
                return Err(UiError::validation(UiErrorContext::GenerateReport, error));
            }

            view.generate_enabled = false;
            view.reset_enabled = false;
            view.loading_visible = true;
            view.output = OutputArea::Empty;
            view.header = None;
            view.admin_area_visible = false;
            view.report_phase = ReportPhase::Submitting;
            scores
        };

        let outcome = match self.backend.generate_report(&scores).await {
            Ok(ReportResult {
                error: Some(message),
                ..
            }) if !message.is_empty() => Err(failure(UiErrorCategory::Application, &message)),
            Ok(report) => Ok(report),
            Err(ClientError::Status { status, .. }) => Err(failure(
                UiErrorCategory::Application,
                &format!("{SERVER_ERROR_PREFIX}{status}"),
            )),
            Err(error) => Err(failure(UiError::category_of(&error), &error.to_string())),
        };

        let mut view = self.view.lock().await;
        let result = match outcome {
            Ok(report) => {
                view.header = Some(ReportHeader::build(
                    &scores,
                    &report.chart_url,
                    Utc::now().timestamp_millis(),
                ));
                view.output = OutputArea::Narrative(report.report);
                view.sources = report.sources;
                if self.session.is_elevated() {
                    view.admin_area_visible = true;
                }
                view.report_phase = ReportPhase::RenderedSuccess;
                info!(sources = view.sources.len(), "report rendered");
                Ok(())
            }
            Err(error) => {
                warn!(
                    category = ?error.category(),
                    context = ?error.context(),
                    reason = error.message(),
                    "report generation failed"
                );
                view.output = OutputArea::Text(error.message().to_string());
                view.report_phase = ReportPhase::RenderedError;
                Err(error)
            }
        };
        view.generate_enabled = true;
        view.reset_enabled = true;
        view.loading_visible = false;
        result
    }

    /// Empties the inputs and the rendered report. Session mode, control state and the
    /// source list are left alone.
    pub async fn reset(&self) {
        let mut view = self.view.lock().await;
        form::clear_score_inputs(&mut view);
        view.header = None;
        view.output = OutputArea::Empty;
        view.admin_area_visible = false;
        view.report_phase = ReportPhase::Idle;
        debug!("report view reset");
    }

    pub async fn phase(&self) -> ReportPhase {
        self.view.lock().await.report_phase
    }
}

fn failure(category: UiErrorCategory, message: &str) -> UiError {
    UiError::new(
        category,
        UiErrorContext::GenerateReport,
        format!("{FAILURE_PREFIX}{message}"),
    )
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
