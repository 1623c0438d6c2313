use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use shared::{
    domain::{ScoreEntry, INDICATORS},
    protocol::{FeedbackEntry, FeedbackResponse, LoginResponse, ReportResult},
};

use crate::{view::SharedView, AssessmentApp, AssessmentBackend, ClientError, ViewState};

#[derive(Debug, Clone)]
pub(crate) enum Reply<T> {
    Body(T),
    Status(u16, Option<String>),
    Garbled,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self) -> Result<T, ClientError> {
        match self {
            Self::Body(body) => Ok(body.clone()),
            Self::Status(status, error) => Err(ClientError::Status {
                status: *status,
                error: error.clone(),
            }),
            Self::Garbled => Err(ClientError::Decode(
                serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            )),
        }
    }
}

/// Scripted collaborator that records what it was sent and what the page looked like
/// while each request was in flight.
pub(crate) struct FakeBackend {
    login: Mutex<Reply<LoginResponse>>,
    report: Mutex<Reply<ReportResult>>,
    feedback: Mutex<Reply<FeedbackResponse>>,
    pub passwords: Mutex<Vec<String>>,
    pub scores: Mutex<Vec<ScoreEntry>>,
    pub feedback_entries: Mutex<Vec<FeedbackEntry>>,
    pub in_flight: Mutex<Vec<ViewState>>,
    observed: OnceLock<SharedView>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            login: Mutex::new(Reply::Body(LoginResponse {
                success: true,
                role: Some("user".into()),
            })),
            report: Mutex::new(Reply::Body(ReportResult::default())),
            feedback: Mutex::new(Reply::Body(FeedbackResponse {
                success: true,
                message: Some("ok".into()),
                error: None,
            })),
            passwords: Mutex::new(Vec::new()),
            scores: Mutex::new(Vec::new()),
            feedback_entries: Mutex::new(Vec::new()),
            in_flight: Mutex::new(Vec::new()),
            observed: OnceLock::new(),
        }
    }

    pub fn reply_login(&self, reply: Reply<LoginResponse>) {
        *self.login.lock().unwrap() = reply;
    }

    pub fn reply_report(&self, reply: Reply<ReportResult>) {
        *self.report.lock().unwrap() = reply;
    }

    pub fn reply_feedback(&self, reply: Reply<FeedbackResponse>) {
        *self.feedback.lock().unwrap() = reply;
    }

    pub fn observe(&self, view: SharedView) {
        let _ = self.observed.set(view);
    }

    async fn snapshot(&self) {
        if let Some(view) = self.observed.get() {
            let snapshot = view.lock().await.clone();
            self.in_flight.lock().unwrap().push(snapshot);
        }
    }
}

#[async_trait]
impl AssessmentBackend for FakeBackend {
    async fn authenticate(&self, password: &str) -> Result<LoginResponse, ClientError> {
        self.passwords.lock().unwrap().push(password.to_string());
        self.snapshot().await;
        let reply = self.login.lock().unwrap().clone();
        reply.resolve()
    }

    async fn generate_report(&self, scores: &ScoreEntry) -> Result<ReportResult, ClientError> {
        self.scores.lock().unwrap().push(scores.clone());
        self.snapshot().await;
        let reply = self.report.lock().unwrap().clone();
        reply.resolve()
    }

    async fn submit_feedback(
        &self,
        entry: &FeedbackEntry,
    ) -> Result<FeedbackResponse, ClientError> {
        self.feedback_entries.lock().unwrap().push(entry.clone());
        self.snapshot().await;
        let reply = self.feedback.lock().unwrap().clone();
        reply.resolve()
    }
}

pub(crate) async fn start_app(backend: &Arc<FakeBackend>) -> AssessmentApp {
    let app = AssessmentApp::start(Arc::clone(backend) as Arc<dyn AssessmentBackend>).await;
    backend.observe(app.view.clone());
    app
}

pub(crate) async fn fill_scores(app: &AssessmentApp, raw: &str) {
    let mut view = app.view.lock().await;
    for indicator in INDICATORS {
        view.set_score(indicator, raw);
    }
}

pub(crate) fn sample_report() -> ReportResult {
    ReportResult {
        report: "<p>OK</p>".into(),
        chart_url: "/c.png".into(),
        sources: vec!["KB1".into(), "KB2".into()],
        error: None,
    }
}
