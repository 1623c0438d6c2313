use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::ScoreEntry,
    protocol::{
        ErrorBody, FeedbackEntry, FeedbackResponse, LoginRequest, LoginResponse, ReportResult,
        GENERATE_REPORT_ROUTE, LOGIN_ROUTE, SUBMIT_FEEDBACK_ROUTE,
    },
};
use thiserror::Error;
use tracing::debug;
use url::Url;

pub mod controller;
pub mod session;
pub mod view;

pub use controller::{
    auth::AuthController, feedback::FeedbackController, report::ReportController, AssessmentApp,
};
pub use session::Session;
pub use view::{shared_view, SharedView, ViewState};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected status {status}")]
    Status { status: u16, error: Option<String> },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

/// The three collaborators the controllers talk to.
///
/// `authenticate` answers with the parsed body whatever the status: a rejected password
/// comes back as a 401 carrying `{"success": false}`.
#[async_trait]
pub trait AssessmentBackend: Send + Sync {
    async fn authenticate(&self, password: &str) -> Result<LoginResponse, ClientError>;
    async fn generate_report(&self, scores: &ScoreEntry) -> Result<ReportResult, ClientError>;
    async fn submit_feedback(
        &self,
        entry: &FeedbackEntry,
    ) -> Result<FeedbackResponse, ClientError>;
}

pub struct HttpAssessmentClient {
    http: Client,
    base_url: Url,
}

impl HttpAssessmentClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(server_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(server_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(route)?)
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        let url = self.endpoint(route)?;
        debug!(%url, "sending collaborator request");
        Ok(self.http.post(url).json(body).send().await?)
    }
}

/// Endpoints are relative, so the base needs a trailing slash for `Url::join` to keep
/// any path prefix.
fn normalize_base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl AssessmentBackend for HttpAssessmentClient {
    async fn authenticate(&self, password: &str) -> Result<LoginResponse, ClientError> {
        let response = self
            .post(
                LOGIN_ROUTE,
                &LoginRequest {
                    password: password.to_string(),
                },
            )
            .await?;
        decode_body(response).await
    }

    async fn generate_report(&self, scores: &ScoreEntry) -> Result<ReportResult, ClientError> {
        let response = self.post(GENERATE_REPORT_ROUTE, scores).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                error: None,
            });
        }
        decode_body(response).await
    }

    async fn submit_feedback(
        &self,
        entry: &FeedbackEntry,
    ) -> Result<FeedbackResponse, ClientError> {
        let response = self.post(SUBMIT_FEEDBACK_ROUTE, entry).await?;
        let status = response.status();
        if !status.is_success() {
            let body: ErrorBody = decode_body(response).await?;
            return Err(ClientError::Status {
                status: status.as_u16(),
                error: body.error,
            });
        }
        decode_body(response).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
