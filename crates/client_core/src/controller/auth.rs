use std::sync::Arc;

use shared::domain::SessionMode;
use tracing::{info, warn};

use crate::{
    controller::{
        events::{UiError, UiErrorCategory, UiErrorContext},
        form,
    },
    session::Session,
    view::{SharedView, ViewState},
    AssessmentBackend,
};

pub const INCORRECT_PASSWORD: &str = "パスワードが間違っています。";
pub const AUTHENTICATION_FAILED: &str = "認証中にエラーが発生しました。";

pub struct AuthController {
    backend: Arc<dyn AssessmentBackend>,
    view: SharedView,
    session: Session,
}

impl AuthController {
    pub fn new(backend: Arc<dyn AssessmentBackend>, view: SharedView, session: Session) -> Self {
        Self {
            backend,
            view,
            session,
        }
    }

    /// Submits the password. The login button stays disabled until the collaborator
    /// answers, and is re-enabled on every outcome.
    pub async fn login(&self, password: &str) -> Result<SessionMode, UiError> {
        {
            let mut view = self.view.lock().await;
            view.login_button_enabled = false;
            view.login_error.clear();
        }

        let outcome = match self.backend.authenticate(password).await {
            Ok(response) if response.success => {
                let mode = SessionMode::from_role(response.role.as_deref());
                self.session.establish(mode);
                info!(?mode, "login accepted");
                Ok(mode)
            }
            Ok(_) => {
                info!("login rejected");
                Err(UiError::new(
                    UiErrorCategory::CredentialRejected,
                    UiErrorContext::Login,
                    INCORRECT_PASSWORD,
                ))
            }
            Err(error) => {
                warn!(%error, "authentication request failed");
                Err(UiError::new(
                    UiErrorCategory::Transport,
                    UiErrorContext::Login,
                    AUTHENTICATION_FAILED,
                ))
            }
        };

        let mut view = self.view.lock().await;
        match &outcome {
            Ok(_) => {
                view.login_screen_visible = false;
                view.main_screen_visible = true;
            }
            Err(error) => view.login_error = error.message().to_string(),
        }
        view.login_button_enabled = true;
        outcome
    }

    /// Returns the page to the state it had before login.
    pub async fn logout(&self) {
        self.session.end();
        let mut view = self.view.lock().await;
        // Hide timers from before the logout must not match a later confirmation.
        let confirmation_seq = view.confirmation_seq;
        *view = ViewState::default();
        view.confirmation_seq = confirmation_seq;
        form::build_score_form(&mut view);
        info!("logged out");
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
