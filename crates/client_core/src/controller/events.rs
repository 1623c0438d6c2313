//! Failure modeling for the controller layer.

use shared::error::ValidationError;

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// The authentication collaborator refused the credential.
    CredentialRejected,
    /// Network failure or an unreadable response.
    Transport,
    /// A collaborator answered with a structured error.
    Application,
    /// Local input check failed; nothing was sent.
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Login,
    GenerateReport,
    SubmitFeedback,
}

/// A failure already converted to the text the user sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn validation(context: UiErrorContext, error: ValidationError) -> Self {
        Self::new(UiErrorCategory::Validation, context, error.notice())
    }

    /// Non-2xx statuses are application errors; everything else the client reports is
    /// transport.
    pub fn category_of(error: &ClientError) -> UiErrorCategory {
        match error {
            ClientError::Status { .. } => UiErrorCategory::Application,
            ClientError::InvalidUrl(_) | ClientError::Transport(_) | ClientError::Decode(_) => {
                UiErrorCategory::Transport
            }
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for UiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for UiError {}
