use thiserror::Error;

/// Reasons a single notification could not be delivered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotifyError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Failed to render email template: {0}")]
    Render(String),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build email: {0}")]
    Message(String),

    #[error("SMTP authentication failed: {0}")]
    AuthFailure(String),

    #[error("SMTP connection failed: {0}")]
    ConnectionFailure(String),

    #[error("SMTP server rejected the message: {0}")]
    Rejected(String),
}

impl NotifyError {
    /// Stable label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NotifyError::TemplateNotFound(_) => "template_not_found",
            NotifyError::Render(_) => "render",
            NotifyError::InvalidAddress(_) => "invalid_address",
            NotifyError::Message(_) => "message",
            NotifyError::AuthFailure(_) => "auth_failure",
            NotifyError::ConnectionFailure(_) => "connection_failure",
            NotifyError::Rejected(_) => "rejected",
        }
    }
}
