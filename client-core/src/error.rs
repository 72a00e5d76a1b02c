use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(anyhow::Error),

    #[error("Conflict: {0}")]
    Conflict(anyhow::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::BadRequest(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Internal(anyhow::Error::new(err))
    }
}

impl ClientError {
    /// Whether retrying the same call could succeed without user input.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(err) => err.is_timeout() || err.is_connect(),
            ClientError::Service { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Short, user-facing message. Internal details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::Validation(_) | ClientError::BadRequest(_) => {
                "Please check the entered information."
            }
            ClientError::Unauthorized(_) => "Your session is no longer valid. Please sign in.",
            ClientError::Conflict(_) => "This action is already in progress.",
            ClientError::Network(_) => "Unable to reach the server. Check your connection.",
            ClientError::Service { .. } | ClientError::Config(_) | ClientError::Internal(_) => {
                "Something went wrong. Please try again later."
            }
        }
    }
}
