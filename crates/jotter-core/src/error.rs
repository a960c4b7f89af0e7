//! Error types for jotter-core

use thiserror::Error;

/// Result type alias using jotter-core's Error
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the notes API
#[derive(Error, Debug)]
pub enum ApiError {
    /// An authenticated operation was attempted without a stored token
    #[error("You are not signed in")]
    NoCredential,

    /// The request never reached the server or no response came back
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{message} ({status})")]
    ServerRejected {
        /// HTTP status code
        status: u16,
        /// Message taken from the backend payload
        message: String,
    },

    /// Required-field checks failed before submission
    #[error("{0}")]
    Validation(String),

    /// Client configuration is unusable
    #[error("Invalid client configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Response body could not be decoded
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The credential store failed
    #[error("Credential storage error: {0}")]
    CredentialStorage(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Message shown to the user, using `fallback` when the transport failed.
    ///
    /// Backend rejections surface the backend's own message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(_) => fallback.to_string(),
            Self::ServerRejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
