use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Api(#[from] jotter_core::ApiError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    Ignored(String),
    #[error("Profile '{0}' is not signed in. Run `jotter login` first.")]
    NotSignedIn(String),
    #[error("No note content provided")]
    EmptyContent,
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(String),
    #[error("Editor command failed: {0}")]
    EditorFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "No API base URL configured. Run `jotter config init --api-url <URL>` or set JOTTER_API_URL."
    )]
    ApiNotConfigured,
}
