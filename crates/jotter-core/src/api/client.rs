//! reqwest-backed implementation of [`NotesBackend`].

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{archive_path, note_path, unarchive_path, NotesBackend, CATEGORIES_PATH};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::models::{Category, Credentials, Note, NoteDraft, NoteFilter, NoteId};
use crate::session::{AuthToken, CredentialStore};
use crate::util::compact_text;

/// HTTP client for the notes API.
///
/// The credential store is injected so tests and alternative front-ends can
/// swap persistence without touching request code.
#[derive(Debug, Clone)]
pub struct NotesApiClient<S: CredentialStore> {
    config: ClientConfig,
    client: Client,
    store: S,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

impl<S: CredentialStore> NotesApiClient<S> {
    pub fn new(config: ClientConfig, store: S) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            config,
            client,
            store,
        })
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    fn public_request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        self.client
            .request(method, self.config.url(path))
            .header("Accept", "application/json")
    }

    fn authorized_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.store.load_token()?.ok_or(ApiError::NoCredential)?;
        Ok(self.public_request(method, path).bearer_auth(token.expose()))
    }

    async fn exchange_credentials(&self, path: &str, credentials: &Credentials) -> Result<AuthToken> {
        let credentials = credentials.validated()?;
        let request = self.public_request(Method::POST, path).json(&credentials);
        let payload: AuthResponse = send_json(request).await?;
        if payload.token.trim().is_empty() {
            return Err(ApiError::ServerRejected {
                status: StatusCode::OK.as_u16(),
                message: "Auth response did not include a token".to_string(),
            });
        }
        Ok(AuthToken::new(payload.token))
    }
}

impl<S: CredentialStore> NotesBackend for NotesApiClient<S> {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken> {
        self.exchange_credentials(&self.config.routes.auth, credentials)
            .await
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthToken> {
        self.exchange_credentials(&self.config.routes.register, credentials)
            .await
    }

    async fn list_notes(&self, filter: NoteFilter) -> Result<Vec<Note>> {
        let request = self.authorized_request(Method::GET, filter.path())?;
        send_json(request).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let request = self.authorized_request(Method::GET, CATEGORIES_PATH)?;
        send_json(request).await
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        let draft = draft.validated()?;
        let request = self
            .authorized_request(Method::POST, &self.config.routes.create_note)?
            .json(&draft);
        send_json(request).await
    }

    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<Note> {
        let draft = draft.validated()?;
        let request = self
            .authorized_request(Method::PUT, &note_path(id))?
            .json(&draft);
        send_json(request).await
    }

    async fn delete_note(&self, id: NoteId) -> Result<()> {
        let request = self.authorized_request(Method::DELETE, &note_path(id))?;
        send(request).await.map(drop)
    }

    async fn archive_note(&self, id: NoteId) -> Result<()> {
        let request = self.authorized_request(Method::PUT, &archive_path(id))?;
        send(request).await.map(drop)
    }

    async fn unarchive_note(&self, id: NoteId) -> Result<()> {
        let request = self.authorized_request(Method::PUT, &unarchive_path(id))?;
        send(request).await.map(drop)
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Request rejected with HTTP {}", status.as_u16());
    Err(ApiError::ServerRejected {
        status: status.as_u16(),
        message: parse_api_error(status, &body),
    })
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = send(request).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Extract a human-readable message from an error payload.
///
/// Backends answer with a JSON object, a bare JSON string, or plain text.
fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value {
            serde_json::Value::String(message) if !message.trim().is_empty() => {
                return compact_text(&message);
            }
            serde_json::Value::Object(fields) => {
                let message = ["message", "error", "msg", "detail"]
                    .iter()
                    .find_map(|key| fields.get(*key).and_then(serde_json::Value::as_str))
                    .filter(|message| !message.trim().is_empty());
                if let Some(message) = message {
                    return compact_text(message);
                }
            }
            _ => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        compact_text(trimmed)
    }
}
