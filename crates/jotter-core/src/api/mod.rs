//! API gateway: the typed operations the view controller can trigger.

mod client;

pub use client::NotesApiClient;

use crate::error::Result;
use crate::models::{Category, Credentials, Note, NoteDraft, NoteFilter, NoteId};
use crate::session::AuthToken;

/// Remote notes service as seen by the view controller.
///
/// Every call is a single attempt with no retries. Note and category
/// operations fail with [`crate::ApiError::NoCredential`] before issuing a
/// request when no token is stored.
#[allow(async_fn_in_trait)]
pub trait NotesBackend {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken>;
    async fn register(&self, credentials: &Credentials) -> Result<AuthToken>;
    async fn list_notes(&self, filter: NoteFilter) -> Result<Vec<Note>>;
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn create_note(&self, draft: &NoteDraft) -> Result<Note>;
    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<Note>;
    async fn delete_note(&self, id: NoteId) -> Result<()>;
    async fn archive_note(&self, id: NoteId) -> Result<()>;
    async fn unarchive_note(&self, id: NoteId) -> Result<()>;
}

/// Relative path of a single note resource.
pub fn note_path(id: NoteId) -> String {
    format!("/api/notes/{id}")
}

pub fn archive_path(id: NoteId) -> String {
    format!("/api/notes/{id}/archive")
}

pub fn unarchive_path(id: NoteId) -> String {
    format!("/api/notes/{id}/unarchive")
}

pub const CATEGORIES_PATH: &str = "/api/categories";
