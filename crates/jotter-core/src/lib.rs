//! jotter-core - Core library for Jotter
//!
//! This crate contains the note models, the HTTP client for the notes API,
//! the credential store abstraction and the view controller state machine
//! shared by Jotter front-ends.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod session;
pub mod util;

pub use api::{NotesApiClient, NotesBackend};
pub use config::{ApiRoutes, ClientConfig};
pub use controller::{Dispatch, Intent, View, ViewController};
pub use error::{ApiError, Result};
pub use models::{Category, CategoryId, Credentials, Note, NoteDraft, NoteFilter, NoteId};
pub use session::{AuthToken, CredentialStore, MemoryCredentialStore};
