//! View controller: the client-side state machine.
//!
//! Holds the active [`View`], the last fetched notes and categories, the
//! form draft and a transient error banner. Every network call in the
//! client goes through [`ViewController::dispatch`] (or the lower-level
//! fetch ticket API for front-ends that run fetches concurrently).
//!
//! Failed operations leave the pre-transition state in place and raise an
//! [`ExpiringMessage`]; successful create/edit submissions always land on
//! `List(All)`.

mod message;
mod view;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

pub use message::{ExpiringMessage, ERROR_TTL};
pub use view::{Dispatch, Intent, View};

use crate::api::NotesBackend;
use crate::error::{ApiError, Result};
use crate::models::{Category, Credentials, Note, NoteDraft, NoteFilter, NoteId};
use crate::session::CredentialStore;

/// Identifies one list fetch; only the most recently issued ticket may
/// replace the displayed notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    filter: NoteFilter,
}

impl FetchTicket {
    pub const fn filter(self) -> NoteFilter {
        self.filter
    }
}

/// Holds `loading` high for the life of one backend call.
///
/// Clears the flag on drop, so a dispatch future cancelled mid-request
/// does not leave the controller gated.
struct LoadingGuard<'a>(&'a mut bool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[derive(Debug, Clone, Copy)]
enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::Login => "Login error occurred",
            Self::Register => "Registration failed",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum NoteAction {
    Delete,
    Archive,
    Unarchive,
}

impl NoteAction {
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::Delete => "Failed to delete note",
            Self::Archive => "Failed to archive note",
            Self::Unarchive => "Failed to unarchive note",
        }
    }
}

const FETCH_NOTES_FALLBACK: &str = "Failed to load notes";
const FETCH_CATEGORIES_FALLBACK: &str = "Failed to load categories";
const SAVE_NOTE_FALLBACK: &str = "Failed to save note";

pub struct ViewController<B: NotesBackend, S: CredentialStore> {
    backend: B,
    store: S,
    view: View,
    notes: Vec<Note>,
    categories: Vec<Category>,
    form: NoteDraft,
    last_filter: NoteFilter,
    loading: bool,
    error: Option<ExpiringMessage>,
    error_ttl: Duration,
    quick_login: Option<Credentials>,
    fetch_generation: u64,
    last_saved: Option<Note>,
}

impl<B: NotesBackend, S: CredentialStore> ViewController<B, S> {
    /// Controller in the initial `Login` view.
    ///
    /// `store` must share storage with the one the backend reads tokens from.
    pub fn new(backend: B, store: S) -> Self {
        Self {
            backend,
            store,
            view: View::Login,
            notes: Vec::new(),
            categories: Vec::new(),
            form: NoteDraft::default(),
            last_filter: NoteFilter::All,
            loading: false,
            error: None,
            error_ttl: ERROR_TTL,
            quick_login: None,
            fetch_generation: 0,
            last_saved: None,
        }
    }

    /// Credentials used by [`Intent::QuickLogin`].
    #[must_use]
    pub fn with_quick_login(mut self, credentials: Credentials) -> Self {
        self.quick_login = Some(credentials);
        self
    }

    #[must_use]
    pub const fn with_error_ttl(mut self, ttl: Duration) -> Self {
        self.error_ttl = ttl;
        self
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub const fn view(&self) -> View {
        self.view
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Current create/edit form contents.
    pub const fn form(&self) -> &NoteDraft {
        &self.form
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The note as returned by the most recent successful create or edit.
    pub const fn last_saved(&self) -> Option<&Note> {
        self.last_saved.as_ref()
    }

    pub const fn has_quick_login(&self) -> bool {
        self.quick_login.is_some()
    }

    pub fn is_signed_in(&self) -> bool {
        self.store.has_token()
    }

    /// Filter a mutation refetch uses: the shown list, else the last one shown.
    pub const fn current_filter(&self) -> NoteFilter {
        match self.view {
            View::List(filter) => filter,
            _ => self.last_filter,
        }
    }

    /// The raw banner, expired or not.
    pub const fn error(&self) -> Option<&ExpiringMessage> {
        self.error.as_ref()
    }

    /// Banner text if it is still visible at `now`.
    pub fn visible_error(&self, now: Instant) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|message| !message.is_expired_at(now))
            .map(ExpiringMessage::text)
    }

    /// Drop the banner once its deadline has passed. Returns true if it was cleared.
    pub fn expire_error(&mut self, now: Instant) -> bool {
        if self
            .error
            .as_ref()
            .is_some_and(|message| message.is_expired_at(now))
        {
            self.error = None;
            return true;
        }
        false
    }

    /// Resume a persisted session: with a stored token, go straight to `List(All)`.
    pub async fn restore(&mut self) -> Dispatch {
        if !self.store.has_token() {
            return Dispatch::Ignored;
        }
        tracing::debug!("Resuming stored session");
        self.enter_signed_in().await;
        Dispatch::Applied
    }

    pub async fn dispatch(&mut self, intent: Intent) -> Dispatch {
        if self.loading && intent.is_mutation() {
            tracing::debug!("Ignoring {:?} while a request is in flight", intent);
            return Dispatch::Ignored;
        }

        match intent {
            Intent::Login(credentials) => self.authenticate(credentials, AuthMode::Login).await,
            Intent::QuickLogin => match self.quick_login.clone() {
                Some(credentials) => self.authenticate(credentials, AuthMode::Login).await,
                None => self.fail(
                    &ApiError::validation("Quick login is not configured"),
                    AuthMode::Login.fallback_message(),
                ),
            },
            Intent::Register(credentials) => {
                self.authenticate(credentials, AuthMode::Register).await
            }
            Intent::Logout => self.logout(),
            Intent::SelectView(view) => self.select_view(view).await,
            Intent::SubmitCreate(draft) => self.submit(None, draft).await,
            Intent::SubmitEdit(id, draft) => self.submit(Some(id), draft).await,
            Intent::EditNote(id) => self.edit_note(id).await,
            Intent::Delete(id) => self.note_action(id, NoteAction::Delete).await,
            Intent::Archive(id) => self.note_action(id, NoteAction::Archive).await,
            Intent::Unarchive(id) => self.note_action(id, NoteAction::Unarchive).await,
            Intent::DismissError => {
                if self.error.take().is_some() {
                    Dispatch::Applied
                } else {
                    Dispatch::Ignored
                }
            }
        }
    }

    /// Start a list fetch. Any earlier outstanding ticket becomes stale.
    pub fn begin_list_fetch(&mut self, filter: NoteFilter) -> FetchTicket {
        self.fetch_generation += 1;
        FetchTicket {
            generation: self.fetch_generation,
            filter,
        }
    }

    /// Install the result of a fetch if its ticket is still the latest.
    ///
    /// A current ticket replaces the whole note collection and shows the
    /// ticket's list view. Stale tickets are discarded and return false.
    pub fn apply_list_fetch(&mut self, ticket: FetchTicket, notes: Vec<Note>) -> bool {
        if ticket.generation != self.fetch_generation {
            tracing::warn!(
                "Discarding stale {} fetch (generation {}, current {})",
                ticket.filter,
                ticket.generation,
                self.fetch_generation
            );
            return false;
        }
        self.notes = notes;
        self.last_filter = ticket.filter;
        self.view = View::List(ticket.filter);
        true
    }

    async fn authenticate(&mut self, credentials: Credentials, mode: AuthMode) -> Dispatch {
        if self.view.requires_session() {
            tracing::debug!("Already signed in; ignoring {:?}", mode);
            return Dispatch::Ignored;
        }
        let credentials = match credentials.validated() {
            Ok(credentials) => credentials,
            Err(error) => return self.fail(&error, mode.fallback_message()),
        };

        let result = {
            let _loading = LoadingGuard::raise(&mut self.loading);
            match mode {
                AuthMode::Login => self.backend.authenticate(&credentials).await,
                AuthMode::Register => self.backend.register(&credentials).await,
            }
        };

        let token = match result {
            Ok(token) => token,
            Err(error) => return self.fail(&error, mode.fallback_message()),
        };
        if let Err(error) = self.store.save_token(&token) {
            return self.fail(&error, mode.fallback_message());
        }

        tracing::info!("Signed in as {}", credentials.username);
        self.error = None;
        self.enter_signed_in().await;
        Dispatch::Applied
    }

    async fn enter_signed_in(&mut self) {
        self.form = NoteDraft::default();
        self.notes.clear();
        self.view = View::List(NoteFilter::All);
        if let Err(error) = self.fetch_list(NoteFilter::All).await {
            self.surface(&error, FETCH_NOTES_FALLBACK);
        }
        if let Err(error) = self.load_categories().await {
            self.surface(&error, FETCH_CATEGORIES_FALLBACK);
        }
    }

    fn logout(&mut self) -> Dispatch {
        if let Err(error) = self.store.clear_token() {
            tracing::warn!("Failed to clear stored token: {}", error);
        }
        tracing::info!("Signed out");
        self.fetch_generation += 1;
        self.view = View::Login;
        self.notes.clear();
        self.categories.clear();
        self.form = NoteDraft::default();
        self.last_filter = NoteFilter::All;
        self.loading = false;
        self.last_saved = None;
        self.error = None;
        Dispatch::Applied
    }

    async fn select_view(&mut self, view: View) -> Dispatch {
        match view {
            View::Login | View::Register => {
                if self.view.requires_session() {
                    tracing::debug!("Sign out before switching to {:?}", view);
                    return Dispatch::Ignored;
                }
                self.view = view;
                Dispatch::Applied
            }
            View::List(filter) => match self.fetch_list(filter).await {
                Ok(()) => Dispatch::Applied,
                Err(error) => self.fail(&error, FETCH_NOTES_FALLBACK),
            },
            View::CreateForm => {
                if !self.store.has_token() {
                    return self.fail(&ApiError::NoCredential, SAVE_NOTE_FALLBACK);
                }
                self.show(View::CreateForm);
                self.form = NoteDraft::default();
                if let Err(error) = self.load_categories().await {
                    self.surface(&error, FETCH_CATEGORIES_FALLBACK);
                }
                Dispatch::Applied
            }
            View::EditForm(id) => self.edit_note(id).await,
        }
    }

    async fn edit_note(&mut self, id: NoteId) -> Dispatch {
        if !self.store.has_token() {
            return self.fail(&ApiError::NoCredential, SAVE_NOTE_FALLBACK);
        }
        let Some(draft) = self.note(id).map(NoteDraft::from_note) else {
            return self.fail(
                &ApiError::validation(format!("Note {id} is not loaded")),
                SAVE_NOTE_FALLBACK,
            );
        };

        self.form = draft;
        self.show(View::EditForm(id));
        if let Err(error) = self.load_categories().await {
            self.surface(&error, FETCH_CATEGORIES_FALLBACK);
        }
        Dispatch::Applied
    }

    async fn submit(&mut self, target: Option<NoteId>, draft: NoteDraft) -> Dispatch {
        self.form = draft;
        let draft = match self.form.validated() {
            Ok(draft) => draft,
            Err(error) => return self.fail(&error, SAVE_NOTE_FALLBACK),
        };

        let result = {
            let _loading = LoadingGuard::raise(&mut self.loading);
            match target {
                None => self.backend.create_note(&draft).await,
                Some(id) => self.backend.update_note(id, &draft).await,
            }
        };

        match result {
            Ok(note) => {
                tracing::info!("Saved note {}", note.id);
                self.last_saved = Some(note);
                self.form = NoteDraft::default();
                self.refresh_after_mutation(NoteFilter::All).await;
                Dispatch::Applied
            }
            Err(error) => self.fail(&error, SAVE_NOTE_FALLBACK),
        }
    }

    async fn note_action(&mut self, id: NoteId, action: NoteAction) -> Dispatch {
        let result = {
            let _loading = LoadingGuard::raise(&mut self.loading);
            match action {
                NoteAction::Delete => self.backend.delete_note(id).await,
                NoteAction::Archive => self.backend.archive_note(id).await,
                NoteAction::Unarchive => self.backend.unarchive_note(id).await,
            }
        };

        match result {
            Ok(()) => {
                tracing::info!("{:?} note {}", action, id);
                self.refresh_after_mutation(self.current_filter()).await;
                Dispatch::Applied
            }
            Err(error) => self.fail(&error, action.fallback_message()),
        }
    }

    /// After a successful mutation the list view is shown even if the refetch fails.
    async fn refresh_after_mutation(&mut self, filter: NoteFilter) {
        if let Err(error) = self.fetch_list(filter).await {
            if self.last_filter != filter {
                self.notes.clear();
            }
            self.last_filter = filter;
            self.view = View::List(filter);
            self.surface(&error, FETCH_NOTES_FALLBACK);
        }
    }

    async fn fetch_list(&mut self, filter: NoteFilter) -> Result<()> {
        let ticket = self.begin_list_fetch(filter);
        let notes = {
            let _loading = LoadingGuard::raise(&mut self.loading);
            self.backend.list_notes(filter).await?
        };
        tracing::debug!("Fetched {} {} notes", notes.len(), filter);
        self.apply_list_fetch(ticket, notes);
        Ok(())
    }

    async fn load_categories(&mut self) -> Result<()> {
        let categories = {
            let _loading = LoadingGuard::raise(&mut self.loading);
            self.backend.list_categories().await?
        };
        self.categories = categories;
        Ok(())
    }

    /// Switch to a non-list view, invalidating outstanding list fetches.
    fn show(&mut self, view: View) {
        self.fetch_generation += 1;
        self.view = view;
    }

    fn surface(&mut self, error: &ApiError, fallback: &str) {
        tracing::warn!("{}", error);
        self.error = Some(ExpiringMessage::new(
            error.user_message(fallback),
            Instant::now(),
            self.error_ttl,
        ));
    }

    fn fail(&mut self, error: &ApiError, fallback: &str) -> Dispatch {
        self.surface(error, fallback);
        Dispatch::Failed
    }
}
