use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use super::*;
use crate::models::CategoryId;
use crate::session::{AuthToken, MemoryCredentialStore};

#[derive(Default)]
struct FakeState {
    users: HashMap<String, String>,
    notes: Vec<Note>,
    categories: Vec<Category>,
    next_id: i64,
    calls: Vec<&'static str>,
    reject_next: Option<(&'static str, u16, String)>,
    stall_next: Option<&'static str>,
}

/// In-memory notes service honoring the same token gate as the HTTP client.
#[derive(Clone)]
struct FakeBackend {
    store: MemoryCredentialStore,
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    fn new(store: MemoryCredentialStore) -> Self {
        let mut state = FakeState {
            next_id: 1,
            ..FakeState::default()
        };
        state
            .users
            .insert("ada".to_string(), "correct horse".to_string());
        Self {
            store,
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn reject_next(&self, operation: &'static str, status: u16, message: &str) {
        self.state.lock().unwrap().reject_next = Some((operation, status, message.to_string()));
    }

    /// The next call to `operation` never completes.
    fn stall_next(&self, operation: &'static str) {
        self.state.lock().unwrap().stall_next = Some(operation);
    }

    fn take_stall(&self, operation: &'static str) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.stall_next == Some(operation) {
            state.stall_next = None;
            return true;
        }
        false
    }

    fn seed_note(&self, title: &str, archived: bool) -> NoteId {
        let mut state = self.state.lock().unwrap();
        let id = NoteId::new(state.next_id);
        state.next_id += 1;
        state.notes.push(Note {
            id,
            title: title.to_string(),
            content: format!("{title} body"),
            categories: Vec::new(),
            archived,
        });
        id
    }

    fn record(&self, operation: &'static str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation);
        match state.reject_next.take() {
            Some((target, status, message)) if target == operation => {
                Err(ApiError::ServerRejected { status, message })
            }
            other => {
                state.reject_next = other;
                Ok(())
            }
        }
    }

    fn authorize(&self, operation: &'static str) -> Result<()> {
        if !self.store.has_token() {
            return Err(ApiError::NoCredential);
        }
        self.record(operation)
    }

    fn resolve_categories(state: &mut FakeState, names: &[String]) -> Vec<Category> {
        names
            .iter()
            .map(|name| {
                if let Some(existing) = state.categories.iter().find(|c| &c.name == name) {
                    return existing.clone();
                }
                let category = Category::new(CategoryId::new(state.next_id), name.clone());
                state.next_id += 1;
                state.categories.push(category.clone());
                category
            })
            .collect()
    }

    fn find_note(state: &mut FakeState, id: NoteId) -> Result<&mut Note> {
        state
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or_else(|| ApiError::ServerRejected {
                status: 404,
                message: "Note not found".to_string(),
            })
    }
}

impl NotesBackend for FakeBackend {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken> {
        self.record("authenticate")?;
        let state = self.state.lock().unwrap();
        match state.users.get(&credentials.username) {
            Some(password) if *password == credentials.password => {
                Ok(AuthToken::new(format!("token-{}", credentials.username)))
            }
            _ => Err(ApiError::ServerRejected {
                status: 401,
                message: "Invalid username or password".to_string(),
            }),
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthToken> {
        self.record("register")?;
        let mut state = self.state.lock().unwrap();
        if state.users.contains_key(&credentials.username) {
            return Err(ApiError::ServerRejected {
                status: 409,
                message: "Username already taken".to_string(),
            });
        }
        state
            .users
            .insert(credentials.username.clone(), credentials.password.clone());
        Ok(AuthToken::new(format!("token-{}", credentials.username)))
    }

    async fn list_notes(&self, filter: NoteFilter) -> Result<Vec<Note>> {
        self.authorize("list_notes")?;
        if self.take_stall("list_notes") {
            std::future::pending::<()>().await;
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .notes
            .iter()
            .filter(|note| match filter {
                NoteFilter::All => true,
                NoteFilter::Active => !note.archived,
                NoteFilter::Archived => note.archived,
            })
            .cloned()
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.authorize("list_categories")?;
        Ok(self.state.lock().unwrap().categories.clone())
    }

    async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        self.authorize("create_note")?;
        let mut state = self.state.lock().unwrap();
        let categories = Self::resolve_categories(&mut state, &draft.category_names);
        let note = Note {
            id: NoteId::new(state.next_id),
            title: draft.title.clone(),
            content: draft.content.clone(),
            categories,
            archived: false,
        };
        state.next_id += 1;
        state.notes.push(note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: NoteId, draft: &NoteDraft) -> Result<Note> {
        self.authorize("update_note")?;
        let mut state = self.state.lock().unwrap();
        let categories = Self::resolve_categories(&mut state, &draft.category_names);
        let note = Self::find_note(&mut state, id)?;
        note.title = draft.title.clone();
        note.content = draft.content.clone();
        note.categories = categories;
        Ok(note.clone())
    }

    async fn delete_note(&self, id: NoteId) -> Result<()> {
        self.authorize("delete_note")?;
        let mut state = self.state.lock().unwrap();
        Self::find_note(&mut state, id)?;
        state.notes.retain(|note| note.id != id);
        Ok(())
    }

    async fn archive_note(&self, id: NoteId) -> Result<()> {
        self.authorize("archive_note")?;
        let mut state = self.state.lock().unwrap();
        Self::find_note(&mut state, id)?.archived = true;
        Ok(())
    }

    async fn unarchive_note(&self, id: NoteId) -> Result<()> {
        self.authorize("unarchive_note")?;
        let mut state = self.state.lock().unwrap();
        Self::find_note(&mut state, id)?.archived = false;
        Ok(())
    }
}

type Controller = ViewController<FakeBackend, MemoryCredentialStore>;

fn controller() -> Controller {
    let store = MemoryCredentialStore::new();
    ViewController::new(FakeBackend::new(store.clone()), store)
}

async fn signed_in() -> Controller {
    let mut controller = controller();
    let outcome = controller
        .dispatch(Intent::Login(Credentials::new("ada", "correct horse")))
        .await;
    assert_eq!(outcome, Dispatch::Applied);
    controller
}

fn titles(controller: &Controller) -> Vec<String> {
    controller
        .notes()
        .iter()
        .map(|note| note.title.clone())
        .collect()
}

fn ids(controller: &Controller) -> Vec<NoteId> {
    controller.notes().iter().map(|note| note.id).collect()
}

#[test]
fn initial_state_is_login() {
    let controller = controller();
    assert_eq!(controller.view(), View::Login);
    assert!(controller.notes().is_empty());
    assert!(!controller.is_signed_in());
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn login_stores_token_and_loads_list_and_categories() {
    let controller = signed_in().await;

    assert_eq!(controller.view(), View::List(NoteFilter::All));
    assert!(controller.is_signed_in());
    assert_eq!(
        controller.backend().calls(),
        vec!["authenticate", "list_notes", "list_categories"]
    );
}

#[tokio::test]
async fn rejected_login_stays_on_login_with_expiring_error() {
    let mut controller = controller();
    let before = Instant::now();
    let outcome = controller
        .dispatch(Intent::Login(Credentials::new("ada", "wrong")))
        .await;

    assert_eq!(outcome, Dispatch::Failed);
    assert_eq!(controller.view(), View::Login);
    assert!(!controller.is_signed_in());

    let deadline = controller.error().unwrap().deadline();
    assert!(deadline >= before + ERROR_TTL);
    assert_eq!(
        controller.visible_error(deadline - Duration::from_millis(1)),
        Some("Invalid username or password")
    );
    assert_eq!(controller.visible_error(deadline), None);

    assert!(!controller.expire_error(deadline - Duration::from_millis(1)));
    assert!(controller.expire_error(deadline));
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn blank_credentials_issue_no_request() {
    let mut controller = controller();
    let outcome = controller
        .dispatch(Intent::Login(Credentials::new("  ", "pw")))
        .await;

    assert_eq!(outcome, Dispatch::Failed);
    assert!(controller.backend().calls().is_empty());
    assert_eq!(
        controller.visible_error(Instant::now()),
        Some("Username is required")
    );
}

#[tokio::test]
async fn register_signs_in_new_account() {
    let mut controller = controller();
    controller
        .dispatch(Intent::SelectView(View::Register))
        .await;
    assert_eq!(controller.view(), View::Register);

    let outcome = controller
        .dispatch(Intent::Register(Credentials::new("grace", "pw")))
        .await;

    assert_eq!(outcome, Dispatch::Applied);
    assert_eq!(controller.view(), View::List(NoteFilter::All));
    assert!(controller.is_signed_in());
}

#[tokio::test]
async fn duplicate_registration_surfaces_backend_message() {
    let mut controller = controller();
    controller
        .dispatch(Intent::SelectView(View::Register))
        .await;
    let outcome = controller
        .dispatch(Intent::Register(Credentials::new("ada", "pw")))
        .await;

    assert_eq!(outcome, Dispatch::Failed);
    assert_eq!(controller.view(), View::Register);
    assert_eq!(
        controller.visible_error(Instant::now()),
        Some("Username already taken")
    );
}

#[tokio::test]
async fn logout_always_returns_to_login() {
    let mut controller = signed_in().await;
    let id = controller.backend().seed_note("Keep", false);
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::All)))
        .await;

    let states = [
        Intent::SelectView(View::List(NoteFilter::Archived)),
        Intent::SelectView(View::CreateForm),
        Intent::EditNote(id),
    ];
    for intent in states {
        if !controller.is_signed_in() {
            controller
                .dispatch(Intent::Login(Credentials::new("ada", "correct horse")))
                .await;
            controller
                .dispatch(Intent::SelectView(View::List(NoteFilter::All)))
                .await;
        }
        controller.dispatch(intent).await;
        assert!(controller.view().requires_session());

        assert_eq!(controller.dispatch(Intent::Logout).await, Dispatch::Applied);
        assert_eq!(controller.view(), View::Login);
        assert!(!controller.is_signed_in());
        assert!(controller.notes().is_empty());
    }

    assert_eq!(controller.dispatch(Intent::Logout).await, Dispatch::Applied);
    assert_eq!(controller.view(), View::Login);
}

#[tokio::test]
async fn select_view_shows_latest_fetch_for_filter() {
    let mut controller = signed_in().await;
    let backend = controller.backend().clone();
    backend.seed_note("Live", false);
    backend.seed_note("Old", true);

    for filter in [
        NoteFilter::Archived,
        NoteFilter::All,
        NoteFilter::Active,
        NoteFilter::Archived,
        NoteFilter::Active,
    ] {
        let outcome = controller
            .dispatch(Intent::SelectView(View::List(filter)))
            .await;
        assert_eq!(outcome, Dispatch::Applied);
        assert_eq!(controller.view(), View::List(filter));
        let expected = backend.list_notes(filter).await.unwrap();
        assert_eq!(controller.notes(), expected.as_slice());
    }
}

#[tokio::test]
async fn failed_list_fetch_keeps_previous_view_and_notes() {
    let mut controller = signed_in().await;
    controller.backend().seed_note("Live", false);
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::Active)))
        .await;
    controller
        .backend()
        .reject_next("list_notes", 500, "database unavailable");

    let outcome = controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::Archived)))
        .await;

    assert_eq!(outcome, Dispatch::Failed);
    assert_eq!(controller.view(), View::List(NoteFilter::Active));
    assert_eq!(titles(&controller), vec!["Live"]);
    assert_eq!(
        controller.visible_error(Instant::now()),
        Some("database unavailable")
    );
}

#[tokio::test]
async fn list_without_token_reports_missing_credential() {
    let mut controller = controller();
    let outcome = controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::All)))
        .await;

    assert_eq!(outcome, Dispatch::Failed);
    assert_eq!(controller.view(), View::Login);
    assert!(controller.backend().calls().is_empty());
    assert_eq!(
        controller.visible_error(Instant::now()),
        Some("You are not signed in")
    );
}

#[tokio::test]
async fn create_with_missing_fields_issues_no_request() {
    let mut controller = signed_in().await;
    controller
        .dispatch(Intent::SelectView(View::CreateForm))
        .await;
    let calls_before = controller.backend().calls().len();

    for draft in [
        NoteDraft::new("", "body", ["work"]),
        NoteDraft::new("Title", "   ", ["work"]),
    ] {
        let outcome = controller.dispatch(Intent::SubmitCreate(draft.clone())).await;
        assert_eq!(outcome, Dispatch::Failed);
        assert_eq!(controller.view(), View::CreateForm);
        assert_eq!(controller.form(), &draft);
    }
    assert_eq!(controller.backend().calls().len(), calls_before);
}

#[tokio::test]
async fn created_note_carries_its_categories() {
    let mut controller = signed_in().await;
    controller
        .dispatch(Intent::SelectView(View::CreateForm))
        .await;
    assert_eq!(controller.view(), View::CreateForm);

    let outcome = controller
        .dispatch(Intent::SubmitCreate(NoteDraft::new(
            "Ship it",
            "Release on Friday",
            ["work", "urgent"],
        )))
        .await;

    assert_eq!(outcome, Dispatch::Applied);
    assert_eq!(controller.view(), View::List(NoteFilter::All));
    assert_eq!(controller.form(), &NoteDraft::default());
    let note = &controller.notes()[0];
    assert_eq!(note.title, "Ship it");
    assert!(note.has_category("work"));
    assert!(note.has_category("urgent"));
}

#[tokio::test]
async fn create_rejected_by_server_stays_in_form() {
    let mut controller = signed_in().await;
    controller
        .dispatch(Intent::SelectView(View::CreateForm))
        .await;
    controller
        .backend()
        .reject_next("create_note", 400, "Title too long");

    let draft = NoteDraft::new("T", "C", Vec::<String>::new());
    let outcome = controller.dispatch(Intent::SubmitCreate(draft.clone())).await;

    assert_eq!(outcome, Dispatch::Failed);
    assert_eq!(controller.view(), View::CreateForm);
    assert_eq!(controller.form(), &draft);
    assert_eq!(
        controller.visible_error(Instant::now()),
        Some("Title too long")
    );
}

#[tokio::test]
async fn archive_and_unarchive_move_note_between_filters() {
    let mut controller = signed_in().await;
    let id = controller.backend().seed_note("Move me", false);
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::Active)))
        .await;
    assert_eq!(ids(&controller), vec![id]);

    assert_eq!(
        controller.dispatch(Intent::Archive(id)).await,
        Dispatch::Applied
    );
    assert_eq!(controller.view(), View::List(NoteFilter::Active));
    assert!(controller.notes().is_empty());

    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::Archived)))
        .await;
    assert_eq!(ids(&controller), vec![id]);
    assert!(controller.notes()[0].archived);

    controller.dispatch(Intent::Unarchive(id)).await;
    assert!(controller.notes().is_empty());
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::Active)))
        .await;
    assert_eq!(ids(&controller), vec![id]);
}

#[tokio::test]
async fn deleted_note_disappears_from_every_filter() {
    let mut controller = signed_in().await;
    let doomed = controller.backend().seed_note("Doomed", true);
    let kept = controller.backend().seed_note("Kept", false);
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::All)))
        .await;

    assert_eq!(
        controller.dispatch(Intent::Delete(doomed)).await,
        Dispatch::Applied
    );
    assert_eq!(ids(&controller), vec![kept]);

    for filter in NoteFilter::ALL {
        controller
            .dispatch(Intent::SelectView(View::List(filter)))
            .await;
        assert!(!ids(&controller).contains(&doomed));
    }
}

#[tokio::test]
async fn failed_delete_stays_in_place() {
    let mut controller = signed_in().await;
    controller.backend().seed_note("Kept", false);
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::Active)))
        .await;

    let outcome = controller.dispatch(Intent::Delete(NoteId::new(999))).await;

    assert_eq!(outcome, Dispatch::Failed);
    assert_eq!(controller.view(), View::List(NoteFilter::Active));
    assert_eq!(titles(&controller), vec!["Kept"]);
    assert_eq!(
        controller.visible_error(Instant::now()),
        Some("Note not found")
    );
}

#[tokio::test]
async fn edit_prepopulates_form_from_cached_note() {
    let mut controller = signed_in().await;
    let id = controller.backend().seed_note("Draft", false);
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::All)))
        .await;
    let list_calls = |c: &Controller| {
        c.backend()
            .calls()
            .into_iter()
            .filter(|call| *call == "list_notes")
            .count()
    };
    let before = list_calls(&controller);

    assert_eq!(controller.dispatch(Intent::EditNote(id)).await, Dispatch::Applied);

    assert_eq!(controller.view(), View::EditForm(id));
    assert_eq!(controller.form().title, "Draft");
    assert_eq!(controller.form().content, "Draft body");
    assert_eq!(list_calls(&controller), before);
}

#[tokio::test]
async fn submit_edit_updates_and_returns_to_all() {
    let mut controller = signed_in().await;
    let id = controller.backend().seed_note("Draft", true);
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::Archived)))
        .await;
    controller.dispatch(Intent::EditNote(id)).await;

    let outcome = controller
        .dispatch(Intent::SubmitEdit(
            id,
            NoteDraft::new("Final", "Done", ["work"]),
        ))
        .await;

    assert_eq!(outcome, Dispatch::Applied);
    assert_eq!(controller.view(), View::List(NoteFilter::All));
    let note = controller.note(id).unwrap();
    assert_eq!(note.title, "Final");
    assert_eq!(note.category_names(), vec!["work"]);
}

#[tokio::test]
async fn failed_edit_stays_in_edit_form() {
    let mut controller = signed_in().await;
    let id = controller.backend().seed_note("Draft", false);
    controller
        .dispatch(Intent::SelectView(View::List(NoteFilter::All)))
        .await;
    controller.dispatch(Intent::EditNote(id)).await;
    controller
        .backend()
        .reject_next("update_note", 409, "Note was modified");

    let outcome = controller
        .dispatch(Intent::SubmitEdit(id, NoteDraft::new("New", "Body", ["x"])))
        .await;

    assert_eq!(outcome, Dispatch::Failed);
    assert_eq!(controller.view(), View::EditForm(id));
    assert_eq!(controller.form().title, "New");
}

#[tokio::test]
async fn edit_unknown_note_fails_without_leaving_list() {
    let mut controller = signed_in().await;
    let outcome = controller.dispatch(Intent::EditNote(NoteId::new(42))).await;

    assert_eq!(outcome, Dispatch::Failed);
    assert_eq!(controller.view(), View::List(NoteFilter::All));
}

#[tokio::test]
async fn create_form_opens_even_when_categories_fail() {
    let mut controller = signed_in().await;
    controller
        .backend()
        .reject_next("list_categories", 503, "Try again later");

    let outcome = controller
        .dispatch(Intent::SelectView(View::CreateForm))
        .await;

    assert_eq!(outcome, Dispatch::Applied);
    assert_eq!(controller.view(), View::CreateForm);
    assert_eq!(
        controller.visible_error(Instant::now()),
        Some("Try again later")
    );
}

#[tokio::test]
async fn stale_fetch_ticket_is_discarded() {
    let mut controller = signed_in().await;
    let backend = controller.backend().clone();
    backend.seed_note("Live", false);
    backend.seed_note("Old", true);

    let slow = controller.begin_list_fetch(NoteFilter::Archived);
    let fast = controller.begin_list_fetch(NoteFilter::Active);

    let active = backend.list_notes(NoteFilter::Active).await.unwrap();
    assert!(controller.apply_list_fetch(fast, active));
    let archived = backend.list_notes(NoteFilter::Archived).await.unwrap();
    assert!(!controller.apply_list_fetch(slow, archived));

    assert_eq!(controller.view(), View::List(NoteFilter::Active));
    assert_eq!(titles(&controller), vec!["Live"]);
}

#[tokio::test]
async fn fetch_is_discarded_after_navigating_to_a_form() {
    let mut controller = signed_in().await;
    controller.backend().seed_note("Live", false);

    let ticket = controller.begin_list_fetch(NoteFilter::All);
    controller
        .dispatch(Intent::SelectView(View::CreateForm))
        .await;

    let notes = controller.backend().list_notes(NoteFilter::All).await.unwrap();
    assert!(!controller.apply_list_fetch(ticket, notes));
    assert_eq!(controller.view(), View::CreateForm);
}

#[tokio::test]
async fn mutations_are_ignored_while_loading() {
    let mut controller = signed_in().await;
    controller.loading = true;
    let calls_before = controller.backend().calls().len();

    let outcome = controller
        .dispatch(Intent::SubmitCreate(NoteDraft::new("T", "C", ["a"])))
        .await;

    assert_eq!(outcome, Dispatch::Ignored);
    assert_eq!(controller.backend().calls().len(), calls_before);
    assert_eq!(controller.dispatch(Intent::Logout).await, Dispatch::Applied);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn cancelled_request_releases_the_loading_gate() {
    let mut controller = signed_in().await;
    controller.backend().stall_next("list_notes");

    let abandoned = tokio::time::timeout(
        Duration::from_millis(20),
        controller.dispatch(Intent::SelectView(View::List(NoteFilter::Active))),
    )
    .await;
    assert!(abandoned.is_err());
    assert!(!controller.is_loading());

    let outcome = controller
        .dispatch(Intent::SubmitCreate(NoteDraft::new("After", "C", ["a"])))
        .await;
    assert_eq!(outcome, Dispatch::Applied);
    assert_eq!(controller.last_saved().map(|note| note.title.as_str()), Some("After"));
}

#[tokio::test]
async fn last_saved_tracks_the_returned_note() {
    let mut controller = signed_in().await;
    assert!(controller.last_saved().is_none());
    controller.backend().seed_note("Same", false);

    controller
        .dispatch(Intent::SubmitCreate(NoteDraft::new("Same", "new body", ["a"])))
        .await;
    let created = controller.last_saved().cloned().unwrap();
    assert_eq!(created.content, "new body");
    assert_eq!(created.category_names(), vec!["a".to_string()]);
    assert_eq!(controller.note(created.id).map(|note| note.content.as_str()), Some("new body"));

    controller.dispatch(Intent::Logout).await;
    assert!(controller.last_saved().is_none());
}

#[tokio::test]
async fn dismiss_clears_error_banner() {
    let mut controller = controller();
    controller
        .dispatch(Intent::Login(Credentials::new("ada", "nope")))
        .await;
    assert!(controller.error().is_some());

    assert_eq!(
        controller.dispatch(Intent::DismissError).await,
        Dispatch::Applied
    );
    assert!(controller.error().is_none());
    assert_eq!(
        controller.dispatch(Intent::DismissError).await,
        Dispatch::Ignored
    );
}

#[tokio::test]
async fn quick_login_uses_configured_credentials() {
    let store = MemoryCredentialStore::new();
    let mut controller = ViewController::new(FakeBackend::new(store.clone()), store)
        .with_quick_login(Credentials::new("ada", "correct horse"));

    assert_eq!(controller.dispatch(Intent::QuickLogin).await, Dispatch::Applied);
    assert_eq!(controller.view(), View::List(NoteFilter::All));
}

#[tokio::test]
async fn quick_login_without_configuration_fails_locally() {
    let mut controller = controller();
    assert_eq!(controller.dispatch(Intent::QuickLogin).await, Dispatch::Failed);
    assert!(controller.backend().calls().is_empty());
}

#[tokio::test]
async fn restore_resumes_stored_session() {
    let store = MemoryCredentialStore::with_token("token-ada");
    let backend = FakeBackend::new(store.clone());
    backend.seed_note("Persisted", false);
    let mut controller = ViewController::new(backend, store);

    assert_eq!(controller.restore().await, Dispatch::Applied);
    assert_eq!(controller.view(), View::List(NoteFilter::All));
    assert_eq!(titles(&controller), vec!["Persisted"]);

    let mut fresh = self::controller();
    assert_eq!(fresh.restore().await, Dispatch::Ignored);
    assert_eq!(fresh.view(), View::Login);
}

#[tokio::test]
async fn switching_to_register_is_ignored_while_signed_in() {
    let mut controller = signed_in().await;
    assert_eq!(
        controller
            .dispatch(Intent::SelectView(View::Register))
            .await,
        Dispatch::Ignored
    );
    assert_eq!(controller.view(), View::List(NoteFilter::All));
}
