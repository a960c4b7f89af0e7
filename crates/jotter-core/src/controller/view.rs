//! Views and user intents.

use crate::models::{Credentials, NoteDraft, NoteFilter, NoteId};

/// The screen currently shown. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Login,
    Register,
    List(NoteFilter),
    CreateForm,
    EditForm(NoteId),
}

impl View {
    /// Whether this view requires a signed-in session.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        !matches!(self, Self::Login | Self::Register)
    }

    #[must_use]
    pub const fn filter(self) -> Option<NoteFilter> {
        match self {
            Self::List(filter) => Some(filter),
            _ => None,
        }
    }
}

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Login(Credentials),
    QuickLogin,
    Register(Credentials),
    Logout,
    SelectView(View),
    SubmitCreate(NoteDraft),
    SubmitEdit(NoteId, NoteDraft),
    EditNote(NoteId),
    Delete(NoteId),
    Archive(NoteId),
    Unarchive(NoteId),
    DismissError,
}

impl Intent {
    /// Mutating intents are dropped while another request is in flight.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Login(_)
                | Self::QuickLogin
                | Self::Register(_)
                | Self::SubmitCreate(_)
                | Self::SubmitEdit(..)
                | Self::Delete(_)
                | Self::Archive(_)
                | Self::Unarchive(_)
        )
    }
}

/// How the controller handled an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The transition happened.
    Applied,
    /// The operation failed; the error banner holds the reason.
    Failed,
    /// Nothing happened (busy, or not meaningful in the current view).
    Ignored,
}

impl Dispatch {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
