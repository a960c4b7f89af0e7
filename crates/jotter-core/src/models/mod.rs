//! Data models for Jotter

mod category;
mod credentials;
mod filter;
mod note;

pub use category::{Category, CategoryId};
pub use credentials::Credentials;
pub use filter::NoteFilter;
pub use note::{normalize_category_names, parse_category_list, Note, NoteDraft, NoteId};
