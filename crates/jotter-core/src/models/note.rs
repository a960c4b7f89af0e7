//! Note model

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use super::Category;
use crate::error::{ApiError, Result};

/// Backend-assigned note identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A note as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Short title
    pub title: String,
    /// Plain text body
    pub content: String,
    /// Attached categories, in backend order
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Whether the note is archived
    #[serde(default)]
    pub archived: bool,
}

impl Note {
    /// Names of the attached categories, in order
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|category| category.name.clone())
            .collect()
    }

    /// Check whether a category with `name` is attached (case-insensitive)
    #[must_use]
    pub fn has_category(&self, name: &str) -> bool {
        self.categories
            .iter()
            .any(|category| category.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Payload for creating or updating a note
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub category_names: Vec<String>,
}

impl NoteDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category_names: category_names.into_iter().map(Into::into).collect(),
        }
    }

    /// Draft pre-populated from an existing note
    #[must_use]
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            category_names: note.category_names(),
        }
    }

    /// Check required fields and return the normalized draft.
    ///
    /// Title and content must not be blank. Category names are trimmed,
    /// empties dropped and duplicates removed case-insensitively, keeping the
    /// first spelling and the original order.
    pub fn validated(&self) -> Result<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::validation("Title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(ApiError::validation("Content is required"));
        }

        Ok(Self {
            title: title.to_string(),
            content: self.content.trim_end().to_string(),
            category_names: normalize_category_names(&self.category_names),
        })
    }
}

/// Trim, drop empty and deduplicate category names (case-insensitive).
pub fn normalize_category_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(ToString::to_string)
        .collect()
}

/// Split a comma-separated category list as typed by a user.
pub fn parse_category_list(raw: &str) -> Vec<String> {
    let names = raw.split(',').map(ToString::to_string).collect::<Vec<_>>();
    normalize_category_names(&names)
}
