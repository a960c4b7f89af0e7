//! Note list filter

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which subset of notes a list view shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteFilter {
    #[default]
    All,
    Active,
    Archived,
}

impl NoteFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Archived];

    /// Relative API path listing this subset
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::All => "/api/notes",
            Self::Active => "/api/notes/active",
            Self::Archived => "/api/notes/archived",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for NoteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NoteFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(format!(
                "unknown filter '{other}' (expected all, active or archived)"
            )),
        }
    }
}
