//! Journal entry types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a journal entry, unique within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of moment an entry records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Stop,
    Activity,
    Milestone,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::Stop, EntryKind::Activity, EntryKind::Milestone];

    /// Form value, as accepted by serde.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Stop => "stop",
            EntryKind::Activity => "activity",
            EntryKind::Milestone => "milestone",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EntryKind::Stop => "Stop",
            EntryKind::Activity => "Activity",
            EntryKind::Milestone => "Milestone",
        }
    }

    /// CSS class of the badge shown next to the title.
    pub fn badge_class(self) -> &'static str {
        match self {
            EntryKind::Stop => "badge-stop",
            EntryKind::Activity => "badge-activity",
            EntryKind::Milestone => "badge-milestone",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A stored journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub title: String,
    pub location: String,
    pub date: NaiveDate,
    pub description: String,
    pub kind: EntryKind,
}

impl JournalEntry {
    /// Date as shown on the journal page, e.g. "15 Dec 2024".
    pub fn display_date(&self) -> String {
        self.date.format("%-d %b %Y").to_string()
    }
}

/// User input for creating or editing an entry.
///
/// Fields are raw form values; the store validates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JournalDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: Option<EntryKind>,
}

impl JournalDraft {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            date: date.into(),
            description: None,
            kind: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }
}
