//! In-memory journal storage.

use chrono::NaiveDate;

use super::entry::{EntryId, EntryKind, JournalDraft, JournalEntry};

/// Errors from journal operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("journal entry {0} not found")]
    NotFound(EntryId),
}

/// Validated draft fields.
struct Checked {
    title: String,
    location: String,
    date: NaiveDate,
}

fn check(draft: &JournalDraft) -> Result<Checked, JournalError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(JournalError::MissingField("title"));
    }
    let location = draft.location.trim();
    if location.is_empty() {
        return Err(JournalError::MissingField("location"));
    }
    let date = draft.date.trim();
    if date.is_empty() {
        return Err(JournalError::MissingField("date"));
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| JournalError::InvalidDate(date.to_string()))?;

    Ok(Checked {
        title: title.to_string(),
        location: location.to_string(),
        date,
    })
}

/// Ordered list of journal entries. Newest additions come first.
#[derive(Debug, Clone)]
pub struct JournalStore {
    entries: Vec<JournalEntry>,
    next_id: u64,
}

impl JournalStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// A store holding the example entries shown on first visit.
    pub fn with_sample_entries() -> Self {
        let samples = [
            JournalDraft::new("Arrived in Sintra", "Sintra, Portugal", "2024-12-15")
                .with_description(
                    "Beautiful historic town with amazing palaces and castles. \
                     Spent the day exploring Pena Palace.",
                )
                .with_kind(EntryKind::Stop),
            JournalDraft::new(
                "Westernmost Point of Europe",
                "Cabo da Roca, Portugal",
                "2024-12-13",
            )
            .with_description(
                "Visited the famous lighthouse at the westernmost point of continental Europe.",
            )
            .with_kind(EntryKind::Milestone),
            JournalDraft::new("Coastal Drive", "Cascais to Sintra", "2024-12-14")
                .with_description(
                    "Scenic coastal drive with stunning ocean views and dramatic cliffs.",
                )
                .with_kind(EntryKind::Activity),
        ];

        let mut store = Self::new();
        for draft in &samples {
            if let Ok(checked) = check(draft) {
                let entry = store.build(checked, draft);
                store.entries.push(entry);
            }
        }
        store
    }

    fn build(&mut self, checked: Checked, draft: &JournalDraft) -> JournalEntry {
        let id = EntryId::new(self.next_id);
        self.next_id += 1;
        JournalEntry {
            id,
            title: checked.title,
            location: checked.location,
            date: checked.date,
            description: draft.description.clone().unwrap_or_default(),
            kind: draft.kind.unwrap_or_default(),
        }
    }

    pub fn list(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Validate a draft and insert it at the front.
    ///
    /// Title, location and date are required; description defaults to
    /// empty and kind to [`EntryKind::Stop`].
    pub fn add(&mut self, draft: &JournalDraft) -> Result<&JournalEntry, JournalError> {
        let checked = check(draft)?;
        let entry = self.build(checked, draft);
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// Replace an entry's fields, keeping its id and position.
    ///
    /// A draft without a description or kind leaves that field unchanged.
    pub fn update(
        &mut self,
        id: EntryId,
        draft: &JournalDraft,
    ) -> Result<&JournalEntry, JournalError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(JournalError::NotFound(id))?;
        let checked = check(draft)?;

        let entry = &mut self.entries[index];
        entry.title = checked.title;
        entry.location = checked.location;
        entry.date = checked.date;
        if let Some(description) = &draft.description {
            entry.description = description.clone();
        }
        if let Some(kind) = draft.kind {
            entry.kind = kind;
        }
        Ok(&self.entries[index])
    }

    /// Remove an entry, returning it.
    pub fn delete(&mut self, id: EntryId) -> Result<JournalEntry, JournalError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(JournalError::NotFound(id))?;
        Ok(self.entries.remove(index))
    }
}

impl Default for JournalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(store: &JournalStore) -> Vec<&str> {
        store.list().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn sample_entries() {
        let store = JournalStore::with_sample_entries();
        assert_eq!(
            titles(&store),
            vec![
                "Arrived in Sintra",
                "Westernmost Point of Europe",
                "Coastal Drive"
            ]
        );
        assert_eq!(store.list()[1].kind, EntryKind::Milestone);
        assert_eq!(store.list()[0].display_date(), "15 Dec 2024");
    }

    #[test]
    fn add_prepends_with_defaults() {
        let mut store = JournalStore::with_sample_entries();
        let added = store
            .add(&JournalDraft::new("Porto", "Porto, Portugal", "2025-09-02"))
            .unwrap()
            .clone();

        assert_eq!(added.kind, EntryKind::Stop);
        assert_eq!(added.description, "");
        assert_eq!(store.len(), 4);
        assert_eq!(store.list()[0].id, added.id);
        assert_eq!(store.get(added.id), Some(&added));
    }

    #[test]
    fn ids_are_unique() {
        let mut store = JournalStore::with_sample_entries();
        let a = store.add(&JournalDraft::new("a", "x", "2025-01-01")).unwrap().id;
        let b = store.add(&JournalDraft::new("b", "x", "2025-01-01")).unwrap().id;
        assert_ne!(a, b);

        let mut ids: Vec<_> = store.list().iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn add_requires_fields() {
        let mut store = JournalStore::new();

        assert_eq!(
            store.add(&JournalDraft::new("", "Lisbon", "2025-01-01")).unwrap_err(),
            JournalError::MissingField("title")
        );
        assert_eq!(
            store.add(&JournalDraft::new("Title", "   ", "2025-01-01")).unwrap_err(),
            JournalError::MissingField("location")
        );
        assert_eq!(
            store.add(&JournalDraft::new("Title", "Lisbon", "")).unwrap_err(),
            JournalError::MissingField("date")
        );
        assert_eq!(
            store.add(&JournalDraft::new("Title", "Lisbon", "soon")).unwrap_err(),
            JournalError::InvalidDate("soon".into())
        );
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_timestamps_as_dates() {
        let mut store = JournalStore::new();
        assert_eq!(
            store
                .add(&JournalDraft::new("Porto", "Portugal", "2025-09-02T10:00:00Z"))
                .unwrap_err(),
            JournalError::InvalidDate("2025-09-02T10:00:00Z".into())
        );
        assert_eq!(
            store
                .add(&JournalDraft::new("Porto", "Portugal", "02/09/2025"))
                .unwrap_err(),
            JournalError::InvalidDate("02/09/2025".into())
        );
        assert!(store.is_empty());
    }

    #[test]
    fn add_trims_fields() {
        let mut store = JournalStore::new();
        let entry = store
            .add(&JournalDraft::new("  Porto ", " Portugal ", " 2025-09-02 "))
            .unwrap();
        assert_eq!(entry.title, "Porto");
        assert_eq!(entry.location, "Portugal");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 9, 2).unwrap());
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut store = JournalStore::with_sample_entries();
        let id = store.list()[1].id;

        let draft = JournalDraft::new("Cabo da Roca", "Sintra, Portugal", "2024-12-12")
            .with_kind(EntryKind::Stop);
        store.update(id, &draft).unwrap();

        let entry = &store.list()[1];
        assert_eq!(entry.id, id);
        assert_eq!(entry.title, "Cabo da Roca");
        assert_eq!(entry.kind, EntryKind::Stop);
        // No description in the draft: previous text kept.
        assert!(entry.description.starts_with("Visited the famous lighthouse"));
    }

    #[test]
    fn update_validates() {
        let mut store = JournalStore::with_sample_entries();
        let id = store.list()[0].id;

        let err = store
            .update(id, &JournalDraft::new("", "Sintra", "2024-12-15"))
            .unwrap_err();
        assert_eq!(err, JournalError::MissingField("title"));
        assert_eq!(store.list()[0].title, "Arrived in Sintra");
    }

    #[test]
    fn unknown_id_not_found() {
        let mut store = JournalStore::with_sample_entries();
        let missing = EntryId::new(999);

        assert_eq!(store.get(missing), None);
        assert_eq!(
            store
                .update(missing, &JournalDraft::new("t", "l", "2025-01-01"))
                .unwrap_err(),
            JournalError::NotFound(missing)
        );
        assert_eq!(store.delete(missing).unwrap_err(), JournalError::NotFound(missing));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn delete_removes_only_that_entry() {
        let mut store = JournalStore::with_sample_entries();
        let id = store.list()[1].id;

        let removed = store.delete(id).unwrap();
        assert_eq!(removed.title, "Westernmost Point of Europe");
        assert_eq!(titles(&store), vec!["Arrived in Sintra", "Coastal Drive"]);
        assert_eq!(store.get(id), None);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            JournalError::MissingField("title").to_string(),
            "title is required"
        );
        assert_eq!(
            JournalError::NotFound(EntryId::new(4)).to_string(),
            "journal entry 4 not found"
        );
    }
}
