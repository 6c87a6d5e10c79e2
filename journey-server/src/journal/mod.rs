//! The journey journal: short notes about stops, activities and milestones.
//!
//! Entries live in memory only and are lost on restart.

mod entry;
mod store;

pub use entry::{EntryId, EntryKind, JournalDraft, JournalEntry};
pub use store::{JournalError, JournalStore};
