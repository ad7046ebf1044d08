// file: src/models/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered notes for one day, keyed by category. BTreeMap keeps category
/// iteration lexical, which is the documented tie-break order for summaries.
pub type DayNotes = BTreeMap<String, Vec<NoteEntry>>;

/// The persisted index: date-key (`YYYY-MM-DD`) to per-category note lists.
pub type NotesData = BTreeMap<String, DayNotes>;

/// One saved note. Immutable once created except for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub text: String,
    pub category: String,
    pub timestamp: DateTime<Utc>,
}

impl NoteEntry {
    pub fn new(text: String, category: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            text,
            category,
            timestamp,
        }
    }
}

/// Per-day indicator summary for one category, derived at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
}
