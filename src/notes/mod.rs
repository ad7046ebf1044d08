// Per-day note feed with categories.
//
// The index maps date-key -> category -> insertion-ordered entries and is
// persisted whole after every mutation, mirroring extension-local storage.
// Deleting the last entry of a category leaves its empty list behind;
// nothing garbage-collects emptied keys and summaries skip them instead.

use chrono::{NaiveDate, Utc};
use log::debug;

use crate::error::AppResult;
use crate::models::{CategorySummary, DayNotes, NoteEntry, NotesData};
use crate::storage::Storage;
use crate::utils::date_key;

/// Most indicator dots a single day renders.
const MAX_SUMMARY_CATEGORIES: usize = 4;

pub struct NotesIndex {
    storage: Storage,
    days: NotesData,
}

impl NotesIndex {
    /// Load the persisted index; empty on first run.
    pub async fn load(storage: Storage) -> AppResult<Self> {
        let days = storage.load_notes().await?;
        Ok(Self { storage, days })
    }

    /// Append a note to the tail of the `(date, category)` list and persist.
    ///
    /// Whitespace-only text is a silent no-op, not an error: the UI calls
    /// save on every day/category switch and most of those saves are empty.
    pub async fn add_note(
        &mut self,
        date: NaiveDate,
        category: &str,
        text: &str,
    ) -> AppResult<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let entry = NoteEntry::new(trimmed.to_string(), category.to_string(), Utc::now());
        self.days
            .entry(date_key(date))
            .or_default()
            .entry(category.to_string())
            .or_default()
            .push(entry);

        self.storage.save_notes(&self.days).await?;
        debug!("Added note on {} in '{}'", date_key(date), category);
        Ok(())
    }

    /// Remove exactly one entry at `index` within the category list and
    /// persist. Missing date/category or an out-of-bounds index is a no-op;
    /// callers holding stale indices after a delete must re-fetch.
    pub async fn delete_note(
        &mut self,
        date: NaiveDate,
        category: &str,
        index: usize,
    ) -> AppResult<()> {
        let key = date_key(date);
        let Some(list) = self
            .days
            .get_mut(&key)
            .and_then(|day| day.get_mut(category))
        else {
            return Ok(());
        };
        if index >= list.len() {
            return Ok(());
        }

        list.remove(index);
        self.storage.save_notes(&self.days).await?;
        debug!("Deleted note {} on {} in '{}'", index, key, category);
        Ok(())
    }

    /// All of a day's notes by category, in persisted (insertion) order.
    /// Empty mapping when the day has never been written.
    pub fn notes_for_date(&self, date: NaiveDate) -> DayNotes {
        self.days.get(&date_key(date)).cloned().unwrap_or_default()
    }

    /// Per-category counts for the day's indicator dots: descending by
    /// count, ties in lexical category order, at most four entries.
    pub fn summarize(&self, date: NaiveDate) -> Vec<CategorySummary> {
        let Some(day) = self.days.get(&date_key(date)) else {
            return Vec::new();
        };

        // BTreeMap iteration is lexical, and the sort is stable
        let mut summaries: Vec<CategorySummary> = day
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(category, entries)| CategorySummary {
                category: category.clone(),
                count: entries.len(),
            })
            .collect();

        summaries.sort_by(|a, b| b.count.cmp(&a.count));
        summaries.truncate(MAX_SUMMARY_CATEGORIES);
        summaries
    }

    /// Render-time feed for one day: most recent first across all
    /// categories. The persisted order stays insertion order.
    pub fn day_feed(&self, date: NaiveDate) -> Vec<NoteEntry> {
        let Some(day) = self.days.get(&date_key(date)) else {
            return Vec::new();
        };

        let mut entries: Vec<NoteEntry> = day.values().flatten().cloned().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries
    }

    /// Raw view of the whole index.
    pub fn data(&self) -> &NotesData {
        &self.days
    }
}
