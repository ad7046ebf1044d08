// Domain types shared across the crate.

pub mod event;
pub mod note;
pub mod provider;
pub mod token;

pub use event::{RemoteEvent, SyncOutcome};
pub use note::{CategorySummary, DayNotes, NoteEntry, NotesData};
pub use provider::CalendarProvider;
pub use token::TokenRecord;
