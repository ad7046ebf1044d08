// xcalendar-core
// Token lifecycle, calendar sync orchestration, and the per-day notes index
// behind the xcalendar widget. Rendering and theming live with the embedder;
// state is passed through explicit context objects, never ambient singletons.

pub mod auth;
pub mod calendar;
pub mod config;
pub mod error;
pub mod http_config;
pub mod models;
pub mod notes;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use auth::{HttpTokenEndpoint, IdentityFlow, TokenEndpoint, TokenManager, UnattendedFlow};
pub use calendar::{CalendarSync, SYNC_WINDOW_DAYS};
pub use error::{AppError, AppResult};
pub use models::*;
pub use notes::NotesIndex;
pub use storage::Storage;
