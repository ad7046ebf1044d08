// file: src/models/event.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CalendarProvider;

/// A calendar event fetched from an external provider.
///
/// Events are not cached locally; every sync is a fresh round trip and the
/// results are handed straight to the caller for display/logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub external_id: String,
    pub provider: CalendarProvider,
    pub title: String,
    pub description: Option<String>,
    /// Absent for all-day events, which carry a bare date on the wire.
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

/// Outcome of one provider's attempt within a sync round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub provider: CalendarProvider,
    pub success: bool,
    pub events_fetched: usize,
    pub error_message: Option<String>,
    pub sync_time: DateTime<Utc>,
}

impl SyncOutcome {
    pub fn success(provider: CalendarProvider, events_fetched: usize) -> Self {
        Self {
            provider,
            success: true,
            events_fetched,
            error_message: None,
            sync_time: Utc::now(),
        }
    }

    pub fn failure(provider: CalendarProvider, error: String) -> Self {
        Self {
            provider,
            success: false,
            events_fetched: 0,
            error_message: Some(error),
            sync_time: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_outcome_success() {
        let outcome = SyncOutcome::success(CalendarProvider::Google, 7);
        assert!(outcome.success);
        assert_eq!(outcome.events_fetched, 7);
        assert!(outcome.error_message.is_none());
    }

    #[test]
    fn test_sync_outcome_failure() {
        let outcome = SyncOutcome::failure(CalendarProvider::Microsoft, "status 502".to_string());
        assert!(!outcome.success);
        assert_eq!(outcome.events_fetched, 0);
        assert_eq!(outcome.error_message.as_deref(), Some("status 502"));
    }
}
