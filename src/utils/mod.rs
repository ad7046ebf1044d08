use chrono::NaiveDate;

pub mod logging;

/// Canonical `YYYY-MM-DD` key for a calendar day. Keys always use the local
/// calendar date, never UTC; month and day are zero-padded.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
