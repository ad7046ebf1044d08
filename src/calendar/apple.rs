// file: src/calendar/apple.rs
//
// Apple Calendar sync needs an app registration and a CloudKit-side setup
// that never landed; the adapter exists so provider dispatch stays
// exhaustive.

use chrono::{DateTime, Utc};
use reqwest::Client;

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};
use crate::models::RemoteEvent;

pub async fn fetch_events(
    _client: &Client,
    _config: &ProviderConfig,
    _access_token: &str,
    _start: DateTime<Utc>,
    _end: DateTime<Utc>,
) -> AppResult<Vec<RemoteEvent>> {
    Err(AppError::not_implemented("Apple Calendar sync"))
}
