// file: src/calendar/google.rs
//
// Google Calendar event listing. One bounded-range query per sync; no
// pagination, the widget only renders a 30-day window.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};
use crate::models::{CalendarProvider, RemoteEvent};

#[derive(Debug, Deserialize)]
struct GoogleEventsResponse {
    #[serde(default)]
    items: Vec<GoogleEvent>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    id: String,
    summary: Option<String>,
    description: Option<String>,
    start: Option<GoogleEventTime>,
    end: Option<GoogleEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventTime {
    date_time: Option<DateTime<Utc>>,
    #[allow(dead_code)]
    date: Option<String>,
}

pub fn build_events_url(
    events_url: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<String> {
    let mut url = Url::parse(events_url)
        .map_err(|e| AppError::config(format!("Invalid events URL: {e}")))?;

    url.query_pairs_mut()
        .append_pair("timeMin", &start.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .append_pair("timeMax", &end.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .append_pair("singleEvents", "true")
        .append_pair("orderBy", "startTime");

    Ok(url.into())
}

pub async fn fetch_events(
    client: &Client,
    config: &ProviderConfig,
    access_token: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<RemoteEvent>> {
    let events_url = config
        .events_url
        .as_deref()
        .ok_or_else(|| AppError::config("No events endpoint configured for google"))?;
    let url = build_events_url(events_url, start, end)?;

    let response = client
        .get(url)
        .header("Authorization", format!("Bearer {access_token}"))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AppError::sync(
            CalendarProvider::Google.as_str(),
            format!("Event fetch failed: {}", response.status()),
        ));
    }

    let body: GoogleEventsResponse = response.json().await?;
    Ok(body.items.into_iter().map(convert_event).collect())
}

fn convert_event(event: GoogleEvent) -> RemoteEvent {
    RemoteEvent {
        external_id: event.id,
        provider: CalendarProvider::Google,
        title: event
            .summary
            .unwrap_or_else(|| "Untitled Event".to_string()),
        description: event.description,
        starts_at: event.start.and_then(|t| t.date_time),
        ends_at: event.end.and_then(|t| t.date_time),
    }
}
