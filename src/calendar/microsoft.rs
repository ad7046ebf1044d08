// file: src/calendar/microsoft.rs
//
// Outlook calendar-view listing. The API reports event times as a naive
// timestamp plus a time zone name; only UTC payloads are converted here.

use chrono::{DateTime, NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};
use crate::models::{CalendarProvider, RemoteEvent};

#[derive(Debug, Deserialize)]
struct OutlookEventsResponse {
    #[serde(default)]
    value: Vec<OutlookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OutlookEvent {
    id: String,
    subject: Option<String>,
    body_preview: Option<String>,
    start: Option<OutlookEventTime>,
    end: Option<OutlookEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OutlookEventTime {
    date_time: Option<String>,
    time_zone: Option<String>,
}

pub fn build_events_url(
    events_url: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<String> {
    let mut url = Url::parse(events_url)
        .map_err(|e| AppError::config(format!("Invalid events URL: {e}")))?;

    url.query_pairs_mut()
        .append_pair(
            "startDateTime",
            &start.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        )
        .append_pair("endDateTime", &end.format("%Y-%m-%dT%H:%M:%SZ").to_string());

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
        .ok_or_else(|| AppError::config("No events endpoint configured for microsoft"))?;
    let url = build_events_url(events_url, start, end)?;

    let response = client
        .get(url)
        .header("Authorization", format!("Bearer {access_token}"))
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(AppError::sync(
            CalendarProvider::Microsoft.as_str(),
            format!("Event fetch failed: {}", response.status()),
        ));
    }

    let body: OutlookEventsResponse = response.json().await?;
    Ok(body.value.into_iter().map(convert_event).collect())
}

fn convert_event(event: OutlookEvent) -> RemoteEvent {
    RemoteEvent {
        external_id: event.id,
        provider: CalendarProvider::Microsoft,
        title: event
            .subject
            .unwrap_or_else(|| "Untitled Event".to_string()),
        description: event.body_preview,
        starts_at: event.start.and_then(parse_event_time),
        ends_at: event.end.and_then(parse_event_time),
    }
}

fn parse_event_time(time: OutlookEventTime) -> Option<DateTime<Utc>> {
    if !matches!(time.time_zone.as_deref(), Some("UTC") | None) {
        return None;
    }
    let raw = time.date_time?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
