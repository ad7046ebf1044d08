// Calendar sync orchestration.
//
// For a provider and a date range, fetch the external events or fail
// cleanly. Dispatch is exhaustive over the provider enum; each adapter is
// one bounded-range round trip with no pagination or local caching.

use std::time::Instant;

use chrono::{DateTime, Duration, Utc};
use log::info;
use reqwest::Client;

use crate::auth::TokenManager;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;
use crate::models::{CalendarProvider, RemoteEvent, SyncOutcome};
use crate::utils::logging::{log_calendar_sync, log_error_with_context};

pub mod apple;
pub mod google;
pub mod grid;
pub mod microsoft;

/// Look-ahead window the periodic driver syncs, in days.
pub const SYNC_WINDOW_DAYS: i64 = 30;

pub struct CalendarSync {
    auth: TokenManager,
    http: Client,
}

impl CalendarSync {
    pub fn new(auth: TokenManager) -> AppResult<Self> {
        Ok(Self {
            auth,
            http: HttpConfig::calendar_api().build_client()?,
        })
    }

    pub fn auth(&self) -> &TokenManager {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut TokenManager {
        &mut self.auth
    }

    /// Fetch a provider's events within `[start, end)`.
    ///
    /// Obtaining the token may refresh it, so this can touch the token
    /// endpoint before the event endpoint.
    pub async fn sync_events(
        &mut self,
        provider: CalendarProvider,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RemoteEvent>> {
        let access_token = self
            .auth
            .access_token(provider)
            .await?
            .ok_or_else(|| AppError::auth("Not authenticated"))?;
        let provider_config = self.auth.config().provider(provider)?.clone();

        let started = Instant::now();
        let events = match provider {
            CalendarProvider::Google => {
                google::fetch_events(&self.http, &provider_config, &access_token, start, end)
                    .await?
            }
            CalendarProvider::Microsoft => {
                microsoft::fetch_events(&self.http, &provider_config, &access_token, start, end)
                    .await?
            }
            CalendarProvider::Apple => {
                apple::fetch_events(&self.http, &provider_config, &access_token, start, end)
                    .await?
            }
        };

        log_calendar_sync(
            provider.as_str(),
            events.len(),
            started.elapsed().as_millis() as u64,
        );
        Ok(events)
    }

    /// One pass over every authenticated provider with the fixed look-ahead
    /// window. A provider's failure is logged and recorded but never aborts
    /// the rest of the round.
    pub async fn sync_round(&mut self, window_days: i64) -> Vec<SyncOutcome> {
        let start = Utc::now();
        let end = start + Duration::days(window_days);
        let mut outcomes = Vec::new();

        for provider in CalendarProvider::ALL {
            if !self.auth.is_authenticated(provider) {
                continue;
            }

            match self.sync_events(provider, start, end).await {
                Ok(events) => {
                    info!("Synced {} events from {}", events.len(), provider);
                    outcomes.push(SyncOutcome::success(provider, events.len()));
                }
                Err(error) => {
                    log_error_with_context(&error, "Sync");
                    outcomes.push(SyncOutcome::failure(provider, error.to_safe_string()));
                }
            }
        }

        outcomes
    }
}
