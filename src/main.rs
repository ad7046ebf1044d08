// xcalendar background sync daemon.
//
// Headless counterpart of the widget's hourly timer: every tick runs one
// sync round over the authenticated providers with the fixed 30-day window.
// Interactive authentication belongs to the UI; this process only ever
// refreshes stored tokens.

use std::time::Duration;

use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

use xcalendar_core::auth::{HttpTokenEndpoint, TokenManager, UnattendedFlow};
use xcalendar_core::calendar::{CalendarSync, SYNC_WINDOW_DAYS};
use xcalendar_core::config::{validate_config, AuthConfig};
use xcalendar_core::storage::Storage;
use xcalendar_core::utils::logging::init_logging;

const SYNC_INTERVAL_SECS: u64 = 60 * 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let config = AuthConfig::from_env();
    validate_config(&config)?;

    let storage = Storage::new().await?;
    let auth = TokenManager::load(
        storage,
        config,
        Box::new(UnattendedFlow),
        Box::new(HttpTokenEndpoint::new()?),
    )
    .await?;
    let mut sync = CalendarSync::new(auth)?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            error!("Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown requested");
        signal_token.cancel();
    });

    info!("Starting sync loop (every {SYNC_INTERVAL_SECS}s)");
    let mut interval = tokio::time::interval(Duration::from_secs(SYNC_INTERVAL_SECS));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let outcomes = sync.sync_round(SYNC_WINDOW_DAYS).await;
                let failures = outcomes.iter().filter(|o| !o.success).count();
                if failures > 0 {
                    warn!("Sync round finished with {failures} provider failure(s)");
                } else {
                    info!("Sync round finished for {} provider(s)", outcomes.len());
                }
            }
            _ = shutdown.cancelled() => {
                info!("Sync loop stopped");
                break;
            }
        }
    }

    Ok(())
}
