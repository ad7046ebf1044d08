//! Provider OAuth configuration.
//!
//! Endpoints and scopes are fixed per provider; client ids and the redirect
//! URI come from the environment so packaged builds can ship their own
//! registration. Apple has no event endpoint here because its sync adapter
//! is not implemented.

use std::collections::HashMap;
use std::env;

use log::{info, warn};
use url::Url;

use crate::error::{AppError, AppResult};
use crate::models::CalendarProvider;

const DEFAULT_REDIRECT_URI: &str = "https://xcalendar.local/oauth2";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub auth_url: String,
    pub token_url: String,
    pub events_url: Option<String>,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub redirect_uri: String,
    providers: HashMap<CalendarProvider, ProviderConfig>,
}

impl AuthConfig {
    /// Build the provider table from the environment, falling back to
    /// placeholder client ids so a first run still starts up.
    pub fn from_env() -> Self {
        let mut providers = HashMap::new();

        providers.insert(
            CalendarProvider::Google,
            ProviderConfig {
                client_id: env::var("XCAL_GOOGLE_CLIENT_ID")
                    .unwrap_or_else(|_| "your-google-client-id".to_string()),
                auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
                token_url: "https://oauth2.googleapis.com/token".to_string(),
                events_url: Some(
                    "https://www.googleapis.com/calendar/v3/calendars/primary/events".to_string(),
                ),
                scopes: vec![
                    "https://www.googleapis.com/auth/calendar.readonly".to_string(),
                    "https://www.googleapis.com/auth/calendar.events.readonly".to_string(),
                ],
            },
        );

        providers.insert(
            CalendarProvider::Microsoft,
            ProviderConfig {
                client_id: env::var("XCAL_MICROSOFT_CLIENT_ID")
                    .unwrap_or_else(|_| "your-microsoft-client-id".to_string()),
                auth_url: "https://login.microsoftonline.com/common/oauth2/v2.0/authorize"
                    .to_string(),
                token_url: "https://login.microsoftonline.com/common/oauth2/v2.0/token"
                    .to_string(),
                events_url: Some("https://outlook.office.com/api/v2.0/me/calendarview".to_string()),
                scopes: vec![
                    "openid".to_string(),
                    "profile".to_string(),
                    "offline_access".to_string(),
                    "https://outlook.office.com/calendars.read".to_string(),
                ],
            },
        );

        providers.insert(
            CalendarProvider::Apple,
            ProviderConfig {
                client_id: env::var("XCAL_APPLE_CLIENT_ID")
                    .unwrap_or_else(|_| "your-apple-client-id".to_string()),
                auth_url: "https://appleid.apple.com/auth/authorize".to_string(),
                token_url: "https://appleid.apple.com/auth/token".to_string(),
                events_url: None,
                scopes: vec!["name".to_string(), "email".to_string()],
            },
        );

        Self {
            redirect_uri: env::var("XCAL_REDIRECT_URI")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
            providers,
        }
    }

    /// Build a config with a single provider entry. Test seam: points the
    /// provider's endpoints at a local mock server.
    pub fn with_provider(
        redirect_uri: String,
        provider: CalendarProvider,
        config: ProviderConfig,
    ) -> Self {
        let mut providers = HashMap::new();
        providers.insert(provider, config);
        Self {
            redirect_uri,
            providers,
        }
    }

    /// Insert or replace one provider's entry.
    pub fn set_provider(&mut self, provider: CalendarProvider, config: ProviderConfig) {
        self.providers.insert(provider, config);
    }

    pub fn provider(&self, provider: CalendarProvider) -> AppResult<&ProviderConfig> {
        self.providers
            .get(&provider)
            .ok_or_else(|| AppError::auth(format!("Provider not configured: {provider}")))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Startup validation: endpoint URLs must parse and missing client ids are
/// flagged. A placeholder client id is a warning, not a hard failure, so a
/// fresh checkout still runs.
pub fn validate_config(config: &AuthConfig) -> AppResult<()> {
    Url::parse(&config.redirect_uri)
        .map_err(|e| AppError::config(format!("Invalid redirect URI: {e}")))?;

    for provider in CalendarProvider::ALL {
        let provider_config = config.provider(provider)?;
        Url::parse(&provider_config.auth_url)
            .map_err(|e| AppError::config(format!("Invalid auth URL for {provider}: {e}")))?;
        Url::parse(&provider_config.token_url)
            .map_err(|e| AppError::config(format!("Invalid token URL for {provider}: {e}")))?;
        if let Some(events_url) = &provider_config.events_url {
            Url::parse(events_url)
                .map_err(|e| AppError::config(format!("Invalid events URL for {provider}: {e}")))?;
        }

        if provider_config.client_id.starts_with("your-") {
            warn!(
                "[Config] No client id configured for {provider}; interactive auth will be rejected upstream"
            );
        }
    }

    info!("Configuration validated for {} providers", CalendarProvider::ALL.len());
    Ok(())
}
