// Token lifecycle management.
//
// `TokenManager` produces a valid access token for a provider, hiding the
// refresh/expiry mechanics from callers. Every mutation of the token map is
// written through whole to storage.

use std::collections::HashMap;

use chrono::Utc;
use log::info;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::models::{CalendarProvider, TokenRecord};
use crate::storage::Storage;
use crate::utils::logging::log_auth_event;

pub mod endpoint;
pub mod flow;

pub use endpoint::{HttpTokenEndpoint, TokenEndpoint, TokenResponse};
pub use flow::{IdentityFlow, UnattendedFlow};

pub struct TokenManager {
    config: AuthConfig,
    storage: Storage,
    tokens: HashMap<CalendarProvider, TokenRecord>,
    identity: Box<dyn IdentityFlow>,
    endpoint: Box<dyn TokenEndpoint>,
}

impl TokenManager {
    /// Load previously persisted tokens before anything else runs. Callers
    /// get a manager whose map is already populated (or empty on first run);
    /// no token operation can observe a half-initialized store.
    pub async fn load(
        storage: Storage,
        config: AuthConfig,
        identity: Box<dyn IdentityFlow>,
        endpoint: Box<dyn TokenEndpoint>,
    ) -> AppResult<Self> {
        let tokens = storage.load_tokens().await?;
        if !tokens.is_empty() {
            info!("Loaded stored tokens for {} provider(s)", tokens.len());
        }
        Ok(Self {
            config,
            storage,
            tokens,
            identity,
            endpoint,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn is_authenticated(&self, provider: CalendarProvider) -> bool {
        self.tokens.contains_key(&provider)
    }

    /// Current stored record, if any. Read-only view for display/tests.
    pub fn record(&self, provider: CalendarProvider) -> Option<&TokenRecord> {
        self.tokens.get(&provider)
    }

    /// Run the interactive authorization-code flow for a provider and store
    /// the resulting tokens.
    pub async fn authenticate(&mut self, provider: CalendarProvider) -> AppResult<()> {
        let provider_config = self.config.provider(provider)?.clone();
        log_auth_event("Interactive authentication started", provider.as_str());

        let auth_url = flow::build_auth_url(&provider_config, &self.config.redirect_uri)?;
        let redirect_url = self.identity.launch(&auth_url).await?;
        let code = flow::extract_auth_code(&redirect_url)?;

        let response = self
            .endpoint
            .exchange_code(&provider_config, &code, &self.config.redirect_uri)
            .await?;

        let record = TokenRecord::new(
            response.access_token,
            response.refresh_token,
            Utc::now(),
            response.expires_in,
        );
        self.tokens.insert(provider, record);
        self.storage.save_tokens(&self.tokens).await?;

        log_auth_event("Authentication succeeded", provider.as_str());
        Ok(())
    }

    /// Return a currently valid access token, refreshing first when the
    /// stored one has expired. `Ok(None)` when the provider was never
    /// authenticated. This read may perform network I/O.
    pub async fn access_token(
        &mut self,
        provider: CalendarProvider,
    ) -> AppResult<Option<String>> {
        let expired = match self.tokens.get(&provider) {
            None => return Ok(None),
            Some(record) => record.is_expired(Utc::now()),
        };

        if expired {
            self.refresh(provider).await?;
        }

        Ok(self
            .tokens
            .get(&provider)
            .map(|record| record.access_token.clone()))
    }

    /// Replace the stored access token via the refresh grant. The old record
    /// stays untouched unless the endpoint call succeeds; the refresh token
    /// is preserved unless the provider issued a new one.
    pub async fn refresh(&mut self, provider: CalendarProvider) -> AppResult<()> {
        let refresh_token = self
            .tokens
            .get(&provider)
            .and_then(|record| record.refresh_token.clone())
            .ok_or_else(|| AppError::auth("No refresh token available"))?;

        let provider_config = self.config.provider(provider)?.clone();
        let response = self.endpoint.refresh(&provider_config, &refresh_token).await?;

        let record = TokenRecord::new(
            response.access_token,
            response.refresh_token.or(Some(refresh_token)),
            Utc::now(),
            response.expires_in,
        );
        self.tokens.insert(provider, record);
        self.storage.save_tokens(&self.tokens).await?;

        log_auth_event("Access token refreshed", provider.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use async_trait::async_trait;
    use chrono::Duration;
    use mockall::mock;

    mock! {
        pub Identity {}

        #[async_trait]
        impl IdentityFlow for Identity {
            async fn launch(&self, auth_url: &str) -> AppResult<String>;
        }
    }

    mock! {
        pub Endpoint {}

        #[async_trait]
        impl TokenEndpoint for Endpoint {
            async fn exchange_code(
                &self,
                config: &ProviderConfig,
                code: &str,
                redirect_uri: &str,
            ) -> AppResult<TokenResponse>;

            async fn refresh(
                &self,
                config: &ProviderConfig,
                refresh_token: &str,
            ) -> AppResult<TokenResponse>;
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig::with_provider(
            "https://app.local/oauth2".to_string(),
            CalendarProvider::Google,
            ProviderConfig {
                client_id: "client-123".to_string(),
                auth_url: "https://accounts.example.com/auth".to_string(),
                token_url: "https://accounts.example.com/token".to_string(),
                events_url: None,
                scopes: vec!["calendar.read".to_string()],
            },
        )
    }

    async fn manager_with(
        identity: MockIdentity,
        endpoint: MockEndpoint,
    ) -> TokenManager {
        let storage = Storage::in_memory().await.unwrap();
        TokenManager::load(storage, test_config(), Box::new(identity), Box::new(endpoint))
            .await
            .unwrap()
    }

    fn stored_record(expired: bool, refresh_token: Option<&str>) -> TokenRecord {
        let issued = if expired {
            Utc::now() - Duration::seconds(7200)
        } else {
            Utc::now()
        };
        TokenRecord::new(
            "old-access".to_string(),
            refresh_token.map(str::to_string),
            issued,
            3600,
        )
    }

    #[tokio::test]
    async fn test_access_token_none_without_record() {
        let mut manager = manager_with(MockIdentity::new(), MockEndpoint::new()).await;
        let token = manager.access_token(CalendarProvider::Google).await.unwrap();
        assert!(token.is_none());
    }

    #[tokio::test]
    async fn test_access_token_skips_refresh_when_valid() {
        let mut endpoint = MockEndpoint::new();
        endpoint.expect_refresh().times(0);

        let mut manager = manager_with(MockIdentity::new(), endpoint).await;
        manager
            .tokens
            .insert(CalendarProvider::Google, stored_record(false, Some("r1")));

        let token = manager.access_token(CalendarProvider::Google).await.unwrap();
        assert_eq!(token.as_deref(), Some("old-access"));
    }

    #[tokio::test]
    async fn test_expired_token_refreshed_exactly_once() {
        let mut endpoint = MockEndpoint::new();
        endpoint
            .expect_refresh()
            .withf(|_, refresh_token| refresh_token == "r1")
            .times(1)
            .returning(|_, _| {
                Ok(TokenResponse {
                    access_token: "new-access".to_string(),
                    refresh_token: None,
                    expires_in: 3600,
                })
            });

        let mut manager = manager_with(MockIdentity::new(), endpoint).await;
        manager
            .tokens
            .insert(CalendarProvider::Google, stored_record(true, Some("r1")));
        let old_expiry = manager.record(CalendarProvider::Google).unwrap().expires_at;

        let token = manager.access_token(CalendarProvider::Google).await.unwrap();
        assert_eq!(token.as_deref(), Some("new-access"));

        let record = manager.record(CalendarProvider::Google).unwrap();
        assert!(record.expires_at > old_expiry);
        // endpoint omitted a refresh token, the stored one is preserved
        assert_eq!(record.refresh_token.as_deref(), Some("r1"));
    }

    #[tokio::test]
    async fn test_refresh_adopts_newly_issued_refresh_token() {
        let mut endpoint = MockEndpoint::new();
        endpoint.expect_refresh().times(1).returning(|_, _| {
            Ok(TokenResponse {
                access_token: "new-access".to_string(),
                refresh_token: Some("r2".to_string()),
                expires_in: 3600,
            })
        });

        let mut manager = manager_with(MockIdentity::new(), endpoint).await;
        manager
            .tokens
            .insert(CalendarProvider::Google, stored_record(true, Some("r1")));

        manager.refresh(CalendarProvider::Google).await.unwrap();
        let record = manager.record(CalendarProvider::Google).unwrap();
        assert_eq!(record.refresh_token.as_deref(), Some("r2"));
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_fails_unchanged() {
        let mut endpoint = MockEndpoint::new();
        endpoint.expect_refresh().times(0);

        let mut manager = manager_with(MockIdentity::new(), endpoint).await;
        let record = stored_record(true, None);
        manager.tokens.insert(CalendarProvider::Google, record.clone());

        let err = manager.refresh(CalendarProvider::Google).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
        assert_eq!(manager.record(CalendarProvider::Google), Some(&record));
    }

    #[tokio::test]
    async fn test_rejected_refresh_leaves_record_untouched() {
        let mut endpoint = MockEndpoint::new();
        endpoint
            .expect_refresh()
            .times(1)
            .returning(|_, _| Err(AppError::auth("Token refresh rejected: 400 Bad Request")));

        let mut manager = manager_with(MockIdentity::new(), endpoint).await;
        let record = stored_record(true, Some("r1"));
        manager.tokens.insert(CalendarProvider::Google, record.clone());

        let err = manager.access_token(CalendarProvider::Google).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
        assert_eq!(manager.record(CalendarProvider::Google), Some(&record));
    }

    #[tokio::test]
    async fn test_authenticate_stores_and_persists_record() {
        let mut identity = MockIdentity::new();
        identity
            .expect_launch()
            .times(1)
            .returning(|_| Ok("https://app.local/oauth2?code=abc123".to_string()));

        let mut endpoint = MockEndpoint::new();
        endpoint
            .expect_exchange_code()
            .withf(|_, code, redirect_uri| {
                code == "abc123" && redirect_uri == "https://app.local/oauth2"
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(TokenResponse {
                    access_token: "fresh".to_string(),
                    refresh_token: Some("r1".to_string()),
                    expires_in: 1800,
                })
            });

        let storage = Storage::in_memory().await.unwrap();
        let mut manager = TokenManager::load(
            storage.clone(),
            test_config(),
            Box::new(identity),
            Box::new(endpoint),
        )
        .await
        .unwrap();

        manager.authenticate(CalendarProvider::Google).await.unwrap();
        assert!(manager.is_authenticated(CalendarProvider::Google));

        // write-through: a fresh manager sees the persisted record
        let persisted = storage.load_tokens().await.unwrap();
        assert_eq!(
            persisted[&CalendarProvider::Google].access_token,
            "fresh"
        );
    }

    #[tokio::test]
    async fn test_authenticate_cancelled_flow() {
        let mut identity = MockIdentity::new();
        identity
            .expect_launch()
            .times(1)
            .returning(|_| Err(AppError::auth("Consent flow cancelled")));

        let mut endpoint = MockEndpoint::new();
        endpoint.expect_exchange_code().times(0);

        let mut manager = manager_with(identity, endpoint).await;
        let err = manager.authenticate(CalendarProvider::Google).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
        assert!(!manager.is_authenticated(CalendarProvider::Google));
    }

    #[tokio::test]
    async fn test_authenticate_redirect_without_code() {
        let mut identity = MockIdentity::new();
        identity
            .expect_launch()
            .times(1)
            .returning(|_| Ok("https://app.local/oauth2?error=access_denied".to_string()));

        let mut endpoint = MockEndpoint::new();
        endpoint.expect_exchange_code().times(0);

        let mut manager = manager_with(identity, endpoint).await;
        let err = manager.authenticate(CalendarProvider::Google).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }
}
