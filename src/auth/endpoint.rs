// file: src/auth/endpoint.rs
//
// Provider token endpoint collaborator. Requests are form-encoded per the
// OAuth spec; responses carry {access_token, refresh_token?, expires_in}.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};
use crate::http_config::HttpConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u64,
}

#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    /// Exchange an authorization code for tokens.
    async fn exchange_code(
        &self,
        config: &ProviderConfig,
        code: &str,
        redirect_uri: &str,
    ) -> AppResult<TokenResponse>;

    /// Trade a refresh token for a new access token.
    async fn refresh(
        &self,
        config: &ProviderConfig,
        refresh_token: &str,
    ) -> AppResult<TokenResponse>;
}

/// Real HTTP implementation backed by reqwest.
pub struct HttpTokenEndpoint {
    client: Client,
}

impl HttpTokenEndpoint {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            client: HttpConfig::oauth().build_client()?,
        })
    }
}

#[async_trait]
impl TokenEndpoint for HttpTokenEndpoint {
    async fn exchange_code(
        &self,
        config: &ProviderConfig,
        code: &str,
        redirect_uri: &str,
    ) -> AppResult<TokenResponse> {
        let response = self
            .client
            .post(&config.token_url)
            .form(&[
                ("client_id", config.client_id.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::auth(format!(
                "Token exchange failed: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn refresh(
        &self,
        config: &ProviderConfig,
        refresh_token: &str,
    ) -> AppResult<TokenResponse> {
        let response = self
            .client
            .post(&config.token_url)
            .form(&[
                ("client_id", config.client_id.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::auth(format!(
                "Token refresh rejected: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}
