// file: src/auth/flow.rs
//
// Interactive consent flow seam. The browser/identity collaborator opens the
// consent page and resolves with the redirect URL; everything around that
// call (URL building, code extraction) is pure and unit-testable.

use async_trait::async_trait;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{AppError, AppResult};

/// Launches an interactive authorization flow and resolves with the full
/// redirect URL the provider sent the user back to.
#[async_trait]
pub trait IdentityFlow: Send + Sync {
    async fn launch(&self, auth_url: &str) -> AppResult<String>;
}

/// Identity seam for the background driver, which never initiates
/// interactive auth; the hourly timer only refreshes stored tokens.
pub struct UnattendedFlow;

#[async_trait]
impl IdentityFlow for UnattendedFlow {
    async fn launch(&self, _auth_url: &str) -> AppResult<String> {
        Err(AppError::auth(
            "Interactive authentication is not available in background sync",
        ))
    }
}

/// Build the consent-page URL for a provider.
pub fn build_auth_url(config: &ProviderConfig, redirect_uri: &str) -> AppResult<String> {
    let mut url = Url::parse(&config.auth_url)
        .map_err(|e| AppError::config(format!("Invalid auth URL: {e}")))?;

    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("scope", &config.scopes.join(" "))
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent");

    Ok(url.into())
}

/// Extract the `code` query parameter from a redirect URL.
pub fn extract_auth_code(redirect_url: &str) -> AppResult<String> {
    let url = Url::parse(redirect_url)
        .map_err(|e| AppError::auth(format!("Invalid redirect URL: {e}")))?;

    url.query_pairs()
        .find(|(key, value)| key == "code" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| AppError::auth("Authorization code not found in redirect"))
}
