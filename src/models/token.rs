// file: src/models/token.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Stored OAuth credentials for one provider.
///
/// `expires_at` is always derived from issue time plus the provider-reported
/// lifetime. A record without a refresh token cannot be silently renewed and
/// forces the user through interactive authentication again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        issued_at: DateTime<Utc>,
        expires_in_secs: u64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_at: issued_at + Duration::seconds(expires_in_secs as i64),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
