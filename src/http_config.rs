//! HTTP client configuration.
//!
//! Centralizes timeouts for the two kinds of outbound traffic this crate
//! performs: OAuth token exchanges (fail fast) and calendar event fetches
//! (providers can be slow). There is no retry policy here on purpose; every
//! call surfaces exactly one error to its initiator.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Total request timeout
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(45),
        }
    }
}

impl HttpConfig {
    /// Config for OAuth token endpoint calls
    pub fn oauth() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
        }
    }

    /// Config for calendar event listing calls
    pub fn calendar_api() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(90),
        }
    }

    /// Build a reqwest client with this configuration
    pub fn build_client(&self) -> Result<Client, reqwest::Error> {
        ClientBuilder::new()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(2)
            .build()
    }
}
