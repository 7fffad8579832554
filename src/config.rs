//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;

/// Default service endpoint (the 0blivi0n HTTP port).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8571";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the cache service, without a trailing slash
    pub base_url: String,
    /// Whole-request timeout in seconds, enforced by the transport
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl ClientConfig {
    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `OBLIVION_URL` - Service base URL (default: http://localhost:8571)
    /// - `OBLIVION_TIMEOUT` - Request timeout in seconds (default: 30)
    /// - `OBLIVION_CONNECT_TIMEOUT` - Connect timeout in seconds (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("OBLIVION_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_base_url(&v))
                .unwrap_or(defaults.base_url),
            timeout_secs: env::var("OBLIVION_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            connect_timeout_secs: env::var("OBLIVION_CONNECT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.connect_timeout_secs),
        }
    }

    /// Returns a copy of this configuration pointing at another service.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
