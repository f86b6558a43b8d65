//! Remote collection configuration.

use crate::remote::user_api::{RemoteResult, RemoteSyncError};
use std::time::Duration;

/// Public placeholder API serving the `/users` collection.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the remote user collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Scheme + host (+ optional path prefix), no trailing slash.
    pub base_url: String,
    /// Whole-request timeout applied by the transport.
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RemoteConfig {
    /// Builds a config for `base_url` with the default timeout.
    ///
    /// # Errors
    /// - Returns `RemoteSyncError::InvalidConfig` when `base_url` is empty or
    ///   not an `http(s)://` URL.
    pub fn new(base_url: &str) -> RemoteResult<Self> {
        let config = Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        };
        config.validate()?;
        Ok(config)
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks base URL shape and timeout.
    pub fn validate(&self) -> RemoteResult<()> {
        if self.base_url.is_empty() {
            return Err(RemoteSyncError::InvalidConfig(
                "base_url cannot be empty".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(RemoteSyncError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got `{}`",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(RemoteSyncError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
