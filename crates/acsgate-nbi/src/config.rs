// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the NBI client.

use std::time::Duration;

use crate::error::{NbiError, Result};

/// Configuration for the NbiClient.
#[derive(Debug, Clone)]
pub struct NbiConfig {
    /// Base URL of the ACS northbound interface.
    pub base_url: String,
    /// Overall timeout for a single request to the ACS.
    pub request_timeout: Duration,
    /// How long the ACS should hold a connection-request session open
    /// before answering a bounded task submission. Sent to the ACS as the
    /// `timeout` query flag; the wait happens upstream, not in this process.
    pub connection_request_timeout: Duration,
}

impl Default for NbiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7557".to_string(), // GenieACS NBI default port
            request_timeout: Duration::from_secs(30),
            connection_request_timeout: Duration::from_millis(3000),
        }
    }
}

impl NbiConfig {
    /// Create a new configuration with default values.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACSGATE_NBI_URL`: ACS northbound base URL (required)
    /// - `ACSGATE_NBI_TIMEOUT_MS`: request timeout in milliseconds (default: 30000)
    /// - `ACSGATE_CONNECTION_REQUEST_TIMEOUT_MS`: ACS-side session wait in
    ///   milliseconds (default: 3000)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("ACSGATE_NBI_URL")
            .map_err(|_| NbiError::Config("ACSGATE_NBI_URL is required".to_string()))?;

        let request_timeout_ms: u64 = std::env::var("ACSGATE_NBI_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse()
            .map_err(|e| NbiError::Config(format!("invalid ACSGATE_NBI_TIMEOUT_MS: {}", e)))?;

        let connection_request_timeout_ms: u64 =
            std::env::var("ACSGATE_CONNECTION_REQUEST_TIMEOUT_MS")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| {
                    NbiError::Config(format!(
                        "invalid ACSGATE_CONNECTION_REQUEST_TIMEOUT_MS: {}",
                        e
                    ))
                })?;

        Ok(Self {
            base_url,
            request_timeout: Duration::from_millis(request_timeout_ms),
            connection_request_timeout: Duration::from_millis(connection_request_timeout_ms),
        })
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the ACS-side connection-request wait.
    pub fn with_connection_request_timeout(mut self, timeout: Duration) -> Self {
        self.connection_request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NbiConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:7557");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.connection_request_timeout, Duration::from_millis(3000));
    }

    #[test]
    fn test_builder_methods() {
        let config = NbiConfig::new("http://acs.example.net:7557")
            .with_request_timeout(Duration::from_secs(5))
            .with_connection_request_timeout(Duration::from_secs(1));

        assert_eq!(config.base_url, "http://acs.example.net:7557");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.connection_request_timeout, Duration::from_secs(1));
    }
}
