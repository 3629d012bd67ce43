// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration loading from environment variables.

use std::net::SocketAddr;
use std::time::Duration;

use acsgate_nbi::NbiConfig;
use acsgate_store::StoreConfig;

/// acsgate server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen address.
    pub listen_addr: SocketAddr,
    /// API key expected on the command surface.
    pub api_key: String,
    /// Store health check cadence.
    pub monitor_interval: Duration,
    /// How often the supervisor polls the health flag.
    pub supervisor_interval: Duration,
    /// ACS northbound client configuration.
    pub nbi: NbiConfig,
    /// Device store configuration.
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `ACSGATE_API_KEY`: bearer key for the command surface
    /// - `ACSGATE_NBI_URL`: ACS northbound base URL
    /// - `ACSGATE_MONGO_URL`: device store connection string
    ///
    /// Optional (with defaults):
    /// - `ACSGATE_LISTEN_ADDR`: HTTP listen address (default: 0.0.0.0:8080)
    /// - `ACSGATE_MONITOR_INTERVAL_MS`: health check cadence (default: 3000)
    /// - `ACSGATE_SUPERVISOR_INTERVAL_MS`: supervisor poll cadence (default: 5000)
    /// - `ACSGATE_NBI_TIMEOUT_MS`, `ACSGATE_CONNECTION_REQUEST_TIMEOUT_MS`,
    ///   `ACSGATE_MONGO_DATABASE`, `ACSGATE_MONGO_COLLECTION`: see the
    ///   NBI and store crates
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr: SocketAddr = std::env::var("ACSGATE_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("ACSGATE_LISTEN_ADDR", "must be a socket address")
            })?;

        let api_key =
            std::env::var("ACSGATE_API_KEY").map_err(|_| ConfigError::Missing("ACSGATE_API_KEY"))?;

        let monitor_interval_ms: u64 = std::env::var("ACSGATE_MONITOR_INTERVAL_MS")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("ACSGATE_MONITOR_INTERVAL_MS", "must be milliseconds")
            })?;

        let supervisor_interval_ms: u64 = std::env::var("ACSGATE_SUPERVISOR_INTERVAL_MS")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("ACSGATE_SUPERVISOR_INTERVAL_MS", "must be milliseconds")
            })?;

        let nbi = NbiConfig::from_env().map_err(|e| ConfigError::Component(e.to_string()))?;
        let store = StoreConfig::from_env().map_err(|e| ConfigError::Component(e.to_string()))?;

        Ok(Self {
            listen_addr,
            api_key,
            monitor_interval: Duration::from_millis(monitor_interval_ms),
            supervisor_interval: Duration::from_millis(supervisor_interval_ms),
            nbi,
            store,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),

    /// A component configuration failed to load.
    #[error("{0}")]
    Component(String),
}
