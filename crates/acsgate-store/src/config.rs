// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the device document store.

use crate::error::{Result, StoreError};

/// Configuration for the store handle.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// MongoDB connection string.
    pub url: String,
    /// Database holding the ACS's mirrored collections.
    pub database: String,
    /// Device collection name.
    pub collection: String,
}

impl StoreConfig {
    /// Create a new configuration for the given connection string.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: "genieacs".to_string(),
            collection: "devices".to_string(),
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ACSGATE_MONGO_URL`: connection string (required)
    /// - `ACSGATE_MONGO_DATABASE`: database name (default: "genieacs")
    /// - `ACSGATE_MONGO_COLLECTION`: device collection (default: "devices")
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("ACSGATE_MONGO_URL")
            .map_err(|_| StoreError::Config("ACSGATE_MONGO_URL is required".to_string()))?;

        let database =
            std::env::var("ACSGATE_MONGO_DATABASE").unwrap_or_else(|_| "genieacs".to_string());

        let collection =
            std::env::var("ACSGATE_MONGO_COLLECTION").unwrap_or_else(|_| "devices".to_string());

        Ok(Self {
            url,
            database,
            collection,
        })
    }

    /// Set the database name.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the device collection name.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}
