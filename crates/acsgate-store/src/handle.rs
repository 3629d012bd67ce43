// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The process-wide store connection handle.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::{Client, Collection};
use tracing::debug;

use crate::config::StoreConfig;
use crate::device::DeviceRecord;
use crate::error::{Result, StoreError};

/// Deadline for a liveness ping against the store.
const PING_TIMEOUT: Duration = Duration::from_secs(2);

/// Handle to the mirrored device collection.
///
/// Constructed once at startup and shared (by `Arc`) with every component
/// that reads the store — the repository and the connection monitor. Nothing
/// closes or replaces it outside orchestrated shutdown. This is the one piece
/// of state all background loops have in common.
#[derive(Clone)]
pub struct StoreHandle {
    client: Client,
    database: String,
    collection: String,
}

impl StoreHandle {
    /// Create a handle from configuration.
    ///
    /// The driver connects lazily; call [`StoreHandle::ping`] after
    /// construction to fail fast on an unreachable store.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.url)
            .await
            .map_err(|e| StoreError::Config(format!("invalid store connection string: {}", e)))?;

        debug!(database = %config.database, collection = %config.collection, "Store handle created");

        Ok(Self {
            client,
            database: config.database.clone(),
            collection: config.collection.clone(),
        })
    }

    /// The typed device collection.
    pub fn devices(&self) -> Collection<DeviceRecord> {
        self.client
            .database(&self.database)
            .collection(&self.collection)
    }

    /// Ping the store with a bounded deadline.
    pub async fn ping(&self) -> Result<()> {
        let admin = self.client.database("admin");
        let command = admin.run_command(doc! {"ping": 1});

        tokio::time::timeout(PING_TIMEOUT, command)
            .await
            .map_err(|_| StoreError::transaction("ping", "timed out"))?
            .map_err(|e| StoreError::transaction("ping", e))?;

        Ok(())
    }
}
