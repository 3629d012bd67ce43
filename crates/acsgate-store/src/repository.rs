// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Read-only device repository with partial-serial resolution.

use std::sync::Arc;
use std::time::Duration;

use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use tracing::{debug, info, instrument, warn};

use crate::device::DeviceRecord;
use crate::error::{Result, StoreError};
use crate::handle::StoreHandle;

/// Deadline for a partial-serial lookup (identifier scan plus record fetch).
const SERIAL_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Deadline for the diagnostic bulk fetch.
const BULK_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The partial-identifier selection rule: the first identifier, in store
/// order, containing the fragment as a substring.
///
/// When several identifiers contain the fragment this deliberately returns
/// whichever the store yields first — deterministic for a fixed store
/// ordering, with no ambiguity detection. Callers wanting a unique answer
/// must supply a fragment long enough to be unique.
pub fn first_matching_id<'a, I>(ids: I, fragment: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter().find(|id| id.contains(fragment))
}

/// Read-only accessor over the mirrored device collection.
#[derive(Clone)]
pub struct DeviceRepository {
    handle: Arc<StoreHandle>,
}

impl DeviceRepository {
    /// Create a repository over the shared store handle.
    pub fn new(handle: Arc<StoreHandle>) -> Self {
        Self { handle }
    }

    /// Resolve a serial-number fragment to the one device whose full
    /// identifier contains it, then fetch the full record.
    #[instrument(skip(self), fields(fragment = %fragment))]
    pub async fn find_by_serial_fragment(&self, fragment: &str) -> Result<DeviceRecord> {
        info!("Resolving device by serial fragment");

        let lookup = self.scan_and_fetch(fragment);
        tokio::time::timeout(SERIAL_LOOKUP_TIMEOUT, lookup)
            .await
            .map_err(|_| StoreError::transaction("serial lookup", "timed out"))?
    }

    async fn scan_and_fetch(&self, fragment: &str) -> Result<DeviceRecord> {
        // Projection-only pass over the identifiers; full documents are far
        // too large to stream for a substring test.
        let keys = self.handle.devices().clone_with_type::<Document>();
        let mut cursor = keys
            .find(doc! {})
            .projection(doc! {"_id": 1})
            .await
            .map_err(|e| StoreError::transaction("identifier scan", e))?;

        let mut ids = Vec::new();
        while let Some(key) = cursor
            .try_next()
            .await
            .map_err(|e| StoreError::transaction("identifier scan", e))?
        {
            match key.get_str("_id") {
                Ok(id) => ids.push(id.to_string()),
                Err(_) => warn!("skipping device key without a string _id"),
            }
        }

        let matched = first_matching_id(ids.iter().map(String::as_str), fragment)
            .ok_or_else(|| StoreError::NotFound(fragment.to_string()))?
            .to_string();

        debug!(resolved_id = %matched, "Serial fragment resolved");

        let record = self
            .handle
            .devices()
            .find_one(doc! {"_id": &matched})
            .await
            .map_err(|e| StoreError::transaction("device fetch", e))?
            .ok_or_else(|| {
                StoreError::transaction("device fetch", "identifier vanished between scan and fetch")
            })?;

        Ok(record)
    }

    /// Fetch every device record. Diagnostic use only.
    ///
    /// Documents that no longer decode as device records are skipped with a
    /// log rather than failing the whole scan.
    #[instrument(skip(self))]
    pub async fn all_devices(&self) -> Result<Vec<DeviceRecord>> {
        info!("Fetching all devices");

        tokio::time::timeout(BULK_FETCH_TIMEOUT, self.fetch_all())
            .await
            .map_err(|_| StoreError::transaction("bulk fetch", "timed out"))?
    }

    async fn fetch_all(&self) -> Result<Vec<DeviceRecord>> {
        let raw = self.handle.devices().clone_with_type::<Document>();
        let mut cursor = raw
            .find(doc! {})
            .await
            .map_err(|e| StoreError::transaction("bulk fetch", e))?;

        let mut devices = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| StoreError::transaction("bulk fetch", e))?
        {
            match mongodb::bson::from_document::<DeviceRecord>(document) {
                Ok(record) => {
                    debug!(id = %record.id, serial = %record.identity.serial_number, "Device found");
                    devices.push(record);
                }
                Err(e) => warn!(error = %e, "skipping undecodable device document"),
            }
        }

        info!(count = devices.len(), "Devices fetched");
        Ok(devices)
    }
}
