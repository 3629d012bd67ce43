// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Device command orchestration.
//!
//! Each command maps to exactly one NBI or repository call and classifies
//! failures into the service taxonomy. Anything that mutates a device only
//! reports HTTP-level acceptance by the ACS; device-side completion is
//! asynchronous and invisible from here.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{info, instrument};

use acsgate_nbi::{DeviceTask, NbiClient, ParameterValue, PppoeCredentials, WirelessCredentials};
use acsgate_store::{DeviceRecord, DeviceRepository};

use crate::error::ApiError;

/// Orchestrates device commands against the ACS and the device store.
#[derive(Clone)]
pub struct DeviceCommandService {
    nbi: Arc<NbiClient>,
    repository: DeviceRepository,
}

impl DeviceCommandService {
    /// Create the service over the shared NBI client and repository.
    pub fn new(nbi: Arc<NbiClient>, repository: DeviceRepository) -> Self {
        Self { nbi, repository }
    }

    /// Resolve a serial fragment to the full device record.
    #[instrument(skip(self), fields(fragment = %fragment))]
    pub async fn device_by_serial(&self, fragment: &str) -> Result<DeviceRecord, ApiError> {
        if fragment.trim().is_empty() {
            return Err(ApiError::invalid_input("serial fragment is required"));
        }
        Ok(self.repository.find_by_serial_fragment(fragment).await?)
    }

    /// Fetch every mirrored device record. Diagnostic use.
    #[instrument(skip(self))]
    pub async fn all_devices(&self) -> Result<Vec<DeviceRecord>, ApiError> {
        Ok(self.repository.all_devices().await?)
    }

    /// Push new wireless credentials to a device.
    #[instrument(skip(self, request), fields(device_id = %request.device_id))]
    pub async fn set_wireless_credentials(
        &self,
        request: &WirelessCredentials,
    ) -> Result<(), ApiError> {
        self.nbi.set_wireless_credentials(request).await?;
        info!("Wireless credentials accepted by ACS");
        Ok(())
    }

    /// Push new PPPoE credentials to a device and bounce its WAN session.
    #[instrument(skip(self, request), fields(device_id = %request.device_id))]
    pub async fn set_pppoe_credentials(&self, request: &PppoeCredentials) -> Result<(), ApiError> {
        self.nbi.set_pppoe_credentials(request).await?;
        info!("PPPoE credentials accepted by ACS");
        Ok(())
    }

    /// Devices whose last inform predates the given instant.
    #[instrument(skip(self), fields(before = %before))]
    pub async fn devices_informed_before(&self, before: DateTime<Utc>) -> Result<Value, ApiError> {
        Ok(self.nbi.devices_informed_before(before).await?)
    }

    /// Queued ACS tasks for a device.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn device_tasks(&self, device_id: &str) -> Result<Value, ApiError> {
        Ok(self.nbi.pending_tasks(device_id).await?)
    }

    /// Selected fields of a device document.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn device_projection(
        &self,
        device_id: &str,
        projection: &str,
    ) -> Result<Value, ApiError> {
        Ok(self.nbi.device_projection(device_id, projection).await?)
    }

    /// Force a full parameter-tree refresh (a fresh inform).
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn refresh(&self, device_id: &str) -> Result<(), ApiError> {
        if device_id.trim().is_empty() {
            return Err(ApiError::invalid_input("device ID is required"));
        }
        self.nbi
            .refresh_device(device_id)
            .await
            .map_err(|e| ApiError::InvalidOperation(format!("failed to refresh device: {}", e)))
    }

    /// Submit a GetParameterValues task.
    #[instrument(skip(self, parameter_names), fields(device_id = %device_id))]
    pub async fn get_parameter_values(
        &self,
        device_id: &str,
        parameter_names: Vec<String>,
    ) -> Result<(), ApiError> {
        let task = DeviceTask::GetParameterValues { parameter_names };
        Ok(self.nbi.submit_task(device_id, &task).await?)
    }

    /// Submit a SetParameterValues task.
    #[instrument(skip(self, parameter_values), fields(device_id = %device_id))]
    pub async fn set_parameter_values(
        &self,
        device_id: &str,
        parameter_values: Vec<ParameterValue>,
    ) -> Result<(), ApiError> {
        let task = DeviceTask::SetParameterValues { parameter_values };
        Ok(self.nbi.submit_task(device_id, &task).await?)
    }

    /// Submit a RefreshObject task for one subtree.
    #[instrument(skip(self), fields(device_id = %device_id, object_name = %object_name))]
    pub async fn refresh_object(
        &self,
        device_id: &str,
        object_name: String,
    ) -> Result<(), ApiError> {
        let task = DeviceTask::RefreshObject { object_name };
        Ok(self.nbi.submit_task(device_id, &task).await?)
    }

    /// Submit an AddObject task.
    #[instrument(skip(self), fields(device_id = %device_id, object_name = %object_name))]
    pub async fn add_object(&self, device_id: &str, object_name: String) -> Result<(), ApiError> {
        let task = DeviceTask::AddObject { object_name };
        Ok(self.nbi.submit_task(device_id, &task).await?)
    }

    /// Submit a DeleteObject task.
    #[instrument(skip(self), fields(device_id = %device_id, object_name = %object_name))]
    pub async fn delete_object(
        &self,
        device_id: &str,
        object_name: String,
    ) -> Result<(), ApiError> {
        let task = DeviceTask::DeleteObject { object_name };
        Ok(self.nbi.submit_task(device_id, &task).await?)
    }

    /// Submit a Reboot task.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn reboot(&self, device_id: &str) -> Result<(), ApiError> {
        Ok(self.nbi.submit_task(device_id, &DeviceTask::Reboot).await?)
    }

    /// Submit a FactoryReset task.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn factory_reset(&self, device_id: &str) -> Result<(), ApiError> {
        Ok(self
            .nbi
            .submit_task(device_id, &DeviceTask::FactoryReset)
            .await?)
    }
}
