// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! NbiClient for talking to the ACS northbound interface.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::config::NbiConfig;
use crate::credentials::{
    PppoeCredentials, WirelessCredentials, pppoe_bounce_task, pppoe_credential_task, wireless_task,
};
use crate::error::{NbiError, Result};
use crate::task::DeviceTask;

/// Client for the ACS northbound interface.
///
/// Translates domain commands into the ACS's query and task schemas and
/// performs the HTTP calls. Business validation is the caller's job; this
/// client only classifies transport and status failures. It never retries —
/// task retry is an explicit ACS operation ([`NbiClient::retry_task`]).
pub struct NbiClient {
    http: reqwest::Client,
    config: NbiConfig,
}

impl NbiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NbiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| NbiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(NbiConfig::from_env()?)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &NbiConfig {
        &self.config
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Task-submission endpoint. Every submission carries the
    /// `connection_request` flag so the ACS tries to open a session with the
    /// device immediately instead of waiting for its next scheduled inform;
    /// bounded submissions additionally cap how long the ACS holds the
    /// request open for that session.
    fn tasks_endpoint(&self, device_id: &str, bounded: bool) -> String {
        let base = self.endpoint(&format!("/devices/{}/tasks", urlencoding::encode(device_id)));
        if bounded {
            format!(
                "{}?timeout={}&connection_request",
                base,
                self.config.connection_request_timeout.as_millis()
            )
        } else {
            format!("{}?connection_request", base)
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(NbiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn query_devices(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let response = self.http.get(self.endpoint(path)).query(query).send().await?;
        let response = Self::check(response).await?;
        response
            .json()
            .await
            .map_err(|e| NbiError::UnexpectedResponse(e.to_string()))
    }

    async fn post_task(&self, device_id: &str, task: &DeviceTask, bounded: bool) -> Result<()> {
        let response = self
            .http
            .post(self.tasks_endpoint(device_id, bounded))
            .json(task)
            .send()
            .await?;
        let response = Self::check(response).await?;
        debug!(status = response.status().as_u16(), kind = task.kind(), "Task accepted by ACS");
        Ok(())
    }

    // =========================================================================
    // Device queries
    // =========================================================================

    /// Fetch a device document by its full identifier.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn device_by_id(&self, device_id: &str) -> Result<Value> {
        let query = json!({"_id": device_id});
        self.query_devices("/devices", &[("query", query.to_string())])
            .await
    }

    /// Find a device by the MAC address of its WAN IP connection.
    #[instrument(skip(self), fields(mac = %mac))]
    pub async fn device_by_mac(&self, mac: &str) -> Result<Value> {
        let query = json!({
            "InternetGatewayDevice.WANDevice.1.WANConnectionDevice.1.WANIPConnection.1.MACAddress": mac,
        });
        self.query_devices("/devices", &[("query", query.to_string())])
            .await
    }

    /// List devices whose last inform is older than the given instant.
    #[instrument(skip(self), fields(before = %before))]
    pub async fn devices_informed_before(&self, before: DateTime<Utc>) -> Result<Value> {
        let query = json!({
            "_lastInform": {"$lt": before.to_rfc3339_opts(SecondsFormat::Millis, true)},
        });
        self.query_devices("/devices", &[("query", query.to_string())])
            .await
    }

    /// List the ACS task queue entries for a device.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn pending_tasks(&self, device_id: &str) -> Result<Value> {
        let query = json!({"device": device_id});
        self.query_devices("/tasks", &[("query", query.to_string())])
            .await
    }

    /// Fetch selected fields of a device document.
    ///
    /// `projection` is a comma-separated field list, passed through to the
    /// ACS verbatim.
    #[instrument(skip(self), fields(device_id = %device_id, projection = %projection))]
    pub async fn device_projection(&self, device_id: &str, projection: &str) -> Result<Value> {
        let query = json!({"_id": device_id});
        self.query_devices(
            "/devices",
            &[
                ("query", query.to_string()),
                ("projection", projection.to_string()),
            ],
        )
        .await
    }

    /// Delete a device record from the ACS.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn delete_device(&self, device_id: &str) -> Result<()> {
        info!("Deleting device from ACS");
        let response = self
            .http
            .delete(self.endpoint(&format!("/devices/{}", urlencoding::encode(device_id))))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Task dispatch
    // =========================================================================

    /// Submit any task with a bounded connection-request wait.
    ///
    /// Success means the ACS accepted the task request; whether the device
    /// ever executes it is asynchronous and not visible here.
    #[instrument(skip(self, task), fields(device_id = %device_id, kind = task.kind()))]
    pub async fn submit_task(&self, device_id: &str, task: &DeviceTask) -> Result<()> {
        info!("Submitting task");
        self.post_task(device_id, task, true).await
    }

    /// Set the wireless SSID and passphrase on both radios.
    ///
    /// Parameter paths come from the manufacturer radio-profile table; the
    /// whole change is one SetParameterValues task.
    #[instrument(skip(self, request), fields(device_id = %request.device_id, manufacturer = %request.manufacturer))]
    pub async fn set_wireless_credentials(&self, request: &WirelessCredentials) -> Result<()> {
        info!("Setting wireless credentials");
        let task = wireless_task(request);
        self.post_task(&request.device_id, &task, false).await
    }

    /// Set the PPPoE login, then bounce the WAN connection so the device
    /// re-authenticates.
    ///
    /// Two sequential ACS calls. The bounce only runs if the credential write
    /// was accepted; a bounce failure is surfaced as this call's error while
    /// the already-accepted credential write stands (the NBI has no rollback).
    #[instrument(skip(self, request), fields(device_id = %request.device_id, manufacturer = %request.manufacturer))]
    pub async fn set_pppoe_credentials(&self, request: &PppoeCredentials) -> Result<()> {
        info!("Setting PPPoE credentials");
        let credential_task = pppoe_credential_task(request);
        self.post_task(&request.device_id, &credential_task, false)
            .await?;
        info!("PPPoE login accepted, bouncing WAN connection");

        let bounce_task = pppoe_bounce_task(&request.manufacturer);
        self.post_task(&request.device_id, &bounce_task, true).await
    }

    /// Reboot a device.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn reboot_device(&self, device_id: &str) -> Result<()> {
        info!("Rebooting device");
        self.post_task(device_id, &DeviceTask::Reboot, false).await
    }

    /// Refresh a device's whole parameter tree (an empty object name means
    /// "everything"), forcing a fresh inform.
    #[instrument(skip(self), fields(device_id = %device_id))]
    pub async fn refresh_device(&self, device_id: &str) -> Result<()> {
        info!("Refreshing device");
        let task = DeviceTask::RefreshObject {
            object_name: String::new(),
        };
        self.post_task(device_id, &task, false).await
    }

    // =========================================================================
    // Task queue management
    // =========================================================================

    /// Re-run a previously queued task.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn retry_task(&self, task_id: &str) -> Result<()> {
        info!("Retrying task");
        let response = self
            .http
            .post(self.endpoint(&format!("/tasks/{}/retry", urlencoding::encode(task_id))))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Remove a queued task.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn delete_task(&self, task_id: &str) -> Result<()> {
        info!("Deleting task");
        let response = self
            .http
            .delete(self.endpoint(&format!("/tasks/{}", urlencoding::encode(task_id))))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
