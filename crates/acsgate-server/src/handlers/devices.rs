// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Device command handlers.
//!
//! Thin translation: extract, validate, call the one matching service
//! operation, wrap the result in the success envelope.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use acsgate_nbi::{PppoeCredentials, WirelessCredentials};
use acsgate_store::DeviceRecord;

use crate::error::ApiError;
use crate::requests::{
    DeviceSearch, GetParameterValuesRequest, ObjectRequest, SetParameterValuesRequest,
    reject_invalid, validate_pppoe, validate_wireless,
};
use crate::response::ApiSuccess;
use crate::state::AppState;

/// GET /devices/{id} — resolve a partial serial number to the full record.
pub async fn device_by_serial(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Result<ApiSuccess<DeviceRecord>, ApiError> {
    let search = DeviceSearch { serial };
    reject_invalid("device search", search.validate())?;

    let device = state.devices.device_by_serial(&search.serial).await?;
    info!(id = %device.id, "Device fetched");
    Ok(ApiSuccess::with_data("device fetched successfully", device))
}

/// GET /devices — every mirrored record, for diagnostics.
pub async fn all_devices(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<DeviceRecord>>, ApiError> {
    let devices = state.devices.all_devices().await?;
    Ok(ApiSuccess::with_data("devices fetched", devices))
}

#[derive(Debug, Deserialize)]
pub struct LastInformParams {
    timestamp: String,
}

/// GET /devices/last-inform?timestamp= — devices silent since the instant.
pub async fn devices_by_last_inform(
    State(state): State<AppState>,
    Query(params): Query<LastInformParams>,
) -> Result<ApiSuccess<Value>, ApiError> {
    let before: DateTime<Utc> = params
        .timestamp
        .parse()
        .map_err(|_| ApiError::invalid_input("timestamp must be an RFC 3339 instant"))?;

    let devices = state.devices.devices_informed_before(before).await?;
    Ok(ApiSuccess::with_data("devices fetched", devices))
}

/// GET /devices/{id}/tasks — queued ACS tasks for the device.
pub async fn device_tasks(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<ApiSuccess<Value>, ApiError> {
    let tasks = state.devices.device_tasks(&device_id).await?;
    Ok(ApiSuccess::with_data("pending tasks fetched", tasks))
}

#[derive(Debug, Deserialize)]
pub struct ProjectionParams {
    projection: String,
}

/// GET /devices/{id}/projection?projection= — selected document fields.
pub async fn device_projection(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(params): Query<ProjectionParams>,
) -> Result<ApiSuccess<Value>, ApiError> {
    if params.projection.trim().is_empty() {
        return Err(ApiError::invalid_input("projection is required"));
    }

    let fields = state
        .devices
        .device_projection(&device_id, &params.projection)
        .await?;
    Ok(ApiSuccess::with_data("device projection fetched", fields))
}

/// POST /devices/wifi — change wireless credentials.
pub async fn set_wireless_credentials(
    State(state): State<AppState>,
    Json(request): Json<WirelessCredentials>,
) -> Result<ApiSuccess<Value>, ApiError> {
    reject_invalid("wireless credentials", validate_wireless(&request))?;

    state.devices.set_wireless_credentials(&request).await?;
    Ok(ApiSuccess::message("wireless credentials set successfully"))
}

/// POST /devices/pppoe — change PPPoE credentials.
pub async fn set_pppoe_credentials(
    State(state): State<AppState>,
    Json(request): Json<PppoeCredentials>,
) -> Result<ApiSuccess<Value>, ApiError> {
    reject_invalid("PPPoE credentials", validate_pppoe(&request))?;

    state.devices.set_pppoe_credentials(&request).await?;
    Ok(ApiSuccess::message("PPPoE credentials set successfully"))
}

/// POST /devices/{id}/refresh — force a fresh inform.
pub async fn refresh_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<ApiSuccess<Value>, ApiError> {
    state.devices.refresh(&device_id).await?;
    Ok(ApiSuccess::message("device refresh triggered"))
}

/// POST /devices/{id}/get-parameters — queue a parameter read.
pub async fn get_parameter_values(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(request): Json<GetParameterValuesRequest>,
) -> Result<ApiSuccess<Value>, ApiError> {
    reject_invalid("parameter names", request.validate())?;

    state
        .devices
        .get_parameter_values(&device_id, request.parameter_names)
        .await?;
    Ok(ApiSuccess::message("parameter fetch task submitted"))
}

/// POST /devices/{id}/set-parameters — queue a parameter write.
pub async fn set_parameter_values(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(request): Json<SetParameterValuesRequest>,
) -> Result<ApiSuccess<Value>, ApiError> {
    reject_invalid("parameter values", request.validate())?;

    state
        .devices
        .set_parameter_values(&device_id, request.parameter_values)
        .await?;
    Ok(ApiSuccess::message("set parameter task submitted"))
}

/// POST /devices/{id}/refresh-object — queue a subtree refresh.
pub async fn refresh_object(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(request): Json<ObjectRequest>,
) -> Result<ApiSuccess<Value>, ApiError> {
    reject_invalid("object name", request.validate())?;

    state
        .devices
        .refresh_object(&device_id, request.object_name)
        .await?;
    Ok(ApiSuccess::message("refresh task submitted"))
}

/// POST /devices/{id}/add-object — queue an object creation.
pub async fn add_object(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(request): Json<ObjectRequest>,
) -> Result<ApiSuccess<Value>, ApiError> {
    reject_invalid("object name", request.validate())?;

    state
        .devices
        .add_object(&device_id, request.object_name)
        .await?;
    Ok(ApiSuccess::message("add object task submitted"))
}

/// POST /devices/{id}/delete-object — queue an object deletion.
pub async fn delete_object(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(request): Json<ObjectRequest>,
) -> Result<ApiSuccess<Value>, ApiError> {
    reject_invalid("object name", request.validate())?;

    state
        .devices
        .delete_object(&device_id, request.object_name)
        .await?;
    Ok(ApiSuccess::message("delete object task submitted"))
}

/// POST /devices/{id}/reboot — queue a reboot.
pub async fn reboot_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<ApiSuccess<Value>, ApiError> {
    state.devices.reboot(&device_id).await?;
    Ok(ApiSuccess::message("reboot task submitted"))
}

/// POST /devices/{id}/factory-reset — queue a factory reset.
pub async fn factory_reset_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<ApiSuccess<Value>, ApiError> {
    state.devices.factory_reset(&device_id).await?;
    Ok(ApiSuccess::message("factory reset task submitted"))
}
