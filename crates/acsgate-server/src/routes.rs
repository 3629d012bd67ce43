// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Router assembly.

use axum::routing::{delete, get, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::auth::require_api_key;
use crate::handlers::{devices, health, tasks};
use crate::state::AppState;

/// Build the full application router.
///
/// Command routes live behind the API-key layer; health and readiness stay
/// open for orchestration probes.
pub fn router(state: AppState) -> Router {
    let commands = Router::new()
        .route("/devices", get(devices::all_devices))
        .route("/devices/last-inform", get(devices::devices_by_last_inform))
        .route("/devices/pppoe", post(devices::set_pppoe_credentials))
        .route("/devices/wifi", post(devices::set_wireless_credentials))
        .route("/devices/{id}", get(devices::device_by_serial))
        .route("/devices/{id}/projection", get(devices::device_projection))
        .route("/devices/{id}/tasks", get(devices::device_tasks))
        .route("/devices/{id}/refresh", post(devices::refresh_device))
        .route("/devices/{id}/get-parameters", post(devices::get_parameter_values))
        .route("/devices/{id}/set-parameters", post(devices::set_parameter_values))
        .route("/devices/{id}/refresh-object", post(devices::refresh_object))
        .route("/devices/{id}/add-object", post(devices::add_object))
        .route("/devices/{id}/delete-object", post(devices::delete_object))
        .route("/devices/{id}/reboot", post(devices::reboot_device))
        .route("/devices/{id}/factory-reset", post(devices::factory_reset_device))
        .route("/tasks/{task_id}/retry", post(tasks::retry_task))
        .route("/tasks/{task_id}", delete(tasks::delete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let api = Router::new()
        .merge(commands)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    let router = Router::new()
        .nest("/api/v1/acs-gate", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    info!("Router initialized");
    router
}
