// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Liveness and readiness handlers.
//!
//! Both read the connection monitor's atomic flag; neither issues its own
//! store ping, so probe traffic can never pile up on a slow store. Staleness
//! is bounded by the monitor interval.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::extract::State;
use serde_json::json;

use crate::response::ApiSuccess;
use crate::state::AppState;

/// GET /health — monitor metrics, 503 while the store is unreachable.
pub async fn health(State(state): State<AppState>) -> Response {
    let metrics = state.monitor.metrics();

    if !metrics.healthy {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "status_code": 503,
                "message": "service health check failed",
                "errors": [{"field": "store", "message": "store connection is down"}],
                "data": {"service": "acsgate", "status": "unhealthy", "monitor": metrics},
            })),
        )
            .into_response();
    }

    ApiSuccess::with_data(
        "service is healthy",
        json!({"service": "acsgate", "status": "healthy", "monitor": metrics}),
    )
    .into_response()
}

/// GET /ready — the bare readiness flag for orchestration probes.
pub async fn ready(State(state): State<AppState>) -> Response {
    if state.monitor.is_healthy() {
        (StatusCode::OK, Json(json!({"status": "ready"}))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "not_ready"})),
        )
            .into_response()
    }
}
