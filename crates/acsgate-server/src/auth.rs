// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! API-key authentication for the command surface.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Require `Authorization: Bearer <key>` on every command route.
///
/// Health and readiness are mounted outside this layer so orchestration
/// probes work unauthenticated.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let Some(key) = header.strip_prefix("Bearer ") else {
        warn!(path = %request.uri().path(), "Missing or malformed Authorization header");
        return Err(ApiError::Unauthorized(
            "missing or invalid Authorization header".to_string(),
        ));
    };

    if key != state.api_key.as_str() {
        warn!(path = %request.uri().path(), "Rejected request with wrong API key");
        return Err(ApiError::Unauthorized("invalid API key".to_string()));
    }

    Ok(next.run(request).await)
}
