// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Task queue handlers.

use axum::extract::{Path, State};
use serde_json::Value;

use crate::error::ApiError;
use crate::response::ApiSuccess;
use crate::state::AppState;

/// POST /tasks/{task_id}/retry — re-run a queued task.
pub async fn retry_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<Value>, ApiError> {
    state.tasks.retry(&task_id).await?;
    Ok(ApiSuccess::message("task retry submitted"))
}

/// DELETE /tasks/{task_id} — remove a queued task.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<Value>, ApiError> {
    state.tasks.delete(&task_id).await?;
    Ok(ApiSuccess::message("task deleted"))
}
