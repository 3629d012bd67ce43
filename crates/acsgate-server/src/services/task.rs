// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Task queue command orchestration.

use std::sync::Arc;

use tracing::{info, instrument};

use acsgate_nbi::NbiClient;

use crate::error::ApiError;

/// Retry or delete previously queued ACS tasks.
#[derive(Clone)]
pub struct TaskCommandService {
    nbi: Arc<NbiClient>,
}

impl TaskCommandService {
    /// Create the service over the shared NBI client.
    pub fn new(nbi: Arc<NbiClient>) -> Self {
        Self { nbi }
    }

    /// Re-run a queued task.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn retry(&self, task_id: &str) -> Result<(), ApiError> {
        self.nbi.retry_task(task_id).await?;
        info!("Task retry accepted");
        Ok(())
    }

    /// Remove a queued task.
    #[instrument(skip(self), fields(task_id = %task_id))]
    pub async fn delete(&self, task_id: &str) -> Result<(), ApiError> {
        self.nbi.delete_task(task_id).await?;
        info!("Task deletion accepted");
        Ok(())
    }
}
