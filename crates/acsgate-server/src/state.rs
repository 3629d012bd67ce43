// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Shared application state for the HTTP layer.

use std::sync::Arc;

use acsgate_store::ConnectionMonitor;

use crate::services::{DeviceCommandService, TaskCommandService};

/// Everything the handlers need, cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// Device command orchestration.
    pub devices: DeviceCommandService,
    /// Task queue orchestration.
    pub tasks: TaskCommandService,
    /// Store connection health, read by health/readiness handlers.
    pub monitor: Arc<ConnectionMonitor>,
    /// Expected API key for the command surface.
    pub api_key: Arc<String>,
}
