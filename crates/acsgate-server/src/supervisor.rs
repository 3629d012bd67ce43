// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The fail-fast supervisor loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::error;

use acsgate_store::ConnectionMonitor;

/// Poll the connection monitor and trigger process shutdown on sustained
/// store unavailability.
///
/// This is the sole self-healing mechanism: rather than serving degraded
/// responses indefinitely, the process cancels the root token (which drains
/// the HTTP server and every background loop) and lets the process
/// supervisor restart it against a healthy store.
pub fn spawn_supervisor(
    monitor: Arc<ConnectionMonitor>,
    poll_interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        // The monitor starts optimistic; the first observation happens one
        // poll period in, after the monitor has had a real check.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = ticker.tick() => {
                    if !monitor.is_healthy() {
                        error!("Store connection lost; shutting down");
                        shutdown.cancel();
                        return;
                    }
                }
            }
        }
    })
}
