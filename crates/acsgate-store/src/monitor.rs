// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Connection health monitoring.
//!
//! A two-state machine (`Healthy`/`Unhealthy`) over the store dependency.
//! One background loop is the only writer; the supervisor loop and the
//! readiness endpoint read the same lock-free atomics.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::handle::StoreHandle;

/// Something the monitor can ping.
#[async_trait]
pub trait Pinger: Send + Sync {
    /// True when the dependency answered within its deadline.
    async fn ping(&self) -> bool;
}

#[async_trait]
impl Pinger for StoreHandle {
    async fn ping(&self) -> bool {
        if let Err(e) = StoreHandle::ping(self).await {
            error!(error = %e, "Store health check failed");
            return false;
        }
        true
    }
}

/// Snapshot of the monitor's counters for the health surface.
#[derive(Debug, Clone, Serialize)]
pub struct HealthMetrics {
    /// Current health flag.
    pub healthy: bool,
    /// Checks performed since startup, including the one at startup.
    pub total_checks: u64,
    /// Checks that came back unhealthy.
    pub total_failures: u64,
    /// When the most recent check ran.
    pub last_check: DateTime<Utc>,
}

/// Polls the store dependency and exposes an atomic health flag.
///
/// Starts optimistic (`healthy = true`); only the check loop mutates the
/// state. Readers never take a lock.
pub struct ConnectionMonitor {
    pinger: Option<Arc<dyn Pinger>>,
    healthy: AtomicBool,
    checks: AtomicU64,
    failures: AtomicU64,
    last_check_ms: AtomicI64,
}

impl ConnectionMonitor {
    /// Create a monitor over the given dependency handle. An absent handle
    /// is reported unhealthy on the first check.
    pub fn new(pinger: Option<Arc<dyn Pinger>>) -> Self {
        Self {
            pinger,
            healthy: AtomicBool::new(true),
            checks: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            last_check_ms: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    /// Current health flag.
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    /// Counter snapshot.
    pub fn metrics(&self) -> HealthMetrics {
        HealthMetrics {
            healthy: self.healthy.load(Ordering::SeqCst),
            total_checks: self.checks.load(Ordering::Relaxed),
            total_failures: self.failures.load(Ordering::Relaxed),
            last_check: Utc
                .timestamp_millis_opt(self.last_check_ms.load(Ordering::Relaxed))
                .single()
                .unwrap_or_else(Utc::now),
        }
    }

    /// Run one check tick.
    pub async fn check(&self) {
        self.checks.fetch_add(1, Ordering::Relaxed);
        self.last_check_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);

        let healthy = match &self.pinger {
            Some(pinger) => pinger.ping().await,
            None => false,
        };

        if !healthy {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }

        let previous = self.healthy.swap(healthy, Ordering::SeqCst);
        if previous != healthy {
            warn!(healthy, "Connection health status changed");
        }
    }

    /// Drive the check loop until cancelled.
    ///
    /// The first check runs immediately; after that, one check per interval.
    pub async fn run(&self, interval: Duration, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Stopping connection monitor");
                    return;
                }
                _ = ticker.tick() => self.check().await,
            }
        }
    }
}
