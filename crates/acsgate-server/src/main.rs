// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! acsgate - TR-069 ACS gateway
//!
//! Wires the pieces together: configuration, the store handle, the NBI
//! client, the connection monitor, the supervisor, and the HTTP server.

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use acsgate_nbi::NbiClient;
use acsgate_server::config::Config;
use acsgate_server::services::{DeviceCommandService, TaskCommandService};
use acsgate_server::{AppState, router, spawn_supervisor};
use acsgate_store::{ConnectionMonitor, DeviceRepository, Pinger, StoreHandle};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from crate directory or parent directories)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("acsgate_server=info".parse().unwrap()),
        )
        .init();

    info!("Starting acsgate");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    info!(
        listen_addr = %config.listen_addr,
        nbi_url = %config.nbi.base_url,
        store_db = %config.store.database,
        "Configuration loaded"
    );

    // Connect to the device store; fail fast if it is unreachable at boot
    info!("Connecting to device store...");
    let store = Arc::new(StoreHandle::connect(&config.store).await?);
    store.ping().await?;
    info!("Device store reachable");

    let nbi = Arc::new(NbiClient::new(config.nbi.clone())?);
    let repository = DeviceRepository::new(store.clone());

    let pinger: Arc<dyn Pinger> = store.clone();
    let monitor = Arc::new(ConnectionMonitor::new(Some(pinger)));

    let shutdown = CancellationToken::new();

    // Background loops: store health checks plus the fail-fast supervisor
    let monitor_handle = tokio::spawn({
        let monitor = monitor.clone();
        let shutdown = shutdown.clone();
        let interval = config.monitor_interval;
        async move { monitor.run(interval, shutdown).await }
    });
    let supervisor_handle =
        spawn_supervisor(monitor.clone(), config.supervisor_interval, shutdown.clone());

    let state = AppState {
        devices: DeviceCommandService::new(nbi.clone(), repository),
        tasks: TaskCommandService::new(nbi),
        monitor: monitor.clone(),
        api_key: Arc::new(config.api_key.clone()),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move {
                tokio::select! {
                    _ = shutdown.cancelled() => {}
                    _ = tokio::signal::ctrl_c() => {
                        info!("Ctrl-C received, shutting down...");
                        shutdown.cancel();
                    }
                }
            }
        })
        .await?;

    shutdown.cancel();
    monitor_handle.await.ok();
    supervisor_handle.await.ok();

    info!("Shutdown complete");
    Ok(())
}
