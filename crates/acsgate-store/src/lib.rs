// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! acsgate store access
//!
//! Read access to the ACS's mirrored device collection plus health
//! monitoring of the store connection.
//!
//! The collection is owned end-to-end by the ACS's inform pipeline: this
//! crate never creates, updates, or deletes a device document. What it adds
//! on top of plain reads:
//!
//! - [`DeviceRepository::find_by_serial_fragment`]: operators paste the last
//!   few characters of a serial number; the repository resolves that fragment
//!   to the full store identifier with a projection-only scan.
//! - [`ConnectionMonitor`]: a background loop pinging the store and exposing
//!   a lock-free health flag for the supervisor and readiness probes.
//!
//! The [`StoreHandle`] is built once at process start and shared by
//! reference everywhere — there is deliberately no ambient global client.

mod config;
mod device;
mod error;
mod handle;
mod monitor;
mod repository;

pub use config::StoreConfig;
pub use device::{DeviceIdentity, DeviceRecord};
pub use error::{Result, StoreError};
pub use handle::StoreHandle;
pub use monitor::{ConnectionMonitor, HealthMetrics, Pinger};
pub use repository::{DeviceRepository, first_matching_id};
