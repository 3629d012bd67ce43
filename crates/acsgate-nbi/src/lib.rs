// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! acsgate NBI client
//!
//! Client for the northbound REST interface of a TR-069 Auto Configuration
//! Server. It turns domain commands (credential changes, reboots, parameter
//! reads and writes) into the ACS's task schema and query language.
//!
//! This crate is deliberately not a CWMP implementation: the ACS owns the
//! protocol sessions with devices. Everything here is plain HTTP against the
//! ACS's `/devices` and `/tasks` resources.
//!
//! # Example
//!
//! ```no_run
//! use acsgate_nbi::{DeviceTask, NbiClient, NbiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NbiClient::new(NbiConfig::new("http://acs.internal:7557"))?;
//!
//! // Ask a device to report its uptime on its next (forced) session
//! let task = DeviceTask::GetParameterValues {
//!     parameter_names: vec!["InternetGatewayDevice.DeviceInfo.UpTime".to_string()],
//! };
//! client.submit_task("202BC1-BM632w-0000001", &task).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod credentials;
mod error;
mod task;

pub use client::NbiClient;
pub use config::NbiConfig;
pub use credentials::{
    DEFAULT_RADIO_PROFILE, PppoeCredentials, RADIO_PROFILES, RadioProfile, SSID_PREFIX,
    WirelessCredentials, pppoe_bounce_task, pppoe_credential_task, radio_profile, wireless_task,
};
pub use error::{NbiError, Result};
pub use task::{DeviceTask, ParameterValue};
