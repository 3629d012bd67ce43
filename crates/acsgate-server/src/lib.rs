// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! acsgate server
//!
//! REST gateway in front of a TR-069 Auto Configuration Server. Operator
//! requests come in as simple per-device commands and leave as ACS task
//! submissions; device documents are read from the ACS's mirrored store.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Operator tooling (REST)                   │
//! └──────────────────────────────────────────────────────────────┘
//!                │ /api/v1/acs-gate (API key)
//!                ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  acsgate-server: handlers → command services → error taxonomy │
//! └──────────────────────────────────────────────────────────────┘
//!        │ acsgate-nbi                     │ acsgate-store
//!        ▼                                 ▼
//! ┌──────────────────┐            ┌──────────────────────┐
//! │  ACS northbound  │            │  Device mirror store │◄── monitor ping
//! │  /devices /tasks │            │  (read-only)         │
//! └──────────────────┘            └──────────────────────┘
//!        │ CWMP (owned by the ACS)
//!        ▼
//!    CPE fleet
//! ```
//!
//! Three loops run concurrently and share nothing but the store handle and
//! the monitor's atomics: the HTTP server, the connection monitor, and the
//! supervisor that turns sustained store failure into process shutdown.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod requests;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod supervisor;

pub use config::{Config, ConfigError};
pub use error::{ApiError, FieldError};
pub use response::ApiSuccess;
pub use routes::router;
pub use state::AppState;
pub use supervisor::spawn_supervisor;
