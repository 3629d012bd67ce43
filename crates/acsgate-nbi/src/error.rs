// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for acsgate-nbi.

use thiserror::Error;

/// Result type using NbiError.
pub type Result<T> = std::result::Result<T, NbiError>;

/// Errors that can occur when talking to the ACS northbound interface.
#[derive(Debug, Error)]
pub enum NbiError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a response: connect failure, timeout,
    /// or cancellation of the inbound deadline.
    #[error("transport error: {0}")]
    Transport(String),

    /// The ACS answered with a non-success status.
    #[error("ACS returned status {status}: {body}")]
    Status {
        /// HTTP status code returned by the ACS.
        status: u16,
        /// Response body, as text, for diagnostics.
        body: String,
    },

    /// The ACS answered 2xx but the body was not what we expected.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for NbiError {
    fn from(err: reqwest::Error) -> Self {
        NbiError::Transport(err.to_string())
    }
}
