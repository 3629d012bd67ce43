// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for acsgate-store.

use thiserror::Error;

/// Result type using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the mirrored device collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration error (missing or invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// No stored identifier contains the given serial fragment.
    #[error("no device matches serial fragment '{0}'")]
    NotFound(String),

    /// A store query failed or timed out.
    #[error("store query failed during '{operation}': {details}")]
    Transaction {
        /// The operation that failed.
        operation: &'static str,
        /// Error details.
        details: String,
    },
}

impl StoreError {
    /// Build a transaction error with operation context.
    pub fn transaction(operation: &'static str, details: impl ToString) -> Self {
        StoreError::Transaction {
            operation,
            details: details.to_string(),
        }
    }
}
