// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The service error taxonomy and its HTTP rendering.
//!
//! Every component classifies its own failures into exactly one kind before
//! returning; nothing downgrades a kind on the way up.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use acsgate_nbi::NbiError;
use acsgate_store::StoreError;

/// One field-level validation failure.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// The offending request field.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Service-level errors, one kind per failure class.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed required input. Never retried.
    #[error("{message}")]
    InvalidInput {
        /// Summary for the envelope.
        message: String,
        /// Per-field details, possibly empty.
        details: Vec<FieldError>,
    },

    /// Missing or wrong API key.
    #[error("{0}")]
    Unauthorized(String),

    /// No device matches the given identifier or fragment.
    #[error("{0}")]
    EntityNotFound(String),

    /// The ACS call failed (transport or non-success status).
    #[error("{0}")]
    ExternalService(String),

    /// The document-store query failed or timed out.
    #[error("{0}")]
    DbTransaction(String),

    /// A domain action failed for a reason that is not a pure transport
    /// failure.
    #[error("{0}")]
    InvalidOperation(String),
}

impl ApiError {
    /// An InvalidInput error without field details.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// The HTTP status this kind renders as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            ApiError::DbTransaction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<NbiError> for ApiError {
    fn from(err: NbiError) -> Self {
        ApiError::ExternalService(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::EntityNotFound(err.to_string()),
            StoreError::Config(_) | StoreError::Transaction { .. } => {
                ApiError::DbTransaction(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            ApiError::InvalidInput { details, .. } => details.clone(),
            _ => Vec::new(),
        };

        let mut body = json!({
            "status": "error",
            "status_code": status.as_u16(),
            "message": self.to_string(),
        });
        if !details.is_empty() {
            body["errors"] = json!(details);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_kind() {
        let cases = [
            (ApiError::invalid_input("bad"), StatusCode::BAD_REQUEST),
            (
                ApiError::Unauthorized("no key".to_string()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::EntityNotFound("missing".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::ExternalService("acs down".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::DbTransaction("store down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::InvalidOperation("refresh failed".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err}");
        }
    }

    #[test]
    fn test_store_not_found_maps_to_entity_not_found() {
        let err = ApiError::from(StoreError::NotFound("0043".to_string()));
        assert!(matches!(err, ApiError::EntityNotFound(_)));
    }

    #[test]
    fn test_store_transaction_maps_to_db_transaction() {
        let err = ApiError::from(StoreError::transaction("scan", "boom"));
        assert!(matches!(err, ApiError::DbTransaction(_)));
    }

    #[test]
    fn test_nbi_errors_map_to_external_service() {
        let err = ApiError::from(NbiError::Status {
            status: 503,
            body: "busy".to_string(),
        });
        assert!(matches!(err, ApiError::ExternalService(_)));
    }
}
