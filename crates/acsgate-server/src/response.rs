// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The success response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Standard success envelope. Mutating commands return it without data:
/// success only means the ACS accepted the task request, never that the
/// device has executed anything.
#[derive(Debug, Serialize)]
pub struct ApiSuccess<T: Serialize> {
    /// Always `"success"`.
    pub status: &'static str,
    /// HTTP status code, mirrored into the body.
    pub status_code: u16,
    /// Human-readable summary.
    pub message: String,
    /// Payload, omitted for plain acknowledgements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiSuccess<serde_json::Value> {
    /// An acknowledgement without payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            status_code: 200,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> ApiSuccess<T> {
    /// A success envelope carrying data.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            status_code: 200,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
