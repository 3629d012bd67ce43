// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Inbound request bodies and their validation rules.
//!
//! Credential bodies deserialize straight into the NBI crate's request types;
//! the rules here enforce the invariants those types assume (single-token
//! values, length bounds) before anything reaches the ACS.

use serde::Deserialize;

use acsgate_nbi::{ParameterValue, PppoeCredentials, WirelessCredentials};

use crate::error::{ApiError, FieldError};

/// Reject a request when validation produced field errors.
pub fn reject_invalid(context: &str, errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        return Ok(());
    }
    Err(ApiError::InvalidInput {
        message: format!("validation failed for {}", context),
        details: errors,
    })
}

fn single_word(value: &str) -> bool {
    !value.chars().any(char::is_whitespace)
}

fn check_credential(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &str,
    min_len: usize,
) {
    if value.is_empty() {
        errors.push(FieldError::new(field, "is required"));
        return;
    }
    if !single_word(value) {
        errors.push(FieldError::new(field, "must not contain whitespace"));
    }
    if value.len() < min_len {
        errors.push(FieldError::new(
            field,
            format!("must be at least {} characters", min_len),
        ));
    }
    if value.len() > 100 {
        errors.push(FieldError::new(field, "must be at most 100 characters"));
    }
}

/// A partial-serial lookup key, taken from the request path.
#[derive(Debug, Deserialize)]
pub struct DeviceSearch {
    /// The last 4–16 characters of a device serial number.
    pub serial: String,
}

impl DeviceSearch {
    /// Validate the fragment shape.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let len = self.serial.chars().count();
        if !(4..=16).contains(&len) {
            errors.push(FieldError::new(
                "SerialNumber",
                "must be between 4 and 16 characters",
            ));
        }
        if !self.serial.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(FieldError::new("SerialNumber", "must be alphanumeric"));
        }
        errors
    }
}

/// Validate a wireless credential change. Wireless secrets need at least
/// 8 characters to satisfy WPA2 passphrase rules.
pub fn validate_wireless(request: &WirelessCredentials) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if request.device_id.trim().is_empty() {
        errors.push(FieldError::new("deviceID", "is required"));
    }
    if request.manufacturer.trim().is_empty() {
        errors.push(FieldError::new("manufacturer", "is required"));
    }
    check_credential(&mut errors, "WirelessUsername", &request.username, 8);
    check_credential(&mut errors, "WirelessPassword", &request.password, 8);
    errors
}

/// Validate a PPPoE credential change.
pub fn validate_pppoe(request: &PppoeCredentials) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if request.device_id.trim().is_empty() {
        errors.push(FieldError::new("deviceID", "is required"));
    }
    if request.manufacturer.trim().is_empty() {
        errors.push(FieldError::new("manufacturer", "is required"));
    }
    check_credential(&mut errors, "PPPoEUsername", &request.username, 2);
    check_credential(&mut errors, "PPPoEPassword", &request.password, 2);
    errors
}

/// Body for a GetParameterValues task.
#[derive(Debug, Deserialize)]
pub struct GetParameterValuesRequest {
    /// Parameter paths to read.
    #[serde(rename = "parameterNames")]
    pub parameter_names: Vec<String>,
}

impl GetParameterValuesRequest {
    /// The name list must be non-empty and free of empty entries.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.parameter_names.is_empty() {
            errors.push(FieldError::new("parameterNames", "must not be empty"));
        }
        if self.parameter_names.iter().any(|name| name.trim().is_empty()) {
            errors.push(FieldError::new("parameterNames", "entries must not be empty"));
        }
        errors
    }
}

/// Body for a SetParameterValues task.
#[derive(Debug, Deserialize)]
pub struct SetParameterValuesRequest {
    /// Triples to apply.
    #[serde(rename = "parameterValues")]
    pub parameter_values: Vec<ParameterValue>,
}

impl SetParameterValuesRequest {
    /// The triple list must be non-empty with non-empty paths.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.parameter_values.is_empty() {
            errors.push(FieldError::new("parameterValues", "must not be empty"));
        }
        if self
            .parameter_values
            .iter()
            .any(|triple| triple.path().trim().is_empty())
        {
            errors.push(FieldError::new(
                "parameterValues",
                "parameter paths must not be empty",
            ));
        }
        errors
    }
}

/// Body for the object tasks (refresh, add, delete).
#[derive(Debug, Deserialize)]
pub struct ObjectRequest {
    /// Object path the task targets.
    #[serde(rename = "objectName")]
    pub object_name: String,
}

impl ObjectRequest {
    /// The object name is required.
    pub fn validate(&self) -> Vec<FieldError> {
        if self.object_name.trim().is_empty() {
            vec![FieldError::new("objectName", "is required")]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wireless(username: &str, password: &str) -> WirelessCredentials {
        WirelessCredentials {
            device_id: "dev-1".to_string(),
            manufacturer: "HWTC".to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_device_search_accepts_serial_fragments() {
        assert!(DeviceSearch { serial: "0043".to_string() }.validate().is_empty());
        assert!(
            DeviceSearch { serial: "8KA8WA1151100043".to_string() }
                .validate()
                .is_empty()
        );
    }

    #[test]
    fn test_device_search_rejects_bad_fragments() {
        assert!(!DeviceSearch { serial: "004".to_string() }.validate().is_empty());
        assert!(
            !DeviceSearch { serial: "8KA8WA11511000431".to_string() }
                .validate()
                .is_empty()
        );
        assert!(!DeviceSearch { serial: "00-43".to_string() }.validate().is_empty());
    }

    #[test]
    fn test_wireless_rules() {
        assert!(validate_wireless(&wireless("alice123", "secret12")).is_empty());

        let short = validate_wireless(&wireless("alice123", "short"));
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].field, "WirelessPassword");

        let spaced = validate_wireless(&wireless("alice bob", "secret12"));
        assert_eq!(spaced[0].field, "WirelessUsername");
        assert!(spaced[0].message.contains("whitespace"));
    }

    #[test]
    fn test_pppoe_allows_shorter_secrets() {
        let request = PppoeCredentials {
            device_id: "dev-1".to_string(),
            manufacturer: "HWTC".to_string(),
            username: "ab".to_string(),
            password: "cd".to_string(),
        };
        assert!(validate_pppoe(&request).is_empty());

        let mut missing = request.clone();
        missing.device_id = " ".to_string();
        assert_eq!(validate_pppoe(&missing)[0].field, "deviceID");
    }

    #[test]
    fn test_parameter_name_list_rules() {
        let empty = GetParameterValuesRequest { parameter_names: vec![] };
        assert!(!empty.validate().is_empty());

        let blank_entry = GetParameterValuesRequest {
            parameter_names: vec!["A.B".to_string(), "".to_string()],
        };
        assert!(!blank_entry.validate().is_empty());

        let good = GetParameterValuesRequest {
            parameter_names: vec!["A.B".to_string()],
        };
        assert!(good.validate().is_empty());
    }

    #[test]
    fn test_object_name_required() {
        let blank = ObjectRequest { object_name: "  ".to_string() };
        assert_eq!(blank.validate()[0].field, "objectName");

        let good = ObjectRequest {
            object_name: "InternetGatewayDevice.LANDevice.1.".to_string(),
        };
        assert!(good.validate().is_empty());
    }

    #[test]
    fn test_reject_invalid_builds_envelope_error() {
        let err = reject_invalid(
            "wireless credentials",
            vec![FieldError::new("WirelessPassword", "too short")],
        )
        .unwrap_err();

        let ApiError::InvalidInput { message, details } = err else {
            panic!("expected InvalidInput");
        };
        assert!(message.contains("wireless credentials"));
        assert_eq!(details.len(), 1);
    }
}
