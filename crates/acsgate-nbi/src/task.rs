// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! TR-069 task primitives as understood by the ACS task queue.
//!
//! `DeviceTask` is a closed union of everything this gateway can ask the ACS
//! to do to a device. Each variant carries its own typed fields; the ACS wire
//! schema (`{"name": "<taskKind>", ...}`) only exists at the serialization
//! boundary in [`crate::NbiClient`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A (path, value, type) triple for SetParameterValues, serialized as the
/// three-element array the ACS expects: `["path", value, "xsd:string"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterValue(pub String, pub Value, pub String);

impl ParameterValue {
    /// A string-typed parameter triple.
    pub fn string(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self(path.into(), Value::String(value.into()), "xsd:string".to_string())
    }

    /// A boolean-typed parameter triple.
    pub fn boolean(path: impl Into<String>, value: bool) -> Self {
        Self(path.into(), Value::Bool(value), "xsd:boolean".to_string())
    }

    /// The full TR-069 parameter path.
    pub fn path(&self) -> &str {
        &self.0
    }

    /// The value to set.
    pub fn value(&self) -> &Value {
        &self.1
    }

    /// The XSD type tag.
    pub fn value_type(&self) -> &str {
        &self.2
    }
}

/// A task the ACS can run against a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum DeviceTask {
    /// Ask the device to report values for the named parameters.
    #[serde(rename_all = "camelCase")]
    GetParameterValues {
        /// Parameter paths to read.
        parameter_names: Vec<String>,
    },

    /// Write parameter values on the device.
    #[serde(rename_all = "camelCase")]
    SetParameterValues {
        /// Triples to apply.
        parameter_values: Vec<ParameterValue>,
    },

    /// Re-read a parameter subtree. An empty object name refreshes the
    /// whole tree.
    #[serde(rename_all = "camelCase")]
    RefreshObject {
        /// Subtree root, e.g. `InternetGatewayDevice.LANDevice.1.`.
        object_name: String,
    },

    /// Create a new instance under a multi-instance object.
    #[serde(rename_all = "camelCase")]
    AddObject {
        /// Multi-instance object path.
        object_name: String,
    },

    /// Delete an instance of a multi-instance object.
    #[serde(rename_all = "camelCase")]
    DeleteObject {
        /// Instance path to remove.
        object_name: String,
    },

    /// Reboot the device.
    Reboot,

    /// Factory-reset the device.
    FactoryReset,
}

impl DeviceTask {
    /// The task kind string the ACS uses, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GetParameterValues { .. } => "getParameterValues",
            Self::SetParameterValues { .. } => "setParameterValues",
            Self::RefreshObject { .. } => "refreshObject",
            Self::AddObject { .. } => "addObject",
            Self::DeleteObject { .. } => "deleteObject",
            Self::Reboot => "reboot",
            Self::FactoryReset => "factoryReset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parameter_value_wire_shape() {
        let pv = ParameterValue::string("InternetGatewayDevice.X", "hello");
        assert_eq!(
            serde_json::to_value(&pv).unwrap(),
            json!(["InternetGatewayDevice.X", "hello", "xsd:string"])
        );

        let pv = ParameterValue::boolean("InternetGatewayDevice.Y", true);
        assert_eq!(
            serde_json::to_value(&pv).unwrap(),
            json!(["InternetGatewayDevice.Y", true, "xsd:boolean"])
        );
    }

    #[test]
    fn test_parameter_value_roundtrip() {
        let raw = json!(["A.B.C", "v", "xsd:string"]);
        let pv: ParameterValue = serde_json::from_value(raw).unwrap();
        assert_eq!(pv.path(), "A.B.C");
        assert_eq!(pv.value(), &json!("v"));
        assert_eq!(pv.value_type(), "xsd:string");
    }

    #[test]
    fn test_get_parameter_values_wire_shape() {
        let task = DeviceTask::GetParameterValues {
            parameter_names: vec!["InternetGatewayDevice.DeviceInfo.UpTime".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({
                "name": "getParameterValues",
                "parameterNames": ["InternetGatewayDevice.DeviceInfo.UpTime"],
            })
        );
    }

    #[test]
    fn test_set_parameter_values_wire_shape() {
        let task = DeviceTask::SetParameterValues {
            parameter_values: vec![ParameterValue::string("A.B", "v")],
        };
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({
                "name": "setParameterValues",
                "parameterValues": [["A.B", "v", "xsd:string"]],
            })
        );
    }

    #[test]
    fn test_object_task_wire_shapes() {
        let refresh = DeviceTask::RefreshObject {
            object_name: "InternetGatewayDevice.".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&refresh).unwrap(),
            json!({"name": "refreshObject", "objectName": "InternetGatewayDevice."})
        );

        let add = DeviceTask::AddObject {
            object_name: "InternetGatewayDevice.LANDevice.1.WLANConfiguration.".to_string(),
        };
        assert_eq!(serde_json::to_value(&add).unwrap()["name"], "addObject");

        let delete = DeviceTask::DeleteObject {
            object_name: "InternetGatewayDevice.LANDevice.1.WLANConfiguration.3.".to_string(),
        };
        assert_eq!(serde_json::to_value(&delete).unwrap()["name"], "deleteObject");
    }

    #[test]
    fn test_unit_task_wire_shapes() {
        assert_eq!(
            serde_json::to_value(DeviceTask::Reboot).unwrap(),
            json!({"name": "reboot"})
        );
        assert_eq!(
            serde_json::to_value(DeviceTask::FactoryReset).unwrap(),
            json!({"name": "factoryReset"})
        );
    }

    #[test]
    fn test_kind_matches_wire_name() {
        let tasks = [
            DeviceTask::GetParameterValues { parameter_names: vec![] },
            DeviceTask::SetParameterValues { parameter_values: vec![] },
            DeviceTask::RefreshObject { object_name: String::new() },
            DeviceTask::AddObject { object_name: String::new() },
            DeviceTask::DeleteObject { object_name: String::new() },
            DeviceTask::Reboot,
            DeviceTask::FactoryReset,
        ];
        for task in tasks {
            let wire = serde_json::to_value(&task).unwrap();
            assert_eq!(wire["name"], task.kind());
        }
    }
}
