// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Mirror models for the ACS's device documents.
//!
//! These records are written exclusively by the ACS's inform pipeline; this
//! system only ever reads them. Field names mirror the collection schema,
//! including its underscore prefixes.

use mongodb::bson::{DateTime, Document};
use serde::{Deserialize, Serialize};

/// The TR-069 identity composite reported by the device.
///
/// The serial number is a component of the full identifier string, not a key
/// of its own; lookups by serial go through the fragment scan in
/// [`crate::DeviceRepository`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Manufacturer name as reported in the inform.
    #[serde(rename = "_Manufacturer")]
    pub manufacturer: String,
    /// Organizationally-unique identifier.
    #[serde(rename = "_OUI")]
    pub oui: String,
    /// Product class.
    #[serde(rename = "_ProductClass")]
    pub product_class: String,
    /// Serial number.
    #[serde(rename = "_SerialNumber")]
    pub serial_number: String,
}

/// One mirrored device document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Store-assigned full identifier; unique per device.
    #[serde(rename = "_id")]
    pub id: String,

    /// Identity composite.
    #[serde(rename = "_deviceId")]
    pub identity: DeviceIdentity,

    /// Mirrored gateway configuration tree.
    #[serde(rename = "InternetGatewayDevice", default, skip_serializing_if = "Option::is_none")]
    pub internet_gateway: Option<Document>,

    /// Factory-reset command subtree.
    #[serde(rename = "FactoryReset", default, skip_serializing_if = "Option::is_none")]
    pub factory_reset: Option<Document>,

    /// Reboot command subtree.
    #[serde(rename = "Reboot", default, skip_serializing_if = "Option::is_none")]
    pub reboot: Option<Document>,

    /// ACS-computed virtual parameters.
    #[serde(rename = "VirtualParameters", default, skip_serializing_if = "Option::is_none")]
    pub virtual_parameters: Option<Document>,

    /// Last inform received from the device.
    #[serde(rename = "_lastInform", default, skip_serializing_if = "Option::is_none")]
    pub last_inform: Option<DateTime>,

    /// When the device first registered.
    #[serde(rename = "_registered", default, skip_serializing_if = "Option::is_none")]
    pub registered: Option<DateTime>,

    /// Last boot reported by the device.
    #[serde(rename = "_lastBoot", default, skip_serializing_if = "Option::is_none")]
    pub last_boot: Option<DateTime>,

    /// Last time the mirror was touched.
    #[serde(rename = "_timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_record_decodes_from_mirror_document() {
        let document = doc! {
            "_id": "202BC1-BM632w-8KA8WA1151100043",
            "_deviceId": {
                "_Manufacturer": "HWTC",
                "_OUI": "202BC1",
                "_ProductClass": "BM632w",
                "_SerialNumber": "8KA8WA1151100043",
            },
            "InternetGatewayDevice": {"DeviceInfo": {"UpTime": 1234}},
            "_lastInform": DateTime::from_millis(1_700_000_000_000),
        };

        let record: DeviceRecord = mongodb::bson::from_document(document).unwrap();
        assert_eq!(record.id, "202BC1-BM632w-8KA8WA1151100043");
        assert_eq!(record.identity.manufacturer, "HWTC");
        assert_eq!(record.identity.serial_number, "8KA8WA1151100043");
        assert!(record.internet_gateway.is_some());
        assert_eq!(record.last_inform, Some(DateTime::from_millis(1_700_000_000_000)));
        assert!(record.factory_reset.is_none());
    }

    #[test]
    fn test_serial_number_is_substring_of_full_id() {
        let document = doc! {
            "_id": "202BC1-BM632w-8KA8WA1151100043",
            "_deviceId": {
                "_Manufacturer": "HWTC",
                "_OUI": "202BC1",
                "_ProductClass": "BM632w",
                "_SerialNumber": "8KA8WA1151100043",
            },
        };
        let record: DeviceRecord = mongodb::bson::from_document(document).unwrap();
        assert!(record.id.contains(&record.identity.serial_number));
    }
}
