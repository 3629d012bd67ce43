// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Credential-change requests and the manufacturer radio-profile table.
//!
//! Different CPE firmware families expose the 2.4GHz/5GHz radios under
//! different WLANConfiguration instance numbers and name the passphrase leaf
//! differently. The mapping lives in [`RADIO_PROFILES`]; supporting a new
//! manufacturer class is a table entry, not a code change.

use serde::{Deserialize, Serialize};

use crate::task::{DeviceTask, ParameterValue};

/// SSIDs are provisioned as this prefix plus the subscriber username.
pub const SSID_PREFIX: &str = "BitFiber_";

const WLAN_CONFIGURATION: &str = "InternetGatewayDevice.LANDevice.1.WLANConfiguration";
const WAN_PPP_CONNECTION: &str =
    "InternetGatewayDevice.WANDevice.1.WANConnectionDevice.1.WANPPPConnection.1";

/// Request to change a device's wireless SSID and passphrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirelessCredentials {
    /// Full device identifier in the ACS.
    #[serde(rename = "deviceID")]
    pub device_id: String,
    /// Manufacturer class, used to select the radio profile.
    pub manufacturer: String,
    /// Subscriber username; becomes the SSID suffix.
    #[serde(rename = "WirelessUsername")]
    pub username: String,
    /// Wireless passphrase.
    #[serde(rename = "WirelessPassword")]
    pub password: String,
}

/// Request to change a device's PPPoE login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PppoeCredentials {
    /// Full device identifier in the ACS.
    #[serde(rename = "deviceID")]
    pub device_id: String,
    /// Manufacturer class, used to pick the bounce strategy.
    pub manufacturer: String,
    /// PPPoE username.
    #[serde(rename = "PPPoEUsername")]
    pub username: String,
    /// PPPoE password.
    #[serde(rename = "PPPoEPassword")]
    pub password: String,
}

/// How one firmware family lays out its radios.
#[derive(Debug)]
pub struct RadioProfile {
    /// Manufacturer classes (upper-case) this profile applies to.
    pub classes: &'static [&'static str],
    /// WLANConfiguration instance numbers for the 2.4GHz and 5GHz radios.
    pub radios: [u8; 2],
    /// Leaf name under `PreSharedKey.1.` holding the passphrase.
    pub passphrase_leaf: &'static str,
    /// Per-band SSID suffixes, for families that want distinct SSIDs.
    pub band_suffixes: Option<[&'static str; 2]>,
}

/// Known firmware families. Matched case-insensitively on manufacturer class.
pub const RADIO_PROFILES: &[RadioProfile] = &[
    RadioProfile {
        classes: &["HWTC", "REALTEK"],
        radios: [1, 5],
        passphrase_leaf: "KeyPassphrase",
        band_suffixes: None,
    },
    RadioProfile {
        classes: &["DRAGONPATH", "MONU", "ASFT", "DIXON"],
        radios: [1, 5],
        passphrase_leaf: "KeyPassphrase",
        band_suffixes: None,
    },
    RadioProfile {
        classes: &["ADOPT", "PON"],
        radios: [1, 6],
        passphrase_leaf: "KeyPassphrase",
        band_suffixes: None,
    },
];

/// Fallback for manufacturers not in the table: instances 1 and 5, the
/// `PreSharedKey` leaf, and band-suffixed SSIDs.
pub const DEFAULT_RADIO_PROFILE: RadioProfile = RadioProfile {
    classes: &[],
    radios: [1, 5],
    passphrase_leaf: "PreSharedKey",
    band_suffixes: Some(["_2.4G", "_5G"]),
};

/// Resolve the radio profile for a manufacturer class.
pub fn radio_profile(manufacturer: &str) -> &'static RadioProfile {
    RADIO_PROFILES
        .iter()
        .find(|profile| {
            profile
                .classes
                .iter()
                .any(|class| class.eq_ignore_ascii_case(manufacturer))
        })
        .unwrap_or(&DEFAULT_RADIO_PROFILE)
}

fn ssid_path(radio: u8) -> String {
    format!("{}.{}.SSID", WLAN_CONFIGURATION, radio)
}

fn passphrase_path(radio: u8, leaf: &str) -> String {
    format!("{}.{}.PreSharedKey.1.{}", WLAN_CONFIGURATION, radio, leaf)
}

/// Build the single SetParameterValues task for a wireless credential change.
///
/// Profiled families share one SSID across both radios and get the triples in
/// SSID/SSID/passphrase/passphrase order; the default profile interleaves per
/// band because each radio carries its own suffixed SSID.
pub fn wireless_task(request: &WirelessCredentials) -> DeviceTask {
    let profile = radio_profile(&request.manufacturer);
    let ssid = format!("{}{}", SSID_PREFIX, request.username);
    let [radio_a, radio_b] = profile.radios;

    let parameter_values = match profile.band_suffixes {
        None => vec![
            ParameterValue::string(ssid_path(radio_a), ssid.clone()),
            ParameterValue::string(ssid_path(radio_b), ssid),
            ParameterValue::string(
                passphrase_path(radio_a, profile.passphrase_leaf),
                request.password.clone(),
            ),
            ParameterValue::string(
                passphrase_path(radio_b, profile.passphrase_leaf),
                request.password.clone(),
            ),
        ],
        Some([suffix_a, suffix_b]) => vec![
            ParameterValue::string(ssid_path(radio_a), format!("{}{}", ssid, suffix_a)),
            ParameterValue::string(
                passphrase_path(radio_a, profile.passphrase_leaf),
                request.password.clone(),
            ),
            ParameterValue::string(ssid_path(radio_b), format!("{}{}", ssid, suffix_b)),
            ParameterValue::string(
                passphrase_path(radio_b, profile.passphrase_leaf),
                request.password.clone(),
            ),
        ],
    };

    DeviceTask::SetParameterValues { parameter_values }
}

/// Build the SetParameterValues task writing the PPPoE login leaves.
pub fn pppoe_credential_task(request: &PppoeCredentials) -> DeviceTask {
    DeviceTask::SetParameterValues {
        parameter_values: vec![
            ParameterValue::string(
                format!("{}.Username", WAN_PPP_CONNECTION),
                request.username.clone(),
            ),
            ParameterValue::string(
                format!("{}.Password", WAN_PPP_CONNECTION),
                request.password.clone(),
            ),
        ],
    }
}

/// Build the follow-up task that forces the WAN session to pick up new PPPoE
/// credentials. ASFT firmware ignores the `Reset` leaf, so it gets a full
/// reboot; everyone else gets the cheaper connection reset.
pub fn pppoe_bounce_task(manufacturer: &str) -> DeviceTask {
    if manufacturer.eq_ignore_ascii_case("ASFT") {
        DeviceTask::Reboot
    } else {
        DeviceTask::SetParameterValues {
            parameter_values: vec![ParameterValue::boolean(
                format!("{}.Reset", WAN_PPP_CONNECTION),
                true,
            )],
        }
    }
}
