//! Connection-mode selection from distance to the safe-zone origin.
//!
//! The mode is a display label only; nothing here models an actual radio.

use serde::{Deserialize, Serialize};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum ConnectionMode {
    #[strum(serialize = "Bluetooth (BLE)")]
    Bluetooth,
    #[strum(serialize = "Wi-Fi")]
    WiFi,
    #[strum(serialize = "GPS")]
    Gps,
    #[strum(serialize = "LoRa")]
    LoRa,
}

impl ConnectionMode {
    pub fn label(&self) -> &'static str {
        (*self).into()
    }
}

/// Distance bands, in whole meters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkThresholds {
    /// Up to and including this distance the link is Bluetooth
    pub bluetooth_max_m: u64,
    /// Up to and including this distance the link is Wi-Fi
    pub wifi_max_m: u64,
    /// Beyond this distance Wi-Fi is dropped and the LoRa fallback is armed
    pub lora_min_m: u64,
}

impl Default for LinkThresholds {
    fn default() -> Self {
        Self {
            bluetooth_max_m: 10,
            wifi_max_m: 20,
            lora_min_m: 50,
        }
    }
}

impl LinkThresholds {
    /// Whether a pending LoRa fallback no longer has a reason to fire
    pub fn supersedes_fallback(&self, distance_m: u64) -> bool {
        distance_m <= self.lora_min_m
    }
}

/// What to do with a LoRa fallback timer once the position has moved on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoraPolicy {
    /// Drop the timer when a later update comes back within `lora_min_m`.
    #[default]
    CancelOnSupersede,
    /// Always switch to LoRa when the timer fires, even if the state it was
    /// armed for is long gone.
    FireUnconditionally,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkDecision {
    pub mode: ConnectionMode,
    pub wifi_available: bool,
    /// A deferred switch to LoRa must be armed
    pub arm_lora: bool,
}

/// Pick the connection mode for a rounded distance.
///
/// `wifi_available` is a latch: the Bluetooth and Wi-Fi bands set it and
/// arming the LoRa fallback clears it, so the fallback is armed at most once
/// per excursion past `lora_min_m`. A cancelled fallback restores it.
pub fn select_mode(
    distance_m: u64,
    wifi_available: bool,
    thresholds: &LinkThresholds,
) -> LinkDecision {
    let (mode, mut wifi_available) = if distance_m <= thresholds.bluetooth_max_m {
        (ConnectionMode::Bluetooth, true)
    } else if distance_m <= thresholds.wifi_max_m {
        (ConnectionMode::WiFi, true)
    } else {
        (ConnectionMode::Gps, wifi_available)
    };

    let arm_lora = distance_m > thresholds.lora_min_m && wifi_available;
    if arm_lora {
        wifi_available = false;
    }

    LinkDecision {
        mode,
        wifi_available,
        arm_lora,
    }
}
